//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{HttpSearchTransport, SearchTransport, Settings};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(settings: Settings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let transport = match HttpSearchTransport::from_settings(&settings) {
            Ok(transport) => Arc::new(transport),
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    err.to_string(),
                )));
                tracing::error!("job search service settings are not usable: {err}");
                return;
            }
        };

        let _ = ui_tx.try_send(UiEvent::Info(format!(
            "Service endpoint: {}",
            transport.endpoint()
        )));

        runtime.block_on(run_commands(transport, cmd_rx, ui_tx));
    });
}

async fn run_commands<T>(transport: Arc<T>, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>)
where
    T: SearchTransport + ?Sized,
{
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            BackendCommand::Search(pending) => {
                let result = transport.scrape_jobs(&pending.request).await;
                if ui_tx
                    .send(UiEvent::SearchFinished {
                        generation: pending.generation,
                        result,
                    })
                    .is_err()
                {
                    tracing::debug!("ui event queue closed; stopping backend worker");
                    break;
                }
            }
        }
    }
}
