//! Backend-to-UI events and error modeling for the desktop GUI.

use client_core::SearchError;
use shared::protocol::ScrapeJobsResponse;

pub enum UiEvent {
    Info(String),
    Error(UiError),
    SearchFinished {
        generation: u64,
        result: Result<ScrapeJobsResponse, SearchError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Search,
}

#[derive(Debug, Clone)]
pub struct UiError {
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            context,
            message: message.into(),
        }
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Text for the blocking notice.
    pub fn notice(&self) -> String {
        match self.context {
            UiErrorContext::BackendStartup => format!(
                "Search backend failed to start; searches will not work until the app is relaunched. {}",
                self.message
            ),
            UiErrorContext::Search => self.message.clone(),
        }
    }
}
