use std::{
    io::{self, Write},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{load_settings, HttpSearchTransport, SearchController, SearchStatus};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser, Debug)]
#[command(name = "jobsearch", about = "Search job postings by keyword")]
struct Args {
    /// Comma-separated keywords. Starts an interactive prompt when omitted.
    #[arg(long, short)]
    keywords: Option<String>,
    /// Base URL of the job search service (overrides client.toml and env).
    #[arg(long)]
    service_url: Option<String>,
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Print the rendered results as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(url) = args.service_url.clone() {
        settings.service_url = url;
    }
    if let Some(secs) = args.timeout_secs {
        settings.request_timeout_secs = secs;
    }
    let transport = HttpSearchTransport::from_settings(&settings)
        .context("job search service settings are not usable")?;
    tracing::info!(endpoint = %transport.endpoint(), "job search client ready");

    let mut controller = SearchController::new();

    match args.keywords {
        Some(keywords) => {
            controller.update_keyword_input(keywords);
            if !controller.submit_search(&transport).await {
                anyhow::bail!("no keywords given; pass a comma-separated list to --keywords");
            }
            print_state(&controller, args.json)?;
            Ok(match controller.state().status() {
                SearchStatus::Success => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            })
        }
        None => {
            run_prompt(&mut controller, &transport, args.json).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_prompt(
    controller: &mut SearchController,
    transport: &HttpSearchTransport,
    json: bool,
) -> Result<()> {
    println!("{}", client_core::view::IDLE_HINT);
    println!("Type 'quit' to exit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("keywords> ");
        io::stdout().flush().context("failed to flush prompt")?;

        let Some(line) = lines.next_line().await.context("failed to read input")? else {
            break;
        };
        let line = line.trim();
        if matches!(line, "quit" | "exit") {
            break;
        }

        controller.update_keyword_input(line);
        if !controller.state().can_submit() {
            println!("Enter at least one keyword.");
            continue;
        }

        println!("Searching...");
        controller.submit_search(transport).await;
        print_state(controller, json)?;
    }

    Ok(())
}

fn print_state(controller: &SearchController, json: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = if json {
        render::write_json(controller.state(), &mut out)
    } else {
        render::write_text(controller.state(), &mut out, &mut io::stderr().lock())
    };
    written.context("failed to write results")
}
