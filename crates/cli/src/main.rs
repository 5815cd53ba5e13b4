//! `notes-cli` -- command-line client for the notes service.
//!
//! # Environment variables
//!
//! | Variable                     | Required | Default                     | Description            |
//! |------------------------------|----------|-----------------------------|------------------------|
//! | `NOTES_API_URL`              | no       | `http://localhost:3000/api` | Service base URL       |
//! | `NOTES_REQUEST_TIMEOUT_SECS` | no       | `10`                        | Per-request timeout    |
//! | `RUST_LOG`                   | no       | see below                   | Log filter             |

use std::process::ExitCode;

use clap::Parser;
use notes_cli::cli::Cli;
use notes_cli::commands;
use notes_client::{ClientConfig, NotesApi};
use notes_store::NotesStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notes_cli=info,notes_store=info,notes_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = ClientConfig::from_env();
    tracing::info!(api_url = %config.api_url, "Loaded client configuration");

    let api = match NotesApi::from_config(&config) {
        Ok(api) => api,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build HTTP client");
            return ExitCode::FAILURE;
        }
    };

    // One store per session; every consumer goes through a handle.
    let store = NotesStore::new(api);
    let notes = store.handle();

    match commands::execute(cli.command, &notes).await {
        Ok(out) => {
            println!("{out}");
            ExitCode::SUCCESS
        }
        Err(out) => {
            eprintln!("{out}");
            ExitCode::FAILURE
        }
    }
}
