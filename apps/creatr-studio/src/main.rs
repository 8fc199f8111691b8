//! # Creatr Studio
//!
//! Headless host for the Creatr dashboard. Reads one JSON UI event per
//! stdin line and writes view updates as JSON lines on stdout; logs go to
//! stderr. Autosave keeps running on the runtime between events.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

mod config;
mod events;
mod output;
mod session;
mod state;
mod telemetry;

use config::StudioConfig;
use events::{Output, UiEvent};
use output::OutputSink;
use session::Session;
use state::AppState;
use telemetry::TelemetryConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = StudioConfig::from_env();
    tracing::info!(backend = ?config.backend, "Starting Creatr Studio");

    let sink = Arc::new(OutputSink::stdout());
    let state = AppState::new(&config, sink.clone())?;
    let mut session = Session::new(state);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<UiEvent>(line) {
            Ok(event) => session.dispatch(event).await,
            Err(e) => {
                tracing::warn!(error = %e, "Unreadable UI event");
                sink.emit(&Output::error(format!("Unreadable event: {e}")));
            }
        }
    }

    session.shutdown();
    tracing::info!("Input closed, shutting down");
    Ok(())
}
