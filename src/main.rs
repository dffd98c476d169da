//! DROS contest scoring service.
//!
//! Reads its settings from the environment, loads the contest
//! configuration and serves the scoring API.

use std::process::ExitCode;

use dros_scoring::api::{AppState, create_router};
use dros_scoring::config::{ConfigLoader, ServerSettings};
use dros_scoring::telemetry;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let settings = match ServerSettings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = telemetry::init(&settings.log_level) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    match run(settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Service stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run(settings: ServerSettings) -> Result<(), Box<dyn std::error::Error>> {
    let loader = ConfigLoader::load(&settings.config_dir)?;
    let addr = settings.socket_addr()?;

    let router = create_router(AppState::new(loader));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(address = %addr, "Listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "Failed to listen for shutdown signal");
    }
}
