mod app_system;
mod clients;
mod domain;
mod error;
mod handlers;
mod store;
mod validators;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod mock_framework;

use clap::Parser;
use tokio::io::BufReader;
use tracing::{error, info};

use crate::app_system::{serve, setup_tracing, Config, UserSystem};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = Config::parse().validate().map_err(|e| {
        error!(error = %e, "Invalid configuration");
        e.to_string()
    })?;

    info!(region = %config.region, table = %config.table_name, "Starting user router");

    let system = UserSystem::new(&config);

    // One JSON request per line on stdin, one JSON response per line on stdout
    let served = serve(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        &system.router,
    )
    .await;

    system.shutdown().await?;

    let served = served.map_err(|e| e.to_string())?;
    info!(served, "User router finished");
    Ok(())
}
