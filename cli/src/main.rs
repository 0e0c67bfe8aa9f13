//! `carfuel`: command-line client for the car fuel tracker
//!
//! ```sh
//! carfuel create-car --brand Toyota --model Corolla --year 2018
//! carfuel add-fuel --car-id 1 --liters 40 --price 52.5 --odometer 45000
//! carfuel fuel-stats --car-id 1
//! carfuel list-cars
//! ```

mod api_client;
mod commands;
mod output;
mod server_manager;

use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;

use api_client::{ApiClient, ClientError};
use commands::Cli;
use server_manager::{find_server_executable, ServerError, ServerManager};

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Server(#[from] ServerError),
}

async fn run(cli: Cli) -> Result<String, AppError> {
    let client = ApiClient::new(&cli.api_url)?;

    let mut manager = ServerManager::new(client.clone(), find_server_executable());
    manager
        .ensure_running(cli.yes, std::io::stdin().lock(), std::io::stdout())
        .await?;

    Ok(commands::execute(&client, &cli.command).await?)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(AppError::Client(e @ ClientError::Api { .. })) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
