mod errors;
mod provision;
mod services;
mod setup;
mod utils;

use std::{io, process::ExitCode};

use dotenv::dotenv;
use errors::ProvisionError;
use provision::Provisioner;
use setup::{setup_database, setup_logging, DatabaseConfig};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    setup_logging();

    match run().await {
        Ok(message) => {
            println!("{message}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::error!(kind = error.error_name(), "{error}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<&'static str, ProvisionError> {
    let config = DatabaseConfig::from_env()?;
    let database_layer = setup_database(&config).await?;

    let report = Provisioner::new(&database_layer, io::stdout()).run().await?;

    tracing::info!(
        users = report.users_inserted,
        products = report.products_inserted,
        total_users = report.total_users,
        active_users = report.active_users,
        expensive_products = report.expensive_products,
        databases = report.databases.len(),
        collections = report.collections.len(),
        "provisioning finished"
    );

    Ok(report.message)
}
