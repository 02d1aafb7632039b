//! Bazaar server: marketplace API auth core.
//!
//! Loads configuration, initializes logging, connects the credential store,
//! applies migrations, and serves the HTTP API.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use bazaar_core::config::{AppConfig, LogFormat};
use bazaar_core::error::AppError;
use bazaar_database::migration::run_migrations;
use bazaar_database::{DatabasePool, UserRepository};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Layered configuration: defaults, `config/<BAZAAR_ENV>.toml`, then env vars.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("BAZAAR_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Install the global subscriber. `RUST_LOG` wins over `logging.level`.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .with_target(true)
            .init(),
        LogFormat::Pretty => fmt().pretty().with_env_filter(filter).init(),
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.environment,
        "Starting Bazaar"
    );

    let db = DatabasePool::connect(&config.database).await?;
    run_migrations(db.pool()).await?;

    let users = Arc::new(UserRepository::new(db.pool().clone()));
    let result = bazaar_api::run_server(config, users).await;

    db.close().await;
    tracing::info!("Bazaar shut down");
    result
}
