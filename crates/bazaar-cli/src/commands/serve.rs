//! Start the API server.

use clap::Args;

use bazaar_core::config::AppConfig;
use bazaar_core::error::AppError;
use bazaar_database::UserRepository;
use bazaar_database::migration::run_migrations;

use crate::output;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Apply pending migrations before serving
    #[arg(long)]
    pub migrate: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, mut config: AppConfig) -> Result<(), AppError> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }

    println!("Starting Bazaar server...");
    output::print_kv("Address", &config.server.bind_address());
    output::print_kv("Environment", &format!("{:?}", config.environment));

    let db = super::connect(&config).await?;
    if args.migrate {
        run_migrations(db.pool()).await?;
        output::print_success("Migrations applied.");
    }

    let users = std::sync::Arc::new(UserRepository::new(db.pool().clone()));
    bazaar_api::run_server(config, users).await?;
    db.close().await;
    Ok(())
}
