//! CLI command definitions and dispatch.

pub mod migrate;
pub mod serve;
pub mod token;
pub mod user;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use bazaar_core::config::AppConfig;
use bazaar_core::error::AppError;
use bazaar_database::{DatabasePool, UserRepository, UserStore};

use crate::output::OutputFormat;

/// Bazaar: marketplace API server and operator tooling
#[derive(Debug, Parser)]
#[command(name = "bazaar", version, about, long_about = None)]
pub struct Cli {
    /// Load exactly this configuration file instead of the layered defaults
    #[arg(short, long)]
    pub config: Option<String>,

    /// Environment overlay (`config/<env>.toml`)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the API server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Account management
    User(user::UserArgs),
    /// Session token tooling
    Token(token::TokenArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = self.load_config()?;

        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Migrate(args) => migrate::execute(args, &config, self.format).await,
            Commands::User(args) => user::execute(args, &config, self.format).await,
            Commands::Token(args) => token::execute(args, &config).await,
        }
    }

    fn load_config(&self) -> Result<AppConfig, AppError> {
        match &self.config {
            Some(path) => AppConfig::load_file(path),
            None => AppConfig::load(&self.env),
        }
    }
}

/// Helper: connect to the configured database
pub async fn connect(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}

/// Helper: credential store over the configured database
pub async fn user_store(config: &AppConfig) -> Result<Arc<dyn UserStore>, AppError> {
    let db = connect(config).await?;
    Ok(Arc::new(UserRepository::new(db.pool().clone())))
}
