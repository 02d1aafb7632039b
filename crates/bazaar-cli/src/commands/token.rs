//! Session token tooling.

use clap::{Args, Subcommand};

use bazaar_auth::JwtEncoder;
use bazaar_core::config::AppConfig;
use bazaar_core::error::AppError;

use crate::output;

/// Arguments for token commands
#[derive(Debug, Args)]
pub struct TokenArgs {
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Issue a session token for an existing account
    Issue { email: String },
}

/// Execute token commands
pub async fn execute(args: &TokenArgs, config: &AppConfig) -> Result<(), AppError> {
    match &args.command {
        TokenCommand::Issue { email } => {
            let encoder = JwtEncoder::new(&config.auth)?;
            let users = super::user_store(config).await?;
            let user = super::user::find(&users, email).await?;

            if !user.active {
                return Err(AppError::validation(format!(
                    "User '{email}' is deactivated; the token would be rejected"
                )));
            }

            let issued = encoder.issue_token(user.id, Some(user.role))?;
            output::print_kv("User", &user.id.to_string());
            output::print_kv("Role", user.role.as_str());
            output::print_kv("Expires", &issued.expires_at.to_rfc3339());
            println!("{}", issued.token);
        }
    }
    Ok(())
}
