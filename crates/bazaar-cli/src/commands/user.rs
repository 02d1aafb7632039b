//! Account management commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use bazaar_auth::{PasswordHasher, PasswordValidator};
use bazaar_core::config::AppConfig;
use bazaar_core::error::AppError;
use bazaar_database::UserStore;
use bazaar_entity::user::{CreateUser, User, UserRole};

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create an account, prompting for the password
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// One of: user, author, instructor, employer, admin
        #[arg(long, default_value = "user")]
        role: String,
    },
    /// Show an account
    Show { email: String },
    /// Re-enable a deactivated account
    Activate { email: String },
    /// Deactivate an account; its tokens stop working at once
    Deactivate { email: String },
    /// Grant or revoke the premium tier
    Premium {
        email: String,
        #[arg(long)]
        revoke: bool,
    },
}

/// Account display row
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    id: String,
    name: String,
    email: String,
    role: String,
    active: bool,
    premium: bool,
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            name: u.name.clone(),
            email: u.email.clone(),
            role: u.role.to_string(),
            active: u.active,
            premium: u.is_premium,
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let users = super::user_store(config).await?;

    match &args.command {
        UserCommand::Create { name, email, role } => {
            let role: UserRole = role.parse()?;
            let password = prompt_password()?;
            PasswordValidator::new(&config.auth).validate(&password, &password)?;

            let user = users
                .create(CreateUser {
                    name: name.clone(),
                    email: email.trim().to_lowercase(),
                    password_hash: PasswordHasher::new().hash_password(&password)?,
                    role,
                })
                .await?;

            output::print_success(&format!("User '{}' created", user.email));
            output::print_row(&UserRow::from(&user), format);
        }
        UserCommand::Show { email } => {
            let user = find(&users, email).await?;
            output::print_row(&UserRow::from(&user), format);
        }
        UserCommand::Activate { email } => {
            let user = find(&users, email).await?;
            users.set_active(user.id, true).await?;
            output::print_success(&format!("User '{email}' activated"));
        }
        UserCommand::Deactivate { email } => {
            let user = find(&users, email).await?;
            users.set_active(user.id, false).await?;
            output::print_success(&format!("User '{email}' deactivated"));
        }
        UserCommand::Premium { email, revoke } => {
            let user = find(&users, email).await?;
            users.set_premium(user.id, !revoke).await?;
            let verb = if *revoke { "revoked from" } else { "granted to" };
            output::print_success(&format!("Premium {verb} '{email}'"));
        }
    }

    Ok(())
}

/// Look up an account by email or fail with `NotFound`.
pub async fn find(users: &Arc<dyn UserStore>, email: &str) -> Result<User, AppError> {
    users
        .find_by_email(&email.trim().to_lowercase())
        .await?
        .ok_or_else(|| AppError::not_found(format!("User '{email}' not found")))
}

fn prompt_password() -> Result<String, AppError> {
    dialoguer::Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords are not the same!")
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}
