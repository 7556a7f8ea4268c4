//! User management CLI commands.
//!
//! This is the only place the admin and active flags can be changed.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use orderdesk_api::AppState;
use orderdesk_core::config::AppConfig;
use orderdesk_core::error::AppError;
use orderdesk_core::types::PageRequest;
use orderdesk_database::{Stores, UserStore};
use orderdesk_entity::user::User;
use orderdesk_service::SignupRequest;

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
    /// Register a user (prompts for missing fields)
    Create {
        /// Display name
        #[arg(short, long)]
        name: Option<String>,
        /// Email
        #[arg(short, long)]
        email: Option<String>,
        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
        /// Grant admin on creation
        #[arg(long)]
        admin: bool,
    },
    /// Grant or revoke admin
    SetAdmin {
        /// Email of the user
        email: String,
        /// Revoke instead of grant
        #[arg(long)]
        revoke: bool,
    },
    /// Activate or deactivate an account
    SetActive {
        /// Email of the user
        email: String,
        /// Deactivate instead of activate
        #[arg(long)]
        disable: bool,
    },
    /// List users
    List {
        /// Rows to skip
        #[arg(long, default_value_t = 0)]
        offset: u64,
        /// Rows to show
        #[arg(long, default_value_t = 20)]
        limit: u64,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: String,
    /// Name
    name: String,
    /// Email
    email: String,
    /// Admin flag
    admin: bool,
    /// Active flag
    active: bool,
    /// Created at
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            name: u.name.clone(),
            email: u.email.clone(),
            admin: u.admin,
            active: u.active,
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let stores = super::open_stores(&config).await?;

    match &args.command {
        UserCommand::Create {
            name,
            email,
            password,
            admin,
        } => {
            let name = prompt_or(name, "Name")?;
            let email = prompt_or(email, "Email")?;
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
            };

            let state = AppState::new(config, stores.clone())?;
            let mut user = state
                .accounts
                .signup(SignupRequest {
                    name,
                    email,
                    password,
                })
                .await?;

            if *admin {
                user = stores.users.set_admin(user.id, true).await?;
            }

            output::print_success(&format!(
                "User '{}' created (admin: {})",
                user.email, user.admin
            ));
            output::print_item(&UserRow::from(&user), format);
        }
        UserCommand::SetAdmin { email, revoke } => {
            let user = find_user(&stores, email).await?;
            let user = stores.users.set_admin(user.id, !revoke).await?;
            output::print_success(&format!("User '{}' admin: {}", user.email, user.admin));
        }
        UserCommand::SetActive { email, disable } => {
            let user = find_user(&stores, email).await?;
            let user = stores.users.set_active(user.id, !disable).await?;
            output::print_success(&format!("User '{}' active: {}", user.email, user.active));
        }
        UserCommand::List { offset, limit } => {
            let users = stores
                .users
                .find_all(&PageRequest::new(*offset, *limit))
                .await?;
            let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}

fn prompt_or(value: &Option<String>, prompt: &str) -> Result<String, AppError> {
    match value {
        Some(v) => Ok(v.clone()),
        None => dialoguer::Input::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(|e| AppError::internal(format!("Input error: {e}"))),
    }
}

async fn find_user(stores: &Stores, email: &str) -> Result<User, AppError> {
    let email = email.trim().to_lowercase();
    stores
        .users
        .find_by_email(&email)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User '{email}' not found")))
}
