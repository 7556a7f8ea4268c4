//! CLI command definitions and dispatch.

pub mod migrate;
pub mod serve;
pub mod user;

use clap::{Parser, Subcommand};

use orderdesk_core::config::AppConfig;
use orderdesk_core::error::AppError;
use orderdesk_database::Stores;

use crate::output::OutputFormat;

/// OrderDesk: order management backend
#[derive(Debug, Parser)]
#[command(name = "orderdesk", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding `default.toml` and per-environment overlays
    #[arg(short, long, env = "ORDERDESK_CONFIG_DIR", default_value = "config")]
    pub config_dir: String,

    /// Environment overlay to load
    #[arg(short, long, env = "ORDERDESK_ENV", default_value = "development")]
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
    /// Start the OrderDesk server
    Serve(serve::ServeArgs),
    /// Apply pending database migrations
    Migrate,
    /// User management
    User(user::UserArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load(&self.config_dir, &self.env)?;

        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Migrate => migrate::execute(&config).await,
            Commands::User(args) => user::execute(args, config, self.format).await,
        }
    }
}

/// Helper: open the configured store
pub async fn open_stores(config: &AppConfig) -> Result<Stores, AppError> {
    Stores::open(&config.database).await
}
