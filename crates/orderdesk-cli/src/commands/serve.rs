//! Start the OrderDesk server.

use clap::Args;

use orderdesk_core::config::AppConfig;
use orderdesk_core::error::AppError;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Skip database migrations on startup
    #[arg(long)]
    pub no_migrate: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, mut config: AppConfig) -> Result<(), AppError> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if args.no_migrate {
        config.database.run_migrations = false;
    }

    println!("Starting OrderDesk server...");
    println!("  Host: {}", config.server.host);
    println!("  Port: {}", config.server.port);

    let stores = super::open_stores(&config).await?;
    orderdesk_api::run_server(config, stores).await
}
