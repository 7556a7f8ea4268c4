//! Database migration command.

use orderdesk_core::config::AppConfig;
use orderdesk_core::error::AppError;
use orderdesk_database::DatabasePool;
use orderdesk_database::migration::run_migrations;

use crate::output;

/// Apply all pending migrations to the configured database.
pub async fn execute(config: &AppConfig) -> Result<(), AppError> {
    if config.database.is_memory() {
        output::print_warning("The in-memory store has no schema to migrate.");
        return Ok(());
    }

    println!("Running database migrations...");
    let pool = DatabasePool::connect(&config.database).await?;
    run_migrations(pool.pool()).await?;
    pool.close().await;

    output::print_success("All migrations applied successfully.");
    Ok(())
}
