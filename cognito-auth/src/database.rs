//! Connection pool and schema migrations

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseSettings;

/// Migrations embedded from `migrations/`
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Open a connection pool using the configured settings
///
/// # Errors
///
/// Returns `sqlx::Error` if the database cannot be reached
pub async fn connect(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(
        max_connections = settings.max_connections,
        "Connecting to database"
    );

    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout())
        .connect(&settings.url)
        .await
}

/// Apply pending migrations
///
/// # Errors
///
/// Returns `MigrateError` if a migration fails or the applied history diverges
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}
