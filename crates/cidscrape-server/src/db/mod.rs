//! Database bootstrap: pool creation, migrations and reset

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::store::{StoreError, StoreResult};

pub async fn create_pool(config: &DatabaseConfig) -> StoreResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect(&config.url)
        .await?;

    tracing::info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Database connection pool created"
    );

    Ok(pool)
}

/// Apply pending migrations. Safe to run on every start; existing rows survive.
pub async fn run_migrations(pool: &PgPool) -> StoreResult<()> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    tracing::info!("Database migrations completed");
    Ok(())
}

/// Remove every stored record. Only invoked for an explicit full refresh.
pub async fn reset_metadata(pool: &PgPool) -> StoreResult<u64> {
    let result = sqlx::query("DELETE FROM metadata").execute(pool).await?;
    tracing::warn!(rows = result.rows_affected(), "Metadata table reset");
    Ok(result.rows_affected())
}

pub async fn health_check(pool: &PgPool) -> StoreResult<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(|e| StoreError::Unavailable(format!("database health check failed: {}", e)))
}
