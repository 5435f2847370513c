//! Database connection pool and schema setup

pub mod applications;

use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Executor;
use std::time::Duration;

/// Create a new database connection pool
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(600))
        .connect(database_url)
        .await
}

/// Apply the embedded schema. Every statement is idempotent, so this is safe
/// to run on each startup.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    let migration_sql = include_str!("migrations/001_initial.sql");

    // A plain &str goes through the simple query protocol, which accepts the
    // whole multi-statement batch including the $$-quoted trigger function.
    pool.execute(migration_sql).await?;

    tracing::info!("Database migrations completed");
    Ok(())
}
