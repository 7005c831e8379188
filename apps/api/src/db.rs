use std::time::Duration;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Sized for the review-form traffic pattern: many short-lived requests,
/// each touching one restaurant row and at most one review insert.
const MAX_CONNECTIONS: u32 = 10;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Creates the PostgreSQL pool backing the restaurant and review tables.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to the review store...");

    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await?;

    info!("Review store connection pool established");
    Ok(pool)
}
