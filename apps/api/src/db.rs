use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

const MAX_CONNECTIONS: u32 = 10;
/// Review requests hold a connection only around the credit queries, so a
/// short acquire timeout surfaces pool exhaustion quickly.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Connects the pool backing the `profiles` credit ledger.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
        .context("failed to connect to the credits database")?;

    info!("PostgreSQL pool ready ({MAX_CONNECTIONS} connections max)");
    Ok(pool)
}
