use crate::infrastructure::config::PoolSettings;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::time::Duration;

pub type DbPool = Pool<Postgres>;

pub async fn create_pool(database_url: &str, settings: &PoolSettings) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(settings.idle_timeout_secs))
        .connect(database_url)
        .await
}

/// Connect and bring the `documents` schema up to date.
pub async fn connect_and_migrate(
    database_url: &str,
    settings: &PoolSettings,
) -> anyhow::Result<DbPool> {
    let pool = create_pool(database_url, settings).await?;
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Document store migrations applied");
    Ok(pool)
}
