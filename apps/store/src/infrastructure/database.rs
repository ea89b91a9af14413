use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::StoreConfig;
use crate::domain::errors::StoreResult;

/// Opens a connection pool using the configured URL and pool size
pub async fn connect(config: &StoreConfig) -> StoreResult<PgPool> {
    tracing::info!(max_connections = config.max_connections, "Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    tracing::info!("Database connected successfully");
    Ok(pool)
}

/// Applies the embedded migrations in `migrations/`
pub async fn migrate(pool: &PgPool) -> StoreResult<()> {
    tracing::info!("Running store migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Store migrations complete");
    Ok(())
}
