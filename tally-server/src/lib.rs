//! tally-server: personal progress-tracking HTTP API
//!
//! CRUD endpoints over todos, habits, daily logs, contest ratings and career
//! records, backed by PostgreSQL and a Supabase-compatible object store.

pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod storage;

pub use config::{Config, ConfigError, SecretString};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
pub use storage::{StorageClient, StorageError};

/// Startup error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("server error: {0}")]
    Server(#[from] ServerError),
}

/// Connect to the backends and serve until shutdown.
///
/// With `bootstrap_schema`, tables and constraints are created first when
/// missing.
pub async fn serve(config: Config, bootstrap_schema: bool) -> Result<(), Error> {
    let pool =
        db::create_pool_with_options(config.database_url.expose(), config.max_connections).await?;
    tracing::info!(max_connections = config.max_connections, "Database pool ready");

    if bootstrap_schema {
        db::schema::bootstrap(&pool).await?;
        tracing::info!("Schema bootstrap complete");
    }

    let storage = StorageClient::new(&config.storage_url, config.storage_key.clone())?;

    run_server(AppState { pool, storage }, ServerConfig::from(&config)).await?;
    Ok(())
}
