//! PostgreSQL connection pool management.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use postboard_core::config::DatabaseConfig;
use postboard_core::error::{AppError, ErrorKind};

use crate::store::Stores;

/// Wrapper around the sqlx PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
    query_timeout: Duration,
}

impl DatabasePool {
    /// Open a pool and verify connectivity within the configured timeouts.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        if config.url.is_empty() {
            return Err(AppError::configuration(
                "database.url is empty; set it in config or pass --db-dsn",
            ));
        }

        info!(
            url = %mask_password(&config.url),
            max_connections = config.max_connections,
            query_timeout_seconds = config.query_timeout_seconds,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect(&config.url)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to connect to database: {e}"),
                    e,
                )
            })?;

        info!("Connected to PostgreSQL");
        Ok(Self {
            pool,
            query_timeout: Duration::from_secs(config.query_timeout_seconds),
        })
    }

    /// Return a reference to the underlying sqlx pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Build the PostgreSQL-backed store set over this pool.
    pub fn stores(&self) -> Stores {
        Stores::postgres(self.pool.clone(), self.query_timeout)
    }

    /// Close all connections in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

/// Mask the password portion of a database URL for safe logging.
fn mask_password(url: &str) -> String {
    let scheme_end = url.find("://").map(|p| p + 3).unwrap_or(0);
    match url.rfind('@') {
        Some(at) => match url[..at].rfind(':') {
            Some(colon) if colon > scheme_end => {
                format!("{}:****@{}", &url[..colon], &url[at + 1..])
            }
            _ => url.to_string(),
        },
        None => url.to_string(),
    }
}
