//! Database connection pool management.
//!
//! Connection pooling with SQLx and MySQL: pool limits and acquire
//! timeout come from `DatabaseConfig`, statement logging goes through
//! tracing.

use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
    ConnectOptions, MySqlPool, Row,
};
use std::str::FromStr;
use std::time::Duration;
use tracing::log::LevelFilter;

use nb_core::errors::{DependencyError, DomainError};
use nb_shared::config::DatabaseConfig;

/// MySQL connection pool wrapper
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Create a connection pool from the configuration.
    ///
    /// Connections are tested before being handed out, so a dropped
    /// server connection never reaches a repository.
    pub async fn new(config: &DatabaseConfig) -> Result<Self, DomainError> {
        tracing::info!(
            max_connections = config.max_connections,
            "creating database connection pool"
        );

        let connect_options = MySqlConnectOptions::from_str(&config.url)
            .map_err(|e| DependencyError::Datastore {
                reason: format!("invalid database URL: {e}"),
            })?
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_secs(1));

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect_with(connect_options)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "failed to create database pool");
                DependencyError::Datastore {
                    reason: e.to_string(),
                }
            })?;

        tracing::info!("database connection pool ready");
        Ok(Self { pool })
    }

    /// The underlying SQLx pool, for queries and transactions
    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Verify connectivity with a trivial round trip
    pub async fn health_check(&self) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(super::datastore_error)?;
        let value: i32 = row.try_get(0).unwrap_or(0);
        Ok(value == 1)
    }

    /// Close all connections; called during shutdown
    pub async fn close(&self) {
        tracing::info!("closing database connection pool");
        self.pool.close().await;
    }
}
