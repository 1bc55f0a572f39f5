//! Link store implementations.
//!
//! - [`MemoryLinkStore`] - In-process map, not durable
//! - [`RedisLinkStore`] - Redis strings with `SET NX` conditional writes
//! - [`PgLinkStore`] - PostgreSQL table with `ON CONFLICT` conditional writes
//!
//! [`connect_store`] picks the backend named by [`crate::config::StoreBackend`].

pub mod memory_link_store;
pub mod pg_link_store;
pub mod redis_link_store;

pub use memory_link_store::MemoryLinkStore;
pub use pg_link_store::PgLinkStore;
pub use redis_link_store::RedisLinkStore;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::config::{Config, StoreBackend};
use crate::domain::repositories::LinkStore;

/// Builds the configured link store.
///
/// Network backends are retried with exponential backoff so the service can start
/// alongside its store.
///
/// # Errors
///
/// Returns an error if the backend URL is missing or all connection attempts fail.
pub async fn connect_store(config: &Config) -> Result<Arc<dyn LinkStore>> {
    let strategy = ExponentialBackoff::from_millis(100)
        .max_delay(std::time::Duration::from_secs(5))
        .map(jitter)
        .take(config.store_connect_retries.saturating_sub(1));

    match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory link store; links are lost on restart");
            Ok(Arc::new(MemoryLinkStore::new()))
        }
        StoreBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .context("REDIS_URL must be set for the redis backend")?;
            let prefix = config.redis_key_prefix.clone();

            let store = Retry::start(strategy, || {
                let prefix = prefix.clone();
                async move {
                    RedisLinkStore::connect(url, prefix).await.inspect_err(|e| {
                        tracing::warn!("Redis connection attempt failed: {}", e);
                    })
                }
            })
            .await
            .context("Failed to connect to Redis")?;

            Ok(Arc::new(store))
        }
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set for the postgres backend")?;

            let store = Retry::start(strategy, || async move {
                PgLinkStore::connect(url, config).await.inspect_err(|e| {
                    tracing::warn!("Database connection attempt failed: {}", e);
                })
            })
            .await
            .context("Failed to connect to database")?;

            Ok(Arc::new(store))
        }
    }
}
