//! Redis-backed link store.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info};

use crate::domain::repositories::LinkStore;
use crate::error::AppError;

/// Link store keeping each mapping as a Redis string.
///
/// Uses `ConnectionManager` for automatic reconnection; `SET NX` provides the
/// conditional write.
pub struct RedisLinkStore {
    conn: ConnectionManager,
    key_prefix: String,
}

impl RedisLinkStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `key_prefix` - namespace prepended to every short code
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the URL is invalid, the connection cannot
    /// be established, or the PING fails.
    pub async fn connect(redis_url: &str, key_prefix: impl Into<String>) -> Result<Self, AppError> {
        let client = Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;

        let store = Self {
            conn,
            key_prefix: key_prefix.into(),
        };
        store.ping().await?;

        info!("Connected to Redis link store");

        Ok(store)
    }

    fn build_key(&self, code: &str) -> String {
        format!("{}{}", self.key_prefix, code)
    }
}

#[async_trait]
impl LinkStore for RedisLinkStore {
    async fn get(&self, code: &str) -> Result<Option<String>, AppError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(self.build_key(code)).await?;
        Ok(value)
    }

    async fn put(&self, code: &str, long_url: &str) -> Result<(), AppError> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(self.build_key(code), long_url).await?;
        debug!(code = %code, "Redis SET");
        Ok(())
    }

    async fn put_if_absent(&self, code: &str, long_url: &str) -> Result<bool, AppError> {
        let mut conn = self.conn.clone();
        let written: bool = conn.set_nx(self.build_key(code), long_url).await?;
        debug!(code = %code, written, "Redis SETNX");
        Ok(written)
    }

    async fn ping(&self) -> Result<(), AppError> {
        let mut conn = self.conn.clone();
        conn.ping::<()>().await?;
        Ok(())
    }
}
