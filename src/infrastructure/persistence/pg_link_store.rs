//! PostgreSQL implementation of the link store.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::domain::repositories::LinkStore;
use crate::error::AppError;

/// PostgreSQL store for link mappings.
///
/// Mappings live in the `links` table keyed by `code`; the primary key provides the
/// uniqueness that `put_if_absent` relies on.
pub struct PgLinkStore {
    pool: Arc<PgPool>,
}

impl PgLinkStore {
    /// Creates a store over an existing connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Opens a pool using the configured pool settings and applies migrations.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the connection or a migration fails.
    pub async fn connect(database_url: &str, config: &Config) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
            .idle_timeout(Duration::from_secs(config.db_idle_timeout))
            .max_lifetime(Duration::from_secs(config.db_max_lifetime))
            .connect(database_url)
            .await?;
        tracing::info!("Connected to database");

        sqlx::migrate!("./migrations").run(&pool).await.map_err(|e| {
            tracing::error!("Migration failed: {}", e);
            AppError::internal("Migration failed", serde_json::Value::Null)
        })?;

        Ok(Self::new(Arc::new(pool)))
    }
}

#[async_trait]
impl LinkStore for PgLinkStore {
    async fn get(&self, code: &str) -> Result<Option<String>, AppError> {
        let long_url = sqlx::query_scalar::<_, String>("SELECT long_url FROM links WHERE code = $1")
            .bind(code)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(long_url)
    }

    async fn put(&self, code: &str, long_url: &str) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO links (code, long_url)
            VALUES ($1, $2)
            ON CONFLICT (code) DO UPDATE SET long_url = EXCLUDED.long_url
            "#,
        )
        .bind(code)
        .bind(long_url)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn put_if_absent(&self, code: &str, long_url: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO links (code, long_url)
            VALUES ($1, $2)
            ON CONFLICT (code) DO NOTHING
            "#,
        )
        .bind(code)
        .bind(long_url)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
