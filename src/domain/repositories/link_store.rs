//! Storage contract for short code → long URL mappings.

use crate::error::AppError;
use async_trait::async_trait;

/// Key-value store holding link mappings.
///
/// The store is the only source of truth: the service keeps no state of its own
/// between requests. Only single-key atomicity is required from implementations.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryLinkStore`] - in-process map
/// - [`crate::infrastructure::persistence::RedisLinkStore`] - Redis strings
/// - [`crate::infrastructure::persistence::PgLinkStore`] - PostgreSQL table
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Reads the long URL stored under `code`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` if the code was written
    /// - `Ok(None)` if it never was
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on backend errors.
    async fn get(&self, code: &str) -> Result<Option<String>, AppError>;

    /// Writes `code → long_url`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on backend errors.
    async fn put(&self, code: &str, long_url: &str) -> Result<(), AppError>;

    /// Writes `code → long_url` only if `code` is not present yet.
    ///
    /// Returns `Ok(true)` when the value was written and `Ok(false)` when the key
    /// already existed, in which case the stored value is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on backend errors.
    async fn put_if_absent(&self, code: &str, long_url: &str) -> Result<bool, AppError>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
