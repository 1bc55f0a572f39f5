//! In-process link store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tokio::sync::RwLock;

use crate::domain::repositories::LinkStore;
use crate::error::AppError;

/// Link store backed by a `HashMap` behind an async `RwLock`.
///
/// Mappings live only as long as the process. Used for development and tests.
#[derive(Default)]
pub struct MemoryLinkStore {
    links: RwLock<HashMap<String, String>>,
}

impl MemoryLinkStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored mappings.
    pub async fn len(&self) -> usize {
        self.links.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.links.read().await.is_empty()
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    async fn get(&self, code: &str) -> Result<Option<String>, AppError> {
        Ok(self.links.read().await.get(code).cloned())
    }

    async fn put(&self, code: &str, long_url: &str) -> Result<(), AppError> {
        self.links
            .write()
            .await
            .insert(code.to_string(), long_url.to_string());
        Ok(())
    }

    async fn put_if_absent(&self, code: &str, long_url: &str) -> Result<bool, AppError> {
        match self.links.write().await.entry(code.to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(long_url.to_string());
                Ok(true)
            }
        }
    }
}
