#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use link_shortener::AppError;
use link_shortener::domain::repositories::LinkStore;
use link_shortener::infrastructure::persistence::MemoryLinkStore;
use link_shortener::routes::app_router;
use link_shortener::state::AppState;
use link_shortener::web::StaticFiles;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const HOST: &str = "sho.rt";

pub fn fixture_static_files() -> StaticFiles {
    StaticFiles::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/public"))
}

/// Link store wrapper counting every call that reaches the inner store.
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryLinkStore,
    pub gets: AtomicUsize,
    pub writes: AtomicUsize,
}

impl CountingStore {
    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.gets() + self.writes()
    }
}

#[async_trait]
impl LinkStore for CountingStore {
    async fn get(&self, code: &str) -> Result<Option<String>, AppError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(code).await
    }

    async fn put(&self, code: &str, long_url: &str) -> Result<(), AppError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.put(code, long_url).await
    }

    async fn put_if_absent(&self, code: &str, long_url: &str) -> Result<bool, AppError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.put_if_absent(code, long_url).await
    }
}

pub fn create_test_state(store: Arc<dyn LinkStore>) -> AppState {
    AppState::new(store, 10, fixture_static_files(), false)
}

/// Test server over the full router and a counting in-memory store.
pub fn make_server() -> (TestServer, Arc<CountingStore>) {
    let store = Arc::new(CountingStore::default());
    let state = create_test_state(store.clone());
    let server = TestServer::new(app_router(state)).unwrap();
    (server, store)
}

/// Returns true for a generated short code: 6 characters of `[A-Za-z0-9]`.
pub fn is_generated_code(code: &str) -> bool {
    code.len() == 6 && code.chars().all(|c| c.is_ascii_alphanumeric())
}
