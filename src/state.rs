//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::repositories::LinkStore;
use crate::web::StaticFiles;

/// State shared by every request.
///
/// Cloning is cheap: the service is reference-counted and [`StaticFiles`] shares its
/// asset set.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub static_files: StaticFiles,
    /// Trust `X-Forwarded-*` headers when computing the short URL origin.
    pub behind_proxy: bool,
}

impl AppState {
    /// Builds the state around an explicitly injected store.
    pub fn new(
        store: Arc<dyn LinkStore>,
        max_code_attempts: usize,
        static_files: StaticFiles,
        behind_proxy: bool,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(store, max_code_attempts)),
            static_files,
            behind_proxy,
        }
    }
}
