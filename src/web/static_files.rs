//! Static asset serving for requests the link router does not handle.

use axum::{
    extract::Request,
    response::{IntoResponse, Response},
};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::services::ServeDir;
use tracing::{debug, warn};

/// Static file server plus the set of top-level asset paths it knows about.
///
/// The asset set is captured once at startup. When `/style.css` has no stored link,
/// the redirect handler checks it here before falling back to the file, without
/// touching the filesystem per request.
#[derive(Clone)]
pub struct StaticFiles {
    serve_dir: ServeDir,
    assets: Arc<HashSet<String>>,
}

impl StaticFiles {
    /// Creates a static file server rooted at `dir`.
    ///
    /// A missing or unreadable directory is logged and yields an empty asset set;
    /// requests deferred to it then receive 404.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let assets = scan_top_level_files(dir);
        debug!("Static dir {} holds {} assets", dir.display(), assets.len());

        Self {
            serve_dir: ServeDir::new(PathBuf::from(dir)),
            assets: Arc::new(assets),
        }
    }

    /// Returns true if `path` (e.g. `/style.css`) names a top-level static file.
    pub fn is_asset(&self, path: &str) -> bool {
        self.assets.contains(path)
    }

    /// Serves the request from the static directory.
    pub async fn serve(&self, request: Request) -> Response {
        match self.serve_dir.clone().oneshot(request).await {
            Ok(response) => response.into_response(),
            Err(never) => match never {},
        }
    }
}

fn scan_top_level_files(dir: &Path) -> HashSet<String> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Static dir {} is not readable: {}", dir.display(), e);
            return HashSet::new();
        }
    };

    entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .map(|name| format!("/{name}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/public")
    }

    #[test]
    fn test_scan_finds_top_level_files() {
        let files = StaticFiles::new(fixture_dir());

        assert!(files.is_asset("/index.html"));
        assert!(files.is_asset("/style.css"));
        assert!(!files.is_asset("/missing.js"));
        assert!(!files.is_asset("style.css"));
    }

    #[test]
    fn test_missing_dir_has_no_assets() {
        let files = StaticFiles::new("/definitely/not/here");
        assert!(!files.is_asset("/index.html"));
    }
}
