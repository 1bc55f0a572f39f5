//! # Link Shortener
//!
//! A small URL shortening service built with Axum: `POST /api/links` stores a long
//! URL under a random or caller-chosen short code, and `GET /{code}` redirects back.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - The link entity and the [`domain::repositories::LinkStore`] contract
//! - **Application Layer** ([`application`]) - Create and resolve logic
//! - **Infrastructure Layer** ([`infrastructure`]) - Memory, Redis and PostgreSQL stores
//! - **API Layer** ([`api`]) - Handlers, DTOs, and middleware
//! - **Routing** ([`routes`]) - Ordered rule table deciding between API, redirect and static files
//! - **Web Layer** ([`web`]) - Static asset serving
//!
//! ## Quick Start
//!
//! ```bash
//! # In-memory store, static files from ./public
//! cargo run
//!
//! curl -s localhost:3000/api/links -d '{"longUrl":"https://example.com"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod routes;
pub mod server;
pub mod state;
pub mod utils;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for the admin CLI
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::LinkService;
    pub use crate::domain::entities::Link;
    pub use crate::domain::repositories::LinkStore;
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::MemoryLinkStore;
    pub use crate::state::AppState;
    pub use crate::web::StaticFiles;
}
