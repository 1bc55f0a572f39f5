//! HTTP request handlers.
//!
//! Handlers are not mounted on axum paths directly: [`crate::routes`] classifies each
//! request and calls the matching handler.

pub mod fallback;
pub mod links;
pub mod redirect;

pub use fallback::{reserved_api_handler, static_handler};
pub use links::create_link_handler;
pub use redirect::redirect_handler;
