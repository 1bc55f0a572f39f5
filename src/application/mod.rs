//! Application layer services implementing business logic.
//!
//! Services consume the storage trait from [`crate::domain`] and expose the
//! operations HTTP handlers and the admin CLI call.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation and resolution
pub mod services;
