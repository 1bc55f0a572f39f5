//! Core domain entities.
//!
//! The service has a single entity, [`Link`], the mapping from a short code to the
//! long URL it redirects to.

pub mod link;

pub use link::Link;
