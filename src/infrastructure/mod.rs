//! Infrastructure layer for external integrations.
//!
//! Implements the storage contract defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - Link store backends (memory, Redis, PostgreSQL)

pub mod persistence;
