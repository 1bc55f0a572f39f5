//! Utility functions for code generation and request handling.
//!
//! - [`code_generator`] - Random short code generation
//! - [`origin`] - Origin (`scheme://host`) extraction from HTTP requests

pub mod code_generator;
pub mod origin;
