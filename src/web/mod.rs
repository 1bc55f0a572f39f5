//! Static web assets served alongside the link routes.

pub mod static_files;

pub use static_files::StaticFiles;
