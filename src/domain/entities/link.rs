//! Link entity representing a shortened URL mapping.

/// A short code and the long URL it resolves to.
///
/// Mappings are immutable once written: the service never updates or deletes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub code: String,
    pub long_url: String,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(code: impl Into<String>, long_url: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            long_url: long_url.into(),
        }
    }

    /// Builds the public short URL for this link under the given origin.
    pub fn short_url(&self, origin: &str) -> String {
        format!("{}/{}", origin.trim_end_matches('/'), self.code)
    }
}
