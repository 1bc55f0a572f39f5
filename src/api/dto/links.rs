//! DTOs for the link creation endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to create a short link.
///
/// ```json
/// { "longUrl": "https://example.com", "customSlug": "promo" }
/// ```
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    /// Destination URL. Only presence is checked, not well-formedness.
    #[validate(required(message = "longUrl required"))]
    #[validate(length(min = 1, message = "longUrl required"))]
    pub long_url: Option<String>,

    /// Optional caller-chosen short code, used verbatim. Empty means "generate one".
    pub custom_slug: Option<String>,
}

/// Response for a created link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkResponse {
    pub short_url: String,
}
