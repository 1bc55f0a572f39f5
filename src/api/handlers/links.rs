//! Handler for the link creation endpoint.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Uri},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::links::{CreateLinkRequest, CreateLinkResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::origin::request_origin;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// { "longUrl": "https://example.com", "customSlug": "promo" }
/// ```
///
/// `customSlug` is optional; without it a random 6-character code is generated.
/// The body is parsed regardless of `Content-Type`.
///
/// # Response
///
/// ```json
/// { "shortUrl": "https://sho.rt/promo" }
/// ```
///
/// The short URL is built from the origin of this request.
///
/// # Errors
///
/// - 400 if the body is not valid JSON, `longUrl` is missing/empty, or the request
///   has no host
/// - 409 if `customSlug` is already in use
/// - 500 on store failures or when no free code could be generated
pub async fn create_link_handler(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<CreateLinkResponse>, AppError> {
    let payload: CreateLinkRequest = serde_json::from_slice(&body).map_err(|e| {
        AppError::bad_request("invalid JSON body", json!({ "reason": e.to_string() }))
    })?;

    payload.validate()?;

    let origin = request_origin(&headers, &uri, state.behind_proxy)?;

    let link = state
        .link_service
        .create_link(payload.long_url.unwrap_or_default(), payload.custom_slug)
        .await?;

    Ok(Json(CreateLinkResponse {
        short_url: link.short_url(&origin),
    }))
}
