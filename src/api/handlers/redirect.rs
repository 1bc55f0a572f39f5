//! Handler for short URL redirect.

use axum::{
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::debug;

use crate::error::{AppError, PlainTextError};
use crate::state::AppState;

/// Redirects a short code to its long URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// The code is the request path minus its leading slash, taken verbatim (still
/// percent-encoded, exactly as received).
///
/// # Response
///
/// `302 Found` with `Location` set to the stored URL.
///
/// # Static Fallback
///
/// An unknown code that names a top-level file of the static directory (such as
/// `style.css`) is served from there instead of failing. A stored link always wins,
/// so every accepted slug stays reachable.
///
/// # Errors
///
/// Plain-text bodies:
/// - 400 if the code is empty
/// - 404 if the code is unknown and no such static file exists
/// - 500 on store failures or if the stored URL cannot be sent as a header
pub async fn redirect_handler(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, PlainTextError> {
    let path = request.uri().path();
    let code = path.strip_prefix('/').unwrap_or(path);

    let resolved = state.link_service.resolve_link(code).await;

    let link = match resolved {
        Ok(link) => link,
        Err(AppError::NotFound { .. }) if state.static_files.is_asset(path) => {
            debug!(path = %path, "No link stored, serving static file");
            return Ok(state.static_files.serve(request).await);
        }
        Err(e) => return Err(e.into()),
    };

    let location = HeaderValue::try_from(link.long_url.as_str()).map_err(|_| {
        AppError::internal(
            "stored URL is not a valid redirect target",
            json!({ "code": link.code }),
        )
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
