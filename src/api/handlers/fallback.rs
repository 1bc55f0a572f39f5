//! Handlers for requests that are not link operations.

use axum::{
    extract::{Request, State},
    response::Response,
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Rejects `GET` requests under the reserved `/api/` namespace.
///
/// Such paths are never treated as short codes.
pub async fn reserved_api_handler(request: Request) -> AppError {
    AppError::not_found(
        "endpoint not found",
        json!({ "path": request.uri().path() }),
    )
}

/// Hands the request to the static asset server.
pub async fn static_handler(State(state): State<AppState>, request: Request) -> Response {
    state.static_files.serve(request).await
}
