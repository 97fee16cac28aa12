//! Handler for the link shortening endpoint.

use axum::{Json, extract::State};

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/a/b",
///   "custom_id": "my-link"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "identifier": "my-link",
///   "short_link": "https://sho.rt/my-link",
///   "kind": "custom"
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request when the URL or the custom identifier is invalid
/// - 409 Conflict when the custom identifier is already taken
/// - 503 Service Unavailable when the store cannot be reached
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    let allocation = state
        .registry
        .allocate(&payload.url, payload.custom_id.as_deref())
        .await?;

    Ok(Json(allocation.into()))
}
