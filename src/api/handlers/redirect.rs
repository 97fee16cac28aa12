//! Handler for short link redirects.

use axum::{
    extract::{Path, State},
    response::Redirect,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short identifier to its target URL.
///
/// # Endpoint
///
/// `GET /{identifier}`
///
/// # Errors
///
/// Returns 404 Not Found when the identifier does not exist or is a reserved
/// request path (e.g. `favicon.ico`).
pub async fn redirect_handler(
    Path(identifier): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let target = state.registry.resolve(&identifier).await?;

    Ok(Redirect::temporary(&target))
}
