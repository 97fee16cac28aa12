//! Handler serving the landing page.

use axum::response::Html;

/// Serves the static landing page with the shortening form.
///
/// # Endpoint
///
/// `GET /`
pub async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../../../static/index.html"))
}
