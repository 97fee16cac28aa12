//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`             - Landing page with the shortening form (public)
//! - `GET  /{identifier}` - Short link redirect (public)
//! - `GET  /health`       - Health check: store reachability (public)
//! - `/api/*`             - REST API
//! - `/static/*`          - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, index_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
///
/// Fixed routes (`/health`, `/api`, `/static`) take precedence over the
/// `/{identifier}` capture.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .nest("/api", api::routes::api_routes())
        .nest_service("/static", ServeDir::new("static"))
        .route("/{identifier}", get(redirect_handler))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
