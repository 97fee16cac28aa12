//! HTTP server initialization and runtime setup.
//!
//! Handles store selection, registry wiring, and Axum server lifecycle.

use crate::application::services::LinkRegistry;
use crate::config::Config;
use crate::domain::store::KeyValueStore;
use crate::infrastructure::store::{MemoryStore, RedisStore};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Key-value store (Redis when configured, in-memory otherwise)
/// - Link registry
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The Redis connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store: Arc<dyn KeyValueStore> = if let Some(redis_url) = &config.redis_url {
        let redis = RedisStore::connect(redis_url).await?;
        tracing::info!("Store backend: Redis");
        Arc::new(redis)
    } else {
        tracing::warn!("REDIS_URL not set; using in-memory store (mappings are lost on restart)");
        Arc::new(MemoryStore::new())
    };

    let registry = Arc::new(LinkRegistry::new(
        store.clone(),
        config.public_base_url.clone(),
        config.alloc_max_attempts,
    ));

    let state = AppState::new(registry, store);
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Completes when Ctrl+C is received.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {}", e);
        return;
    }

    tracing::info!("Shutdown signal received");
}
