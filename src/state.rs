use std::sync::Arc;

use crate::application::services::LinkRegistry;
use crate::domain::store::KeyValueStore;

/// Shared application state injected into all handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<LinkRegistry>,
    /// Store handle kept alongside the registry for health checks.
    pub store: Arc<dyn KeyValueStore>,
}

impl AppState {
    pub fn new(registry: Arc<LinkRegistry>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { registry, store }
    }
}
