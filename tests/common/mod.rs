#![allow(dead_code)]

use std::sync::Arc;

use link_registry::application::services::LinkRegistry;
use link_registry::domain::store::KeyValueStore;
use link_registry::infrastructure::store::MemoryStore;
use link_registry::state::AppState;

pub const TEST_BASE_URL: &str = "https://sho.rt";

/// Builds an application state over a fresh in-memory store.
///
/// The store handle is returned alongside so tests can seed mappings and
/// inspect what the handlers wrote.
pub fn create_test_state() -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let registry = Arc::new(LinkRegistry::new(store.clone(), TEST_BASE_URL, 10));
    let state = AppState::new(registry, store.clone());

    (state, store)
}

pub async fn seed_link(store: &MemoryStore, identifier: &str, url: &str) {
    store.put(identifier, url).await.unwrap();
}

pub async fn stored_url(store: &MemoryStore, identifier: &str) -> Option<String> {
    store.get(identifier).await.unwrap()
}
