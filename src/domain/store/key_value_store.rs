//! Key-value store trait for short link persistence.

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by key-value store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store connection error: {0}")]
    Connection(String),
    #[error("store operation error: {0}")]
    Operation(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Durable mapping from short identifiers to target URLs.
///
/// The store is eventually consistent: a `get` immediately after a `put` for
/// the same key is not guaranteed to observe the write. Callers must treat
/// the write acknowledgment alone as the success signal and never gate
/// success on a post-write read.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::RedisStore`] - Redis-backed production store
/// - [`crate::infrastructure::store::MemoryStore`] - In-process store for tests and development
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Best-effort read of the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend cannot be reached.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Unconditional upsert of `key` to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend cannot be reached.
    async fn put(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Writes `key` only if it is currently absent.
    ///
    /// Returns `true` when this call claimed the key, `false` when another
    /// writer already holds it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend cannot be reached.
    async fn put_if_absent(&self, key: &str, value: &str) -> StoreResult<bool>;

    /// Checks whether the store backend is reachable.
    ///
    /// Consumed by the health check endpoint.
    async fn health_check(&self) -> bool;
}
