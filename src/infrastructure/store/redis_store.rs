//! Redis-backed key-value store implementation.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info};

use crate::domain::store::{KeyValueStore, StoreError, StoreResult};

/// Redis store for short link mappings.
///
/// Uses `ConnectionManager` for connection reuse and automatic reconnection.
/// This is the system of record, not a cache: operation failures are
/// surfaced to callers rather than swallowed.
pub struct RedisStore {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL is invalid, the
    /// connection cannot be established, or the PING health check fails.
    pub async fn connect(redis_url: &str) -> StoreResult<Self> {
        info!("Connecting to Redis at {}", redis_url);

        let client = Client::open(redis_url).map_err(|e| {
            StoreError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| StoreError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: "link:".to_string(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, identifier: &str) -> String {
        format!("{}{}", self.key_prefix, identifier)
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.client.clone();

        let value: Option<String> = conn
            .get(self.build_key(key))
            .await
            .map_err(|e| StoreError::Operation(format!("Redis GET failed for {}: {}", key, e)))?;

        debug!(key, hit = value.is_some(), "Store GET");
        Ok(value)
    }

    async fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut conn = self.client.clone();

        conn.set::<_, _, ()>(self.build_key(key), value)
            .await
            .map_err(|e| StoreError::Operation(format!("Redis SET failed for {}: {}", key, e)))?;

        debug!(key, "Store PUT");
        Ok(())
    }

    async fn put_if_absent(&self, key: &str, value: &str) -> StoreResult<bool> {
        let mut conn = self.client.clone();

        let claimed: bool = conn
            .set_nx(self.build_key(key), value)
            .await
            .map_err(|e| StoreError::Operation(format!("Redis SETNX failed for {}: {}", key, e)))?;

        debug!(key, claimed, "Store PUT-IF-ABSENT");
        Ok(claimed)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
