//! Identifier allocation and resolution service.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info};

use crate::domain::entities::{Allocation, IdentifierKind};
use crate::domain::store::KeyValueStore;
use crate::error::AppError;
use crate::utils::identifier::{generate_identifier, validate_custom_identifier};

/// Path segments that are never treated as short identifiers.
///
/// Browsers request these on their own; resolving them against the store
/// would only produce pointless lookups.
const RESERVED_PATHS: &[&str] = &["favicon.ico"];

/// Service that maps short identifiers to target URLs.
///
/// The registry holds no mutable state of its own; it is a policy layer over
/// an external [`KeyValueStore`] and applies validation and allocation rules
/// before every write. Each invocation is independent and may run
/// concurrently with any other.
pub struct LinkRegistry {
    store: Arc<dyn KeyValueStore>,
    base_url: String,
    max_attempts: usize,
}

impl LinkRegistry {
    /// Creates a new registry over the given store.
    ///
    /// # Arguments
    ///
    /// - `store` - The external key-value store holding the mappings
    /// - `base_url` - Public base URL (`scheme://host`) used to assemble
    ///   fully-qualified short links; a trailing slash is tolerated
    /// - `max_attempts` - Upper bound on random-identifier claim attempts
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        base_url: impl Into<String>,
        max_attempts: usize,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            store,
            base_url,
            max_attempts,
        }
    }

    /// Allocates a short identifier for `long_url`.
    ///
    /// When `custom_id` holds a non-empty value after trimming, it is
    /// validated and claimed as-is; otherwise a random identifier is
    /// generated and claimed, regenerating on collision up to the configured
    /// attempt bound.
    ///
    /// Claims go through [`KeyValueStore::put_if_absent`], so two concurrent
    /// callers can never silently overwrite each other's mapping. The store
    /// is eventually consistent; success is decided by the write
    /// acknowledgment alone and no post-write read is performed.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] when `long_url` is not an http(s) URL
    /// - [`AppError::InvalidIdentifier`] when `custom_id` fails the format rule
    /// - [`AppError::IdentifierTaken`] when the custom identifier is occupied
    /// - [`AppError::AllocationExhausted`] when random generation keeps colliding
    /// - [`AppError::StoreUnavailable`] when the store itself fails
    pub async fn allocate(
        &self,
        long_url: &str,
        custom_id: Option<&str>,
    ) -> Result<Allocation, AppError> {
        if !is_http_url(long_url) {
            return Err(AppError::invalid_url(
                "Target URL must start with http:// or https://",
                json!({ "url": long_url }),
            ));
        }

        let custom = match custom_id {
            Some(raw) => validate_custom_identifier(raw)?,
            None => None,
        };

        match custom {
            Some(identifier) => self.allocate_custom(identifier, long_url).await,
            None => self.allocate_random(long_url).await,
        }
    }

    /// Resolves a short identifier to its target URL.
    ///
    /// Empty candidates and reserved request paths are rejected without
    /// touching the store. Resolution never mutates anything and is safe to
    /// retry and to run concurrently with allocation.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] when no mapping exists
    /// - [`AppError::StoreUnavailable`] when the store fails
    pub async fn resolve(&self, identifier: &str) -> Result<String, AppError> {
        if identifier.is_empty() || RESERVED_PATHS.contains(&identifier) {
            return Err(not_found(identifier));
        }

        self.store
            .get(identifier)
            .await?
            .ok_or_else(|| not_found(identifier))
    }

    /// Constructs the fully-qualified short link for an identifier.
    pub fn short_url(&self, identifier: &str) -> String {
        format!("{}/{}", self.base_url, identifier)
    }

    async fn allocate_custom(
        &self,
        identifier: String,
        long_url: &str,
    ) -> Result<Allocation, AppError> {
        if self.store.get(&identifier).await?.is_some() {
            return Err(taken(&identifier));
        }

        // The lookup above and this write are not atomic; the conditional
        // write is the actual claim.
        if !self.store.put_if_absent(&identifier, long_url).await? {
            return Err(taken(&identifier));
        }

        info!(identifier = %identifier, kind = "custom", "Allocated short link");

        Ok(self.allocation(identifier, IdentifierKind::Custom))
    }

    async fn allocate_random(&self, long_url: &str) -> Result<Allocation, AppError> {
        for attempt in 1..=self.max_attempts {
            let identifier = generate_identifier();

            if self.store.put_if_absent(&identifier, long_url).await? {
                info!(identifier = %identifier, kind = "random", "Allocated short link");
                return Ok(self.allocation(identifier, IdentifierKind::Random));
            }

            debug!(attempt, "Random identifier collided, regenerating");
        }

        Err(AppError::allocation_exhausted(
            "Failed to allocate a random identifier",
            json!({ "attempts": self.max_attempts }),
        ))
    }

    fn allocation(&self, identifier: String, kind: IdentifierKind) -> Allocation {
        let short_link = self.short_url(&identifier);

        Allocation {
            identifier,
            short_link,
            kind,
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn taken(identifier: &str) -> AppError {
    AppError::identifier_taken(
        "This identifier is already in use",
        json!({ "identifier": identifier }),
    )
}

fn not_found(identifier: &str) -> AppError {
    AppError::not_found("Short link not found", json!({ "identifier": identifier }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::store::{MockKeyValueStore, StoreError};
    use crate::utils::identifier::{RANDOM_IDENTIFIER_LEN, SAFE_ALPHABET};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn registry(mock: MockKeyValueStore) -> LinkRegistry {
        LinkRegistry::new(Arc::new(mock), "https://sho.rt", 10)
    }

    #[tokio::test]
    async fn test_allocate_custom_success() {
        let mut mock = MockKeyValueStore::new();

        mock.expect_get()
            .withf(|key| key == "my-link")
            .times(1)
            .returning(|_| Ok(None));

        mock.expect_put_if_absent()
            .withf(|key, value| key == "my-link" && value == "https://example.com/a/b")
            .times(1)
            .returning(|_, _| Ok(true));

        let result = registry(mock)
            .allocate("https://example.com/a/b", Some("my-link"))
            .await
            .unwrap();

        assert_eq!(result.identifier, "my-link");
        assert_eq!(result.short_link, "https://sho.rt/my-link");
        assert_eq!(result.kind, IdentifierKind::Custom);
    }

    #[tokio::test]
    async fn test_allocate_custom_trims_whitespace() {
        let mut mock = MockKeyValueStore::new();

        mock.expect_get()
            .withf(|key| key == "my-link")
            .times(1)
            .returning(|_| Ok(None));

        mock.expect_put_if_absent()
            .withf(|key, _| key == "my-link")
            .times(1)
            .returning(|_, _| Ok(true));

        let result = registry(mock)
            .allocate("https://example.com", Some("  my-link  "))
            .await
            .unwrap();

        assert_eq!(result.identifier, "my-link");
    }

    #[tokio::test]
    async fn test_allocate_custom_taken_on_lookup() {
        let mut mock = MockKeyValueStore::new();

        mock.expect_get()
            .withf(|key| key == "taken")
            .times(1)
            .returning(|_| Ok(Some("https://other.com".to_string())));

        mock.expect_put_if_absent().times(0);

        let result = registry(mock)
            .allocate("https://example.com", Some("taken"))
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::IdentifierTaken { .. }
        ));
    }

    #[tokio::test]
    async fn test_allocate_custom_taken_on_lost_race() {
        let mut mock = MockKeyValueStore::new();

        mock.expect_get().times(1).returning(|_| Ok(None));

        mock.expect_put_if_absent()
            .times(1)
            .returning(|_, _| Ok(false));

        let result = registry(mock)
            .allocate("https://example.com", Some("raced"))
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::IdentifierTaken { .. }
        ));
    }

    #[tokio::test]
    async fn test_allocate_custom_invalid_format_no_store_access() {
        // No expectations configured: any store call would panic.
        let mock = MockKeyValueStore::new();

        let result = registry(mock).allocate("https://x.com", Some("ab")).await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::InvalidIdentifier { .. }
        ));
    }

    #[tokio::test]
    async fn test_allocate_whitespace_custom_falls_through_to_random() {
        let mut mock = MockKeyValueStore::new();

        mock.expect_put_if_absent()
            .times(1)
            .returning(|_, _| Ok(true));

        let result = registry(mock)
            .allocate("https://example.com", Some("   "))
            .await
            .unwrap();

        assert_eq!(result.kind, IdentifierKind::Random);
        assert_eq!(result.identifier.len(), RANDOM_IDENTIFIER_LEN);
    }

    #[tokio::test]
    async fn test_allocate_invalid_url_no_store_access() {
        for url in ["", "ftp://x.com", "example.com", "httpx://y.com"] {
            let mock = MockKeyValueStore::new();

            let result = registry(mock).allocate(url, Some("my-link")).await;

            assert!(
                matches!(result.unwrap_err(), AppError::InvalidUrl { .. }),
                "'{}' should be rejected",
                url
            );
        }
    }

    #[tokio::test]
    async fn test_allocate_random_success() {
        let mut mock = MockKeyValueStore::new();

        mock.expect_put_if_absent()
            .withf(|key, value| {
                key.len() == RANDOM_IDENTIFIER_LEN
                    && key.bytes().all(|b| SAFE_ALPHABET.contains(&b))
                    && value == "https://example.com"
            })
            .times(1)
            .returning(|_, _| Ok(true));

        let result = registry(mock)
            .allocate("https://example.com", None)
            .await
            .unwrap();

        assert_eq!(result.kind, IdentifierKind::Random);
        assert_eq!(
            result.short_link,
            format!("https://sho.rt/{}", result.identifier)
        );
    }

    #[tokio::test]
    async fn test_allocate_random_retries_on_collision() {
        let mut mock = MockKeyValueStore::new();

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        mock.expect_put_if_absent()
            .times(3)
            .returning(move |_, _| Ok(counter.fetch_add(1, Ordering::SeqCst) >= 2));

        let result = registry(mock)
            .allocate("https://example.com", None)
            .await
            .unwrap();

        assert_eq!(result.kind, IdentifierKind::Random);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_allocate_random_exhausted_after_max_attempts() {
        let mut mock = MockKeyValueStore::new();

        mock.expect_put_if_absent()
            .times(10)
            .returning(|_, _| Ok(false));

        let result = registry(mock).allocate("https://example.com", None).await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::AllocationExhausted { .. }
        ));
    }

    #[tokio::test]
    async fn test_allocate_store_failure_surfaces() {
        let mut mock = MockKeyValueStore::new();

        mock.expect_get()
            .times(1)
            .returning(|_| Err(StoreError::Operation("boom".to_string())));

        let result = registry(mock)
            .allocate("https://example.com", Some("my-link"))
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::StoreUnavailable { .. }
        ));
    }

    #[tokio::test]
    async fn test_resolve_success() {
        let mut mock = MockKeyValueStore::new();

        mock.expect_get()
            .withf(|key| key == "my-link")
            .times(1)
            .returning(|_| Ok(Some("https://example.com/a/b".to_string())));

        let url = registry(mock).resolve("my-link").await.unwrap();
        assert_eq!(url, "https://example.com/a/b");
    }

    #[tokio::test]
    async fn test_resolve_miss() {
        let mut mock = MockKeyValueStore::new();

        mock.expect_get().times(1).returning(|_| Ok(None));

        let result = registry(mock).resolve("never-created").await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_empty_skips_store() {
        let mock = MockKeyValueStore::new();

        let result = registry(mock).resolve("").await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_reserved_path_skips_store() {
        let mock = MockKeyValueStore::new();

        let result = registry(mock).resolve("favicon.ico").await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_store_failure_surfaces() {
        let mut mock = MockKeyValueStore::new();

        mock.expect_get()
            .times(1)
            .returning(|_| Err(StoreError::Connection("down".to_string())));

        let result = registry(mock).resolve("my-link").await;
        assert!(matches!(
            result.unwrap_err(),
            AppError::StoreUnavailable { .. }
        ));
    }

    #[test]
    fn test_short_url_trims_trailing_slash() {
        let registry = LinkRegistry::new(Arc::new(MockKeyValueStore::new()), "https://sho.rt/", 10);

        assert_eq!(registry.short_url("abcd"), "https://sho.rt/abcd");
    }
}
