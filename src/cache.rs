use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::error::FetchError;
use crate::store::CacheStore;

/// Lifetime of every cached upstream response.
pub const CACHE_TTL: Duration = Duration::from_secs(600);

/// Memoizes async producers in a [`CacheStore`] with a fixed TTL.
///
/// Values cross the store boundary as JSON. Concurrent misses on the same key
/// are not coalesced: each caller runs its own producer and the last write wins.
#[derive(Clone)]
pub struct CachedFetcher {
    store: Arc<dyn CacheStore>,
    ttl: Duration,
}

impl CachedFetcher {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self::with_ttl(store, CACHE_TTL)
    }

    pub fn with_ttl(store: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Returns the cached value for `key`, or runs `producer` and caches what
    /// it yields. A failing producer leaves the key untouched.
    pub async fn get_or_compute<T, F, Fut>(&self, key: &str, producer: F) -> Result<T, FetchError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        if key.is_empty() {
            return Err(FetchError::EmptyKey);
        }

        if let Some(cached) = self.store.get(key).await? {
            tracing::debug!("Cache hit for {}", key);
            return Ok(serde_json::from_str(&cached)?);
        }

        tracing::debug!("Cache miss for {}", key);
        let fresh = producer().await?;
        let serialized = serde_json::to_string(&fresh)?;
        self.store.set_ex(key, serialized, self.ttl).await?;

        Ok(fresh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::{CountingStore, UnavailableStore};
    use crate::store::{MemoryStore, StoreError};
    use crate::weather::WeatherbitError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_miss_runs_producer_and_writes_once() {
        let store = Arc::new(CountingStore::default());
        let fetcher = CachedFetcher::new(store.clone());
        let calls = &AtomicUsize::new(0);

        let value: Vec<u32> = fetcher
            .get_or_compute("numbers", || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(vec![1, 2, 3])
            })
            .await
            .unwrap();

        assert_eq!(value, vec![1, 2, 3]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.writes(), 1);
        assert_eq!(
            store.get("numbers").await.unwrap().as_deref(),
            Some("[1,2,3]")
        );
    }

    #[tokio::test]
    async fn test_hit_skips_producer_and_writes_nothing() {
        let store = Arc::new(CountingStore::default());
        let fetcher = CachedFetcher::new(store.clone());
        let calls = &AtomicUsize::new(0);

        for _ in 0..3 {
            let value: String = fetcher
                .get_or_compute("greeting", || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok("hello".to_string())
                })
                .await
                .unwrap();
            assert_eq!(value, "hello");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.writes(), 1);
    }

    #[tokio::test]
    async fn test_expired_entry_is_recomputed() {
        let store = Arc::new(MemoryStore::default());
        let fetcher = CachedFetcher::with_ttl(store, Duration::from_millis(50));
        let calls = &AtomicUsize::new(0);
        let produce = || async move {
            Ok::<_, FetchError>(calls.fetch_add(1, Ordering::SeqCst))
        };

        let first: usize = fetcher.get_or_compute("k", produce).await.unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;
        let second: usize = fetcher.get_or_compute("k", produce).await.unwrap();

        assert_eq!(first, 0);
        assert_eq!(second, 1);
    }

    #[tokio::test]
    async fn test_producer_error_leaves_key_unset() {
        let store = Arc::new(CountingStore::default());
        let fetcher = CachedFetcher::new(store.clone());

        let result: Result<String, _> = fetcher
            .get_or_compute("broken", || async move {
                Err(WeatherbitError::ApiError("HTTP 500".to_string()).into())
            })
            .await;

        assert!(matches!(result, Err(FetchError::Upstream(_))));
        assert_eq!(store.writes(), 0);
        assert_eq!(store.get("broken").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let fetcher = CachedFetcher::new(Arc::new(UnavailableStore));
        let calls = &AtomicUsize::new(0);

        let result: Result<u32, _> = fetcher
            .get_or_compute("k", || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(1)
            })
            .await;

        assert!(matches!(result, Err(FetchError::Store(StoreError::Command(_)))));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_corrupt_cached_value() {
        let store = Arc::new(MemoryStore::default());
        store
            .set_ex("k", "not json".to_string(), CACHE_TTL)
            .await
            .unwrap();
        let fetcher = CachedFetcher::new(store);

        let result: Result<Vec<u32>, _> = fetcher.get_or_compute("k", || async { Ok(vec![]) }).await;
        assert!(matches!(result, Err(FetchError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_empty_key_rejected() {
        let fetcher = CachedFetcher::new(Arc::new(MemoryStore::default()));
        let result: Result<u32, _> = fetcher.get_or_compute("", || async { Ok(1) }).await;
        assert!(matches!(result, Err(FetchError::EmptyKey)));
    }
}
