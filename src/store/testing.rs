//! Store doubles for tests.

use super::{CacheStore, MemoryStore, StoreError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// A store whose every operation fails, as if the connection were down.
pub struct UnavailableStore;

fn unavailable() -> StoreError {
    StoreError::Command("connection refused".to_string())
}

#[async_trait]
impl CacheStore for UnavailableStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(unavailable())
    }

    async fn set_ex(&self, _key: &str, _value: String, _ttl: Duration) -> Result<(), StoreError> {
        Err(unavailable())
    }

    async fn lpush(&self, _key: &str, _value: String) -> Result<u64, StoreError> {
        Err(unavailable())
    }

    async fn ltrim(&self, _key: &str, _start: i64, _stop: i64) -> Result<(), StoreError> {
        Err(unavailable())
    }

    async fn lrange(&self, _key: &str, _start: i64, _stop: i64) -> Result<Vec<String>, StoreError> {
        Err(unavailable())
    }
}

/// In-memory store that counts key writes.
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryStore,
    writes: AtomicUsize,
}

impl CountingStore {
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheStore for CountingStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key).await
    }

    async fn set_ex(&self, key: &str, value: String, ttl: Duration) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set_ex(key, value, ttl).await
    }

    async fn lpush(&self, key: &str, value: String) -> Result<u64, StoreError> {
        self.inner.lpush(key, value).await
    }

    async fn ltrim(&self, key: &str, start: i64, stop: i64) -> Result<(), StoreError> {
        self.inner.ltrim(key, start, stop).await
    }

    async fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>, StoreError> {
        self.inner.lrange(key, start, stop).await
    }
}
