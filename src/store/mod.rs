//! Key/value + list storage consumed by the weather proxy.
//!
//! The operations mirror the handful of Redis commands the service needs
//! (`GET`, `SET .. EX`, `LPUSH`, `LTRIM`, `LRANGE`) so that a hosted Redis and
//! the in-process store are interchangeable behind [`CacheStore`].

pub mod memory;
pub mod upstash;

#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;
use std::ops::Range;
use std::time::Duration;
use thiserror::Error;

pub use memory::MemoryStore;
pub use upstash::UpstashStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Store error: {0}")]
    Command(String),
    #[error("Unexpected reply to {command}: {reply}")]
    UnexpectedReply {
        command: &'static str,
        reply: String,
    },
}

#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value, expiring after `ttl`.
    async fn set_ex(&self, key: &str, value: String, ttl: Duration) -> Result<(), StoreError>;

    /// Prepends `value` to the list at `key` and returns the new length.
    async fn lpush(&self, key: &str, value: String) -> Result<u64, StoreError>;

    /// Keeps only the inclusive index range `start..=stop` of the list at `key`.
    async fn ltrim(&self, key: &str, start: i64, stop: i64) -> Result<(), StoreError>;

    /// Returns the inclusive index range `start..=stop` of the list at `key`.
    async fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>, StoreError>;
}

/// Maps Redis-style inclusive indices (negative values count from the tail)
/// onto a list of `len` items. `None` means the range selects nothing.
pub(crate) fn resolve_range(len: usize, start: i64, stop: i64) -> Option<Range<usize>> {
    let len = len as i64;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };

    if start > stop || start >= len {
        return None;
    }
    Some(start as usize..stop as usize + 1)
}
