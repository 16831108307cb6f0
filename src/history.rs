use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{FetchError, ServiceError};
use crate::store::CacheStore;

/// List key holding the recent searches, newest first.
pub const HISTORY_KEY: &str = "search_history";
pub const HISTORY_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHistoryItem {
    pub city: String,
    pub country: String,
    pub timestamp: DateTime<Utc>,
}

/// Bounded most-recent-first log of current-weather lookups.
#[derive(Clone)]
pub struct SearchHistory {
    store: Arc<dyn CacheStore>,
}

impl SearchHistory {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Pushes a lookup to the head of the list and drops anything past the limit.
    pub async fn record(&self, city: &str, country: &str) -> Result<SearchHistoryItem, FetchError> {
        let item = SearchHistoryItem {
            city: city.to_string(),
            country: country.to_string(),
            timestamp: Utc::now(),
        };

        self.store
            .lpush(HISTORY_KEY, serde_json::to_string(&item)?)
            .await?;
        self.store
            .ltrim(HISTORY_KEY, 0, HISTORY_LIMIT as i64 - 1)
            .await?;

        Ok(item)
    }

    pub async fn recent(&self) -> Result<Vec<SearchHistoryItem>, FetchError> {
        let raw = self.store.lrange(HISTORY_KEY, 0, -1).await?;

        raw.iter()
            .map(|item| serde_json::from_str(item).map_err(FetchError::from))
            .collect()
    }

    pub async fn get_history(&self) -> Result<Vec<SearchHistoryItem>, ServiceError> {
        self.recent().await.map_err(ServiceError::History)
    }
}
