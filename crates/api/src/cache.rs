//! In-memory lookup cache keyed by lowercased wallet address.

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;

use era_common::error::AppError;
use era_common::types::AirdropData;

struct CacheEntry {
    stored_at: DateTime<Utc>,
    data: AirdropData,
}

/// Lookup results with a fixed time-to-live.
///
/// Expired entries are not evicted; they stay until overwritten by a fresh lookup.
pub struct AirdropCache {
    ttl_hours: u64,
    ttl: TimeDelta,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl AirdropCache {
    /// Fails when `ttl_hours` does not fit a [`TimeDelta`].
    pub fn new(ttl_hours: u64) -> Result<Self, AppError> {
        let ttl = i64::try_from(ttl_hours)
            .ok()
            .and_then(TimeDelta::try_hours)
            .ok_or_else(|| {
                AppError::Config(format!("Cache TTL of {ttl_hours} hours is out of range"))
            })?;

        Ok(Self {
            ttl_hours,
            ttl,
            entries: RwLock::new(HashMap::new()),
        })
    }

    pub fn ttl_hours(&self) -> u64 {
        self.ttl_hours
    }

    /// Fresh entry for `key` as of `now`, if any.
    pub async fn get(&self, key: &str, now: DateTime<Utc>) -> Option<AirdropData> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| now - entry.stored_at < self.ttl)
            .map(|entry| entry.data.clone())
    }

    pub async fn insert(&self, key: String, data: AirdropData, now: DateTime<Utc>) {
        self.entries.write().await.insert(
            key,
            CacheEntry {
                stored_at: now,
                data,
            },
        );
    }

    /// Number of stored entries, fresh or not.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
