//! Memory Store Module
//!
//! In-process keyed store with Redis semantics: byte strings, integer counters
//! kept as decimal text, append-only lists and lazy TTL expiration.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{CacheError, Result};
use crate::store::{EntryData, KeyedStore, StoreEntry, StoreStats};

const WRONG_KIND: &str = "operation against a key holding the wrong kind of value";

// == Memory Store ==
/// Keyed store held in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    /// Set once the store has been shut down
    closed: AtomicBool,
}

#[derive(Debug, Default)]
struct Inner {
    /// Key-value storage
    entries: HashMap<String, StoreEntry>,
    /// Performance statistics
    stats: StoreStats,
}

impl Inner {
    /// Drops `key` if its TTL has elapsed, so later lookups see it as absent.
    fn purge_if_expired(&mut self, key: &str) {
        if self.entries.get(key).is_some_and(StoreEntry::is_expired) {
            self.entries.remove(key);
            self.stats.record_expirations(1);
            debug!(key, "Expired entry removed on access");
        }
    }

    fn live(&mut self, key: &str) -> Option<&mut StoreEntry> {
        self.purge_if_expired(key);
        self.entries.get_mut(key)
    }
}

impl MemoryStore {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(CacheError::StoreUnavailable(
                "memory store has been shut down".to_string(),
            ));
        }
        Ok(())
    }

    // == Shutdown ==
    /// Closes the store. Every later call fails with `StoreUnavailable`.
    pub fn shutdown(&self) {
        self.closed.store(true, Ordering::Release);
    }

    // == Stats ==
    /// Returns current store statistics.
    pub async fn stats(&self) -> StoreStats {
        let inner = self.inner.read().await;
        let mut stats = inner.stats.clone();
        stats.set_total_keys(inner.entries.len());
        stats
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub async fn cleanup_expired(&self) -> usize {
        let mut inner = self.inner.write().await;
        let before = inner.entries.len();
        inner.entries.retain(|_, entry| !entry.is_expired());

        let removed = before - inner.entries.len();
        inner.stats.record_expirations(removed);
        let total = inner.entries.len();
        inner.stats.set_total_keys(total);
        removed
    }

    // == Length ==
    /// Returns the number of keys currently held, expired or not.
    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.entries.is_empty()
    }
}

#[async_trait]
impl KeyedStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.ensure_open()?;
        let mut inner = self.inner.write().await;

        let value = match inner.live(key).map(|entry| &entry.data) {
            Some(EntryData::Bytes(bytes)) => Some(bytes.clone()),
            Some(EntryData::List(_)) => {
                return Err(CacheError::InvalidRequest(WRONG_KIND.to_string()))
            }
            None => None,
        };

        if value.is_some() {
            inner.stats.record_hit();
        } else {
            inner.stats.record_miss();
        }
        Ok(value)
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.ensure_open()?;
        let mut inner = self.inner.write().await;
        inner
            .entries
            .insert(key.to_string(), StoreEntry::bytes(value.to_vec()));
        Ok(())
    }

    async fn increment(&self, key: &str) -> Result<i64> {
        self.ensure_open()?;
        let mut inner = self.inner.write().await;
        inner.purge_if_expired(key);

        let entry = inner
            .entries
            .entry(key.to_string())
            .or_insert_with(|| StoreEntry::bytes(b"0".to_vec()));

        let EntryData::Bytes(bytes) = &mut entry.data else {
            return Err(CacheError::InvalidRequest(WRONG_KIND.to_string()));
        };

        let next = std::str::from_utf8(bytes.as_slice())
            .ok()
            .and_then(|text| text.parse::<i64>().ok())
            .ok_or_else(|| {
                CacheError::InvalidRequest("value is not an integer".to_string())
            })?
            .checked_add(1)
            .ok_or_else(|| {
                CacheError::InvalidRequest("increment would overflow".to_string())
            })?;

        *bytes = next.to_string().into_bytes();
        Ok(next)
    }

    async fn append_to_list(&self, key: &str, value: &[u8]) -> Result<()> {
        self.ensure_open()?;
        let mut inner = self.inner.write().await;
        inner.purge_if_expired(key);

        let entry = inner
            .entries
            .entry(key.to_string())
            .or_insert_with(StoreEntry::list);

        match &mut entry.data {
            EntryData::List(items) => {
                items.push(value.to_vec());
                Ok(())
            }
            EntryData::Bytes(_) => Err(CacheError::InvalidRequest(WRONG_KIND.to_string())),
        }
    }

    async fn range_list(&self, key: &str, start: isize, end: isize) -> Result<Vec<Vec<u8>>> {
        self.ensure_open()?;
        let mut inner = self.inner.write().await;

        match inner.live(key).map(|entry| &entry.data) {
            Some(EntryData::List(items)) => Ok(match range_bounds(items.len(), start, end) {
                Some((from, to)) => items[from..=to].to_vec(),
                None => Vec::new(),
            }),
            Some(EntryData::Bytes(_)) => Err(CacheError::InvalidRequest(WRONG_KIND.to_string())),
            None => Ok(Vec::new()),
        }
    }

    async fn set_with_expiry(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()> {
        self.ensure_open()?;
        if ttl.is_zero() {
            return Err(CacheError::InvalidRequest(
                "expiry must be greater than zero".to_string(),
            ));
        }

        let mut inner = self.inner.write().await;
        inner.entries.insert(
            key.to_string(),
            StoreEntry::new(EntryData::Bytes(value.to_vec()), Some(ttl)),
        );
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        self.ensure_open()?;
        let mut inner = self.inner.write().await;
        Ok(inner.live(key).is_some())
    }

    async fn reset_all(&self) -> Result<()> {
        self.ensure_open()?;
        let mut inner = self.inner.write().await;
        let removed = inner.entries.len();
        inner.entries.clear();
        inner.stats.set_total_keys(0);
        debug!(removed, "Store keyspace reset");
        Ok(())
    }
}

/// Resolves a Redis-style inclusive range against a list of `len` items.
///
/// Returns `None` when the range selects nothing.
fn range_bounds(len: usize, start: isize, end: isize) -> Option<(usize, usize)> {
    let len = len as isize;
    let resolve = |index: isize| if index < 0 { len + index } else { index };

    let from = resolve(start).max(0);
    let to = resolve(end).min(len - 1);

    if len == 0 || from > to || from >= len {
        None
    } else {
        Some((from as usize, to as usize))
    }
}
