//! Store Module
//!
//! The keyed store abstraction every other component persists through, plus
//! the in-memory backend with Redis semantics.

mod entry;
mod memory;
mod stats;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

pub use entry::{current_timestamp_ms, EntryData, StoreEntry};
pub use memory::MemoryStore;
pub use stats::StoreStats;

// == Keyed Store Trait ==
/// Thin adapter over a networked key-value store.
///
/// Every method is atomic for the single key it touches; nothing here spans
/// keys. Backends report connection failures as
/// [`CacheError::StoreUnavailable`](crate::error::CacheError::StoreUnavailable)
/// and never retry.
#[async_trait]
pub trait KeyedStore: Send + Sync {
    /// Returns the bytes stored under `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing any previous value and expiry.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Atomically increments the integer under `key` and returns the new value.
    ///
    /// An absent key starts at 0, so the first call returns 1.
    async fn increment(&self, key: &str) -> Result<i64>;

    /// Appends `value` to the tail of the list under `key`, creating it if needed.
    async fn append_to_list(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Returns the inclusive range `start..=end` of the list under `key`.
    ///
    /// Negative indices count from the tail, so `(0, -1)` reads the whole list.
    async fn range_list(&self, key: &str, start: isize, end: isize) -> Result<Vec<Vec<u8>>>;

    /// Stores `value` under `key` and expires it after `ttl`.
    async fn set_with_expiry(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()>;

    /// Returns true if `key` holds a live value.
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Removes every key. Returns once the keyspace is empty.
    async fn reset_all(&self) -> Result<()>;
}

// == Derived Keys ==
/// Key of the call counter for an operation.
pub fn counter_key(operation: &str) -> String {
    operation.to_string()
}

/// Key of the recorded input list for an operation.
pub fn inputs_key(operation: &str) -> String {
    format!("{}:inputs", operation)
}

/// Key of the recorded output list for an operation.
pub fn outputs_key(operation: &str) -> String {
    format!("{}:outputs", operation)
}

/// Key of the access counter for a remote resource.
pub fn access_count_key(resource: &str) -> String {
    format!("count:{}", resource)
}

/// Key of the cached body for a remote resource.
pub fn cached_body_key(resource: &str) -> String {
    format!("cached:{}", resource)
}
