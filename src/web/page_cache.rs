//! Expiring page cache with access counting.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{CacheError, Result};
use crate::store::{access_count_key, cached_body_key, KeyedStore};
use crate::web::PageFetcher;

/// Lifetime of a cached page body unless configured otherwise
pub const DEFAULT_PAGE_TTL: Duration = Duration::from_secs(10);

// == Page Cache ==
/// Caches fetched page bodies for a short TTL and counts every access.
pub struct PageCache {
    store: Arc<dyn KeyedStore>,
    fetcher: Arc<dyn PageFetcher>,
    ttl: Duration,
}

impl PageCache {
    pub fn new(store: Arc<dyn KeyedStore>, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            store,
            fetcher,
            ttl: DEFAULT_PAGE_TTL,
        }
    }

    /// Sets how long a fetched body stays cached. A zero TTL is ignored.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        if ttl.is_zero() {
            warn!("Page TTL must be greater than zero, keeping {:?}", self.ttl);
        } else {
            self.ttl = ttl;
        }
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Fetch Cached ==
    /// Returns the body of `url`, fetching it only if no live copy is cached.
    ///
    /// The access counter is incremented first, whether the call then hits,
    /// misses, or fails. Failed fetches are never cached.
    pub async fn fetch_cached(&self, url: &str) -> Result<String> {
        let accesses = self.store.increment(&access_count_key(url)).await?;

        let cached_key = cached_body_key(url);
        if let Some(bytes) = self.store.get(&cached_key).await? {
            debug!(url, accesses, "Page cache hit");
            return String::from_utf8(bytes)
                .map_err(|e| CacheError::Decode(format!("cached body is not UTF-8: {}", e)));
        }

        debug!(url, accesses, "Page cache miss");
        let response = self.fetcher.fetch(url).await.map_err(|error| {
            warn!(url, %error, "Fetch failed");
            error
        })?;

        if !response.is_success() {
            warn!(url, status = response.status, "Fetch returned non-success status");
            return Err(CacheError::Fetch(format!(
                "GET {} returned status {}",
                url, response.status
            )));
        }

        self.store
            .set_with_expiry(&cached_key, response.body.as_bytes(), self.ttl)
            .await?;
        Ok(response.body)
    }

    // == Access Count ==
    /// Number of times `url` has been requested through this cache.
    pub async fn access_count(&self, url: &str) -> Result<u64> {
        match self.store.get(&access_count_key(url)).await? {
            Some(bytes) => String::from_utf8_lossy(&bytes)
                .trim()
                .parse()
                .map_err(|_| CacheError::Decode(format!("access counter for {} is corrupt", url))),
            None => Ok(0),
        }
    }
}
