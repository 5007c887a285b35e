//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::cache::{Cache, StoredValue};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    HealthResponse, PageQuery, PageResponse, ReplayResponse, RetrieveFormat, RetrieveQuery,
    RetrieveResponse, StatsResponse, StoreRequest, StoreResponse,
};
use crate::replay::replay;
use crate::store::MemoryStore;
use crate::web::{HttpFetcher, PageCache, PageFetcher};

/// Application state shared across all handlers.
///
/// The cache and the page cache share one store.
#[derive(Clone)]
pub struct AppState {
    /// Backing store, kept concretely for stats and cleanup
    pub store: Arc<MemoryStore>,
    /// Instrumented key-value cache
    pub cache: Arc<Cache>,
    /// Expiring page cache
    pub pages: Arc<PageCache>,
}

impl AppState {
    /// Creates a new AppState over `store`, resetting its keyspace.
    pub async fn new(
        store: Arc<MemoryStore>,
        fetcher: Arc<dyn PageFetcher>,
        page_ttl: std::time::Duration,
    ) -> Result<Self> {
        let cache = Cache::new(store.clone()).await?;
        let pages = PageCache::new(store.clone(), fetcher).with_ttl(page_ttl);

        Ok(Self {
            store,
            cache: Arc::new(cache),
            pages: Arc::new(pages),
        })
    }

    /// Creates a new AppState from configuration, fetching pages over HTTP.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let fetcher = HttpFetcher::new(config.fetch_timeout())?;
        Self::new(
            Arc::new(MemoryStore::new()),
            Arc::new(fetcher),
            config.page_ttl(),
        )
        .await
    }
}

/// Handler for POST /store
///
/// Stores a value under a fresh key and returns the key.
pub async fn store_handler(
    State(state): State<AppState>,
    Json(req): Json<StoreRequest>,
) -> Result<Json<StoreResponse>> {
    let key = state.cache.store(req.value).await?;
    Ok(Json(StoreResponse::new(key)))
}

/// Handler for GET /retrieve/:key
///
/// Retrieves a value by key, decoded as requested by `?as=`.
pub async fn retrieve_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<RetrieveQuery>,
) -> Result<Json<RetrieveResponse>> {
    let cache = &state.cache;
    let value = match query.format {
        RetrieveFormat::Text => cache.retrieve_as_text(&key).await?.map(StoredValue::Text),
        RetrieveFormat::Bytes => cache.retrieve(&key).await?.map(StoredValue::Bytes),
        RetrieveFormat::Integer => cache.retrieve_as_integer(&key).await?.map(StoredValue::Integer),
        RetrieveFormat::Float => cache.retrieve_as_float(&key).await?.map(StoredValue::Float),
    };

    match value {
        Some(value) => Ok(Json(RetrieveResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for GET /replay/:operation
///
/// Returns the recorded call log of an instrumented operation.
pub async fn replay_handler(
    State(state): State<AppState>,
    Path(operation): Path<String>,
) -> Result<Json<ReplayResponse>> {
    let handle = state
        .cache
        .handle(&operation)
        .ok_or_else(|| CacheError::InvalidHandle(format!("unknown operation {:?}", operation)))?;

    let log = replay(&handle)
        .await?
        .ok_or_else(|| CacheError::InvalidHandle(format!("cannot replay {:?}", operation)))?;

    Ok(Json(ReplayResponse::from(log)))
}

/// Handler for GET /page?url=...
///
/// Returns the page body through the expiring cache.
pub async fn page_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageResponse>> {
    if let Some(error_msg) = query.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let body = state.pages.fetch_cached(&query.url).await?;
    let access_count = state.pages.access_count(&query.url).await?;

    Ok(Json(PageResponse {
        url: query.url,
        body,
        access_count,
    }))
}

/// Handler for GET /stats
///
/// Returns current store statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.store.stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
