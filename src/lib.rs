//! Mini Cache - A lightweight caching layer with call instrumentation
//!
//! Stores values under random keys, counts and records every `store` call,
//! replays the recorded call log, and caches remote pages for a short TTL.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod instrument;
pub mod models;
pub mod replay;
pub mod store;
pub mod tasks;
pub mod web;

pub use api::AppState;
pub use cache::{Cache, StoreKey, StoredValue};
pub use config::Config;
pub use error::{CacheError, Result};
pub use replay::{print_replay, replay, CallLog, OperationHandle};
pub use store::{KeyedStore, MemoryStore};
pub use tasks::spawn_cleanup_task;
pub use web::{HttpFetcher, PageCache, PageFetcher};
