//! Web Module
//!
//! Expiring cache in front of a remote page fetcher.

mod fetcher;
mod page_cache;

pub use fetcher::{FetchResponse, HttpFetcher, PageFetcher};
pub use page_cache::{PageCache, DEFAULT_PAGE_TTL};
