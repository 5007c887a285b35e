//! API Module
//!
//! HTTP handlers and routing for the cache server REST API.
//!
//! # Endpoints
//! - `POST /store` - Store a value under a fresh key
//! - `GET /retrieve/:key` - Retrieve a value by key
//! - `GET /replay/:operation` - Recorded call log of an operation
//! - `GET /page?url=` - Fetch a page through the expiring cache
//! - `GET /stats` - Get store statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
