//! Error types for the caching layer
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the store, the instrumented cache and the page cache.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CacheError {
    /// The backing store cannot be reached or has been shut down
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Stored bytes could not be interpreted by a decode function
    #[error("Decode error: {0}")]
    Decode(String),

    /// Remote fetch failed or returned a non-success status
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Replay was given a handle not bound to a live operation
    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    /// Key not found
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data, or an operation against the wrong kind of value
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            CacheError::Decode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CacheError::Fetch(_) => StatusCode::BAD_GATEWAY,
            CacheError::InvalidHandle(_) => StatusCode::NOT_FOUND,
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the caching layer.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        let cases = [
            (CacheError::StoreUnavailable("down".into()), StatusCode::SERVICE_UNAVAILABLE),
            (CacheError::Decode("bad".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (CacheError::Fetch("503".into()), StatusCode::BAD_GATEWAY),
            (CacheError::InvalidHandle("x".into()), StatusCode::NOT_FOUND),
            (CacheError::NotFound("k".into()), StatusCode::NOT_FOUND),
            (CacheError::InvalidRequest("r".into()), StatusCode::BAD_REQUEST),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_error_display() {
        let err = CacheError::Fetch("status 404".to_string());
        assert_eq!(err.to_string(), "Fetch error: status 404");
    }
}
