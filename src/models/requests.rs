//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::cache::StoredValue;

/// Request body for the STORE operation (POST /store)
///
/// ```json
/// {"value": {"type": "integer", "value": 42}}
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct StoreRequest {
    /// The value to store under a fresh key
    pub value: StoredValue,
}

/// How a retrieved value should be decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetrieveFormat {
    #[default]
    Text,
    Bytes,
    Integer,
    Float,
}

/// Query string of GET /retrieve/:key
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RetrieveQuery {
    /// Decoding to apply (default: text)
    #[serde(default, rename = "as")]
    pub format: RetrieveFormat,
}

/// Query string of GET /page
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    /// URL of the page to fetch through the cache
    pub url: String,
}

impl PageQuery {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.url.trim().is_empty() {
            return Some("URL cannot be empty".to_string());
        }
        None
    }
}
