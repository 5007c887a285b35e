//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{StoreKey, StoredValue};
use crate::replay::{CallLog, CallRecord};
use crate::store::StoreStats;

/// Response body for the STORE operation (POST /store)
#[derive(Debug, Clone, Serialize)]
pub struct StoreResponse {
    /// The freshly issued key
    pub key: StoreKey,
}

impl StoreResponse {
    pub fn new(key: StoreKey) -> Self {
        Self { key }
    }
}

/// Response body for the RETRIEVE operation (GET /retrieve/:key)
#[derive(Debug, Clone, Serialize)]
pub struct RetrieveResponse {
    /// The requested key
    pub key: String,
    /// The decoded value
    pub value: StoredValue,
}

impl RetrieveResponse {
    pub fn new(key: impl Into<String>, value: StoredValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for the replay endpoint (GET /replay/:operation)
#[derive(Debug, Clone, Serialize)]
pub struct ReplayResponse {
    pub operation: String,
    pub count: i64,
    pub calls: Vec<CallRecord>,
    /// Rendered call log, header first
    pub lines: Vec<String>,
}

impl From<CallLog> for ReplayResponse {
    fn from(log: CallLog) -> Self {
        let mut lines = vec![log.header()];
        lines.extend(log.lines());
        Self {
            operation: log.operation,
            count: log.count,
            calls: log.calls,
            lines,
        }
    }
}

/// Response body for the page endpoint (GET /page)
#[derive(Debug, Clone, Serialize)]
pub struct PageResponse {
    pub url: String,
    pub body: String,
    /// Accesses of this URL so far, including this one
    pub access_count: u64,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of reads that found a value
    pub hits: u64,
    /// Number of reads that found nothing
    pub misses: u64,
    /// Number of entries removed by expiry
    pub expirations: u64,
    /// Current number of keys in the store
    pub total_keys: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<StoreStats> for StatsResponse {
    fn from(stats: StoreStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            expirations: stats.expirations,
            total_keys: stats.total_keys,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retrieve_response_serialize() {
        let resp = RetrieveResponse::new("k", StoredValue::Integer(7));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["key"], "k");
        assert_eq!(json["value"]["type"], "integer");
        assert_eq!(json["value"]["value"], 7);
    }

    #[test]
    fn test_replay_response_from_log() {
        let log = CallLog {
            operation: "store".to_string(),
            count: 1,
            calls: vec![CallRecord {
                input: "(\"a\",)".to_string(),
                output: "key-1".to_string(),
            }],
        };

        let resp = ReplayResponse::from(log);
        assert_eq!(
            resp.lines,
            vec![
                "store was called 1 times:".to_string(),
                "store(*(\"a\",)) -> key-1".to_string()
            ]
        );
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let stats = StoreStats {
            hits: 80,
            misses: 20,
            expirations: 5,
            total_keys: 100,
        };
        let resp = StatsResponse::from(stats);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.total_keys, 100);
    }

    #[test]
    fn test_stats_response_zero_requests() {
        let resp = StatsResponse::from(StoreStats::default());
        assert_eq!(resp.hit_rate, 0.0);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
