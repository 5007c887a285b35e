//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

use tracing::warn;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Lifetime in seconds of a cached page body
    pub page_ttl: u64,
    /// Timeout in seconds for a single remote fetch
    pub fetch_timeout: u64,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `PAGE_TTL` - Cached page lifetime in seconds (default: 10)
    /// - `FETCH_TIMEOUT` - Remote fetch timeout in seconds (default: 5)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    ///
    /// A zero `PAGE_TTL` or `CLEANUP_INTERVAL` falls back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            page_ttl: nonzero_or(
                "PAGE_TTL",
                env_or("PAGE_TTL", defaults.page_ttl),
                defaults.page_ttl,
            ),
            fetch_timeout: env_or("FETCH_TIMEOUT", defaults.fetch_timeout),
            cleanup_interval: nonzero_or(
                "CLEANUP_INTERVAL",
                env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
                defaults.cleanup_interval,
            ),
        }
    }

    /// Page TTL as a Duration.
    pub fn page_ttl(&self) -> Duration {
        Duration::from_secs(self.page_ttl)
    }

    /// Fetch timeout as a Duration.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout)
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn nonzero_or(name: &str, value: u64, default: u64) -> u64 {
    if value == 0 {
        warn!("{} must be greater than zero, using default of {}", name, default);
        default
    } else {
        value
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            page_ttl: 10,
            fetch_timeout: 5,
            cleanup_interval: 1,
        }
    }
}
