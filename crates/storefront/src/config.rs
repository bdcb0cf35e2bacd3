//! Session configuration loaded from environment variables.

use std::time::Duration;

/// Client-core configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `CART_DB` — SQLite URL for the cart slot (default: `"sqlite::memory:"`)
/// - `CHECKOUT_TIMEOUT_MS` — submission timeout (default: `30000`)
/// - `ORDERS_TTL_MS` — order cache freshness window (default: `60000`)
/// - `PRODUCTS_TTL_MS` — product cache freshness window (default: `300000`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub cart_db: String,
    pub checkout_timeout: Duration,
    pub orders_ttl: Duration,
    pub products_ttl: Duration,
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        Self {
            cart_db: std::env::var("CART_DB").unwrap_or_else(|_| "sqlite::memory:".to_string()),
            checkout_timeout: duration_ms("CHECKOUT_TIMEOUT_MS", 30_000),
            orders_ttl: duration_ms("ORDERS_TTL_MS", 60_000),
            products_ttl: duration_ms("PRODUCTS_TTL_MS", 300_000),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cart_db: "sqlite::memory:".to_string(),
            checkout_timeout: Duration::from_millis(30_000),
            orders_ttl: Duration::from_millis(60_000),
            products_ttl: Duration::from_millis(300_000),
            log_level: "info".to_string(),
        }
    }
}

fn duration_ms(key: &str, default_ms: u64) -> Duration {
    let ms = std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default_ms);
    Duration::from_millis(ms)
}
