//! Gateway configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).

use std::net::SocketAddr;
use std::time::Duration;

/// Output format for log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single-line records.
    Text,
    /// One JSON object per record.
    Json,
}

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address for the HTTP and WebSocket server (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Socket address for the admin TCP notification stream.
    pub admin_stream_addr: SocketAddr,

    /// Per-client buffer of undelivered payloads in each transport.
    pub channel_capacity: usize,

    /// Upper bound on a single adapter delivery before it is abandoned.
    pub delivery_timeout: Duration,

    /// Log record format.
    pub log_format: LogFormat,
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` or `ADMIN_STREAM_ADDR` is set but
    /// cannot be parsed as a [`SocketAddr`].
    pub fn from_env() -> Result<Self, std::net::AddrParseError> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()?;

        let admin_stream_addr: SocketAddr = std::env::var("ADMIN_STREAM_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3001".to_string())
            .parse()?;

        let channel_capacity = parse_env("CHANNEL_CAPACITY", 1024_usize).max(1);
        let delivery_timeout = Duration::from_millis(parse_env("DELIVERY_TIMEOUT_MS", 5_000));

        let log_format = match std::env::var("LOG_FORMAT").ok().as_deref() {
            Some("json") | Some("JSON") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            listen_addr,
            admin_stream_addr,
            channel_capacity,
            delivery_timeout,
            log_format,
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_env_falls_back_on_missing_key() {
        let value: u64 = parse_env("CANTEEN_GATEWAY_TEST_UNSET_KEY", 42);
        assert_eq!(value, 42);
    }
}
