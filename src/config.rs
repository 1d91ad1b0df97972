//! Client configuration
//!
//! The two Homeboard services live on independent base URLs (the price
//! service and the device inventory service). Defaults match the local
//! development setup; everything can be overridden through environment
//! variables.

use crate::error::{HomeboardError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Environment variable for the price service base URL
pub const ENV_PRICES_URL: &str = "HOMEBOARD_PRICES_URL";
/// Environment variable for the device service base URL
pub const ENV_DEVICES_URL: &str = "HOMEBOARD_DEVICES_URL";
/// Environment variable for the request timeout in seconds
pub const ENV_TIMEOUT: &str = "HOMEBOARD_TIMEOUT";
/// Environment variable for the poll interval in seconds
pub const ENV_POLL_INTERVAL: &str = "HOMEBOARD_POLL_INTERVAL";

const DEFAULT_PRICES_URL: &str = "http://localhost:8000/";
const DEFAULT_DEVICES_URL: &str = "http://localhost:8001/";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

/// Configuration for the Homeboard service clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the spot price service
    pub prices_base_url: Url,
    /// Base URL of the device inventory service
    pub devices_base_url: Url,
    /// Per-request timeout
    pub timeout: Duration,
    /// Interval between periodic device refreshes
    pub poll_interval: Duration,
    /// Whether to verify TLS certificates
    pub verify_tls: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            prices_base_url: Url::parse(DEFAULT_PRICES_URL)
                .unwrap_or_else(|_| unreachable!("default URL is valid")),
            devices_base_url: Url::parse(DEFAULT_DEVICES_URL)
                .unwrap_or_else(|_| unreachable!("default URL is valid")),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            verify_tls: true,
        }
    }
}

impl ClientConfig {
    /// Build a configuration from explicit base URLs
    pub fn new(prices_base_url: Url, devices_base_url: Url) -> Self {
        Self {
            prices_base_url,
            devices_base_url,
            ..Self::default()
        }
    }

    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(value) = std::env::var(ENV_PRICES_URL) {
            config.prices_base_url = parse_url(ENV_PRICES_URL, &value)?;
        }
        if let Ok(value) = std::env::var(ENV_DEVICES_URL) {
            config.devices_base_url = parse_url(ENV_DEVICES_URL, &value)?;
        }
        if let Ok(value) = std::env::var(ENV_TIMEOUT) {
            config.timeout = Duration::from_secs(parse_secs(ENV_TIMEOUT, &value)?);
        }
        if let Ok(value) = std::env::var(ENV_POLL_INTERVAL) {
            config.poll_interval = Duration::from_secs(parse_secs(ENV_POLL_INTERVAL, &value)?);
        }

        Ok(config)
    }
}

fn parse_url(var: &str, value: &str) -> Result<Url> {
    Url::parse(value)
        .map_err(|e| HomeboardError::config(format!("Invalid URL in {var}: {e}")))
}

fn parse_secs(var: &str, value: &str) -> Result<u64> {
    value
        .parse::<u64>()
        .map_err(|e| HomeboardError::config(format!("Invalid duration in {var}: {e}")))
}
