//! Gateway configuration, read once at startup.

use eventhub_types::ConfigError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::BTreeMap;
use std::time::Duration;

/// Environment variable holding the backend origin.
pub const ENV_BASE_URL: &str = "API_BASE_URL";
/// Environment variable holding the per-request deadline in milliseconds.
pub const ENV_TIMEOUT: &str = "API_TIMEOUT";

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Path segment appended to the backend origin.
const API_PREFIX: &str = "api";

/// Configuration for the gateway client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Backend origin, without the `/api` prefix.
    pub base_url: String,
    /// Per-request deadline in milliseconds.
    pub timeout_ms: u64,
    /// Headers sent with every request.
    pub default_headers: BTreeMap<String, String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        let mut default_headers = BTreeMap::new();
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            default_headers,
        }
    }
}

impl GatewayConfig {
    /// Reads `API_BASE_URL` and `API_TIMEOUT` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Missing or blank values
    /// fall back to defaults; an unparsable timeout is logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }

        if let Some(raw) = lookup(ENV_TIMEOUT).filter(|v| !v.trim().is_empty()) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.timeout_ms = ms,
                Err(e) => tracing::warn!(
                    "Ignoring {}={:?} ({}), using {}ms",
                    ENV_TIMEOUT,
                    raw,
                    e,
                    DEFAULT_TIMEOUT_MS
                ),
            }
        }

        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Backend origin joined with the API prefix, e.g. `http://localhost:5000/api`.
    pub fn api_url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), API_PREFIX)
    }

    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Checks the base URL, timeout and default headers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| ConfigError::invalid("base_url", format!("{}: {}", self.base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::invalid(
                "base_url",
                format!("unsupported scheme '{}'", parsed.scheme()),
            ));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::invalid("timeout_ms", "must be greater than zero"));
        }
        self.header_map().map(|_| ())
    }

    /// Default headers as a reqwest [`HeaderMap`].
    pub fn header_map(&self) -> Result<HeaderMap, ConfigError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &self.default_headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ConfigError::invalid("default_headers", format!("{}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ConfigError::invalid("default_headers", format!("{}: {}", name, e)))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }
}
