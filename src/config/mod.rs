use std::env;
use std::time::Duration;

use crate::errors::ConfigError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub poll_interval_secs: u64,
    pub order_limit: usize,
    pub http_timeout_secs: u64,
    pub stub_host: String,
    pub stub_port: u16,
    pub stub_seed: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:8000".to_string(),
            poll_interval_secs: 10,
            order_limit: 50,
            http_timeout_secs: 8,
            stub_host: "0.0.0.0".to_string(),
            stub_port: 8000,
            stub_seed: 42,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let api_url = env::var("FRAUDLENS_API_URL")
            .unwrap_or(defaults.api_url)
            .trim_end_matches('/')
            .to_string();
        reqwest::Url::parse(&api_url).map_err(|e| ConfigError::Invalid {
            key: "FRAUDLENS_API_URL",
            message: e.to_string(),
        })?;

        Ok(Self {
            api_url,
            poll_interval_secs: parse_or("FRAUDLENS_POLL_INTERVAL_SECS", defaults.poll_interval_secs)
                .max(1),
            order_limit: parse_or("FRAUDLENS_ORDER_LIMIT", defaults.order_limit),
            http_timeout_secs: parse_or("FRAUDLENS_HTTP_TIMEOUT_SECS", defaults.http_timeout_secs),
            stub_host: env::var("STUB_HOST").unwrap_or(defaults.stub_host),
            stub_port: parse_or("STUB_PORT", defaults.stub_port),
            stub_seed: parse_or("STUB_SEED", defaults.stub_seed),
        })
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

/// Parse an environment variable, falling back to `default` when unset or invalid.
fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
