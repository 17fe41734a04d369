//! Client configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Rendering service base URL without a trailing slash.
    pub base_url: String,
    /// Delay between job status queries.
    pub poll_interval: Duration,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl ClientConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `MEMEBOARD_API_URL`: default `http://127.0.0.1:8000`
    /// - `MEMEBOARD_POLL_INTERVAL_MS`: default 1000
    /// - `MEMEBOARD_REQUEST_TIMEOUT_SECS`: default 30
    /// - `MEMEBOARD_CONNECT_TIMEOUT_SECS`: default 10
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Unparseable or zero values
    /// fall back to their defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("MEMEBOARD_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        Self {
            base_url: normalize_base_url(&base_url),
            poll_interval: Duration::from_millis(parse_nonzero(
                lookup("MEMEBOARD_POLL_INTERVAL_MS"),
                DEFAULT_POLL_INTERVAL_MS,
            )),
            request_timeout: Duration::from_secs(parse_nonzero(
                lookup("MEMEBOARD_REQUEST_TIMEOUT_SECS"),
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )),
            connect_timeout: Duration::from_secs(parse_nonzero(
                lookup("MEMEBOARD_CONNECT_TIMEOUT_SECS"),
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )),
        }
    }

    /// Override the base URL, e.g. from a command-line flag.
    #[must_use]
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.base_url = normalize_base_url(&url);
        }
        self
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

fn parse_nonzero<T>(raw: Option<String>, default: T) -> T
where
    T: FromStr + PartialEq + Default,
{
    raw.and_then(|v| v.trim().parse::<T>().ok())
        .filter(|v| *v != T::default())
        .unwrap_or(default)
}
