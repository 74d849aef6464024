//! Runtime configuration read from the environment.

use std::time::Duration;

use crate::error::ConfigError;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_CSC_BASE_URL: &str = "https://api.countrystatecity.in/v1";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend REST base URL, without trailing slash
    pub api_base_url: String,
    /// Key for the country/state/city lookup API
    pub csc_api_key: Option<String>,
    pub csc_base_url: String,
    pub request_timeout: Duration,
    /// Interval between unread-count polls
    pub poll_interval: Duration,
    pub page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            csc_api_key: None,
            csc_base_url: DEFAULT_CSC_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            poll_interval: Duration::from_secs(30),
            page_size: 10,
        }
    }
}

impl Config {
    /// Read `PROPDESK_*` variables from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_base_url = non_empty("PROPDESK_API_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);
        let csc_base_url = non_empty("PROPDESK_CSC_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.csc_base_url);

        let seconds = |key: &'static str, fallback: Duration| -> Result<Duration, ConfigError> {
            match non_empty(key) {
                Some(raw) => parse_positive(key, &raw).map(Duration::from_secs),
                None => Ok(fallback),
            }
        };

        let page_size = match non_empty("PROPDESK_PAGE_SIZE") {
            Some(raw) => parse_positive("PROPDESK_PAGE_SIZE", &raw)? as usize,
            None => defaults.page_size,
        };

        Ok(Self {
            api_base_url,
            csc_api_key: non_empty("PROPDESK_CSC_API_KEY"),
            csc_base_url,
            request_timeout: seconds("PROPDESK_TIMEOUT_SECS", defaults.request_timeout)?,
            poll_interval: seconds("PROPDESK_POLL_SECS", defaults.poll_interval)?,
            page_size,
        })
    }
}

fn parse_positive(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidNumber {
            key,
            value: raw.to_string(),
        }),
    }
}
