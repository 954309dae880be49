use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_RATE_LIMIT_BURST_SIZE, DEFAULT_RATE_LIMIT_MAX_REQUESTS,
    DEFAULT_RATE_LIMIT_PERIOD_SECONDS, DEFAULT_TIMEOUT_SECS,
};
use crate::storage::config::StorageConfig;
use crate::utils::config::{get_env_or_default, get_env_or_none};
use dotenv::dotenv;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Main configuration for the tasks API client
pub struct Config {
    /// REST API configuration
    pub rest_api: RestApiConfig,
    /// Token persistence configuration
    pub storage: StorageConfig,
    /// Rate limiter configuration for API requests
    pub rate_limiter: RateLimiterConfig,
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Configuration for the REST API
pub struct RestApiConfig {
    /// Base URL of the REST API, e.g. `http://localhost:8000/api`
    pub base_url: String,
    /// Timeout in seconds for every request, the refresh call included
    pub timeout: u64,
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Configuration for rate limiting API requests
pub struct RateLimiterConfig {
    /// Maximum number of requests allowed per period
    pub max_requests: u32,
    /// Time period in seconds for the rate limit
    pub period_seconds: u64,
    /// Burst size - maximum number of requests that can be made at once
    pub burst_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Builds the configuration from the environment
    ///
    /// A `.env` file in the working directory is loaded first. Recognized
    /// variables: `TASKS_API_BASE_URL`, `TASKS_API_TIMEOUT`,
    /// `TASKS_TOKEN_FILE`, `TASKS_RATE_LIMIT_MAX_REQUESTS`,
    /// `TASKS_RATE_LIMIT_PERIOD_SECONDS` and `TASKS_RATE_LIMIT_BURST_SIZE`.
    pub fn new() -> Self {
        match dotenv() {
            Ok(_) => debug!("Successfully loaded .env file"),
            Err(e) => debug!("Failed to load .env file: {e}"),
        }

        Config {
            rest_api: RestApiConfig {
                base_url: get_env_or_default("TASKS_API_BASE_URL", String::from(DEFAULT_BASE_URL)),
                timeout: get_env_or_default("TASKS_API_TIMEOUT", DEFAULT_TIMEOUT_SECS),
            },
            storage: StorageConfig {
                token_file: get_env_or_none("TASKS_TOKEN_FILE"),
            },
            rate_limiter: RateLimiterConfig {
                max_requests: get_env_or_default(
                    "TASKS_RATE_LIMIT_MAX_REQUESTS",
                    DEFAULT_RATE_LIMIT_MAX_REQUESTS,
                ),
                period_seconds: get_env_or_default(
                    "TASKS_RATE_LIMIT_PERIOD_SECONDS",
                    DEFAULT_RATE_LIMIT_PERIOD_SECONDS,
                ),
                burst_size: get_env_or_default(
                    "TASKS_RATE_LIMIT_BURST_SIZE",
                    DEFAULT_RATE_LIMIT_BURST_SIZE,
                ),
            },
        }
    }

    /// Same configuration pointed at another API base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.rest_api.base_url = base_url.into();
        self
    }

    /// Same configuration persisting tokens to `path`
    #[must_use]
    pub fn with_token_file(mut self, path: impl Into<String>) -> Self {
        self.storage.token_file = Some(path.into());
        self
    }

    /// Absolute URL for an API path
    ///
    /// Absolute URLs are returned unchanged; relative paths are joined to the
    /// base URL with exactly one slash. Trailing slashes are kept since the
    /// backend routes require them.
    #[must_use]
    pub fn endpoint_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!(
                "{}/{}",
                self.rest_api.base_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            )
        }
    }
}
