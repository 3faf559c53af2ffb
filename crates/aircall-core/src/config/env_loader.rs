//! Environment variable-based configuration loading

use crate::error::{AircallError, AircallResult};
use crate::rate_limiter::RateLimiterConfig;
use std::env;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Default Aircall REST endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.aircall.io/v1";

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Aircall client configuration
#[derive(Clone, PartialEq, Eq)]
pub struct AircallConfig {
    /// API ID (basic auth user)
    pub api_id: String,
    /// API token (basic auth password)
    pub api_token: String,
    /// Base URL of the REST API
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Outbound request quota
    pub rate_limit: RateLimiterConfig,
}

impl AircallConfig {
    /// Create a configuration with explicit credentials and defaults elsewhere
    pub fn new(api_id: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            api_id: api_id.into(),
            api_token: api_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            rate_limit: RateLimiterConfig::default(),
        }
    }

    /// Set base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set rate limit configuration
    pub fn with_rate_limit(mut self, rate_limit: RateLimiterConfig) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Load configuration from the environment
    ///
    /// A `.env` file in the working directory (or a parent) is loaded first
    /// without overriding variables already set. Recognised variables:
    ///
    /// - `AIRCALL_API_ID`, `AIRCALL_API_TOKEN` (required)
    /// - `AIRCALL_BASE_URL` (default `https://api.aircall.io/v1`)
    /// - `AIRCALL_TIMEOUT` seconds (default 30)
    /// - `AIRCALL_RATE_LIMIT` requests per window (default 60)
    /// - `AIRCALL_RATE_WINDOW_SECS` window length (default 60)
    pub fn from_env() -> AircallResult<Self> {
        if let Ok(path) = dotenv::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> AircallResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let (api_id, api_token) = match (
            non_empty("AIRCALL_API_ID"),
            non_empty("AIRCALL_API_TOKEN"),
        ) {
            (Some(id), Some(token)) => (id, token),
            _ => return Err(AircallError::MissingCredentials),
        };

        let base_url =
            non_empty("AIRCALL_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = parse_positive(&non_empty, "AIRCALL_TIMEOUT", DEFAULT_TIMEOUT_SECS)?;
        let defaults = RateLimiterConfig::default();
        let max_requests = parse_positive(
            &non_empty,
            "AIRCALL_RATE_LIMIT",
            u64::from(defaults.max_requests_per_window),
        )?;
        let max_requests = u32::try_from(max_requests)
            .map_err(|_| AircallError::config("Invalid AIRCALL_RATE_LIMIT value"))?;
        let window_secs = parse_positive(
            &non_empty,
            "AIRCALL_RATE_WINDOW_SECS",
            defaults.window_duration.as_secs(),
        )?;

        Ok(Self {
            api_id,
            api_token,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
            rate_limit: RateLimiterConfig::new(max_requests, Duration::from_secs(window_secs)),
        })
    }
}

fn parse_positive<F>(lookup: &F, key: &str, default: u64) -> AircallResult<u64>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(value) if value > 0 => Ok(value),
            _ => Err(AircallError::config(format!(
                "Invalid {} value: '{}'",
                key, raw
            ))),
        },
    }
}

// Keep the token out of logs
impl fmt::Debug for AircallConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AircallConfig")
            .field("api_id", &self.api_id)
            .field("api_token", &"***")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("rate_limit", &self.rate_limit)
            .finish()
    }
}
