//! Rate limiter configuration and error types

use std::time::Duration;
use thiserror::Error;

/// Default number of requests admitted per window (Aircall's published quota)
pub const DEFAULT_MAX_REQUESTS: u32 = 60;

/// Default window length
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Immutable limiter configuration, built once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimiterConfig {
    /// Maximum admissions in any trailing window
    pub max_requests_per_window: u32,
    /// Length of the trailing window
    pub window_duration: Duration,
}

impl RateLimiterConfig {
    /// Create a configuration.
    ///
    /// A zero quota would block forever, so it is raised to one.
    pub fn new(max_requests_per_window: u32, window_duration: Duration) -> Self {
        Self {
            max_requests_per_window: max_requests_per_window.max(1),
            window_duration,
        }
    }

    /// Quota expressed per minute
    pub fn per_minute(requests: u32) -> Self {
        Self::new(requests, Duration::from_secs(60))
    }
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW)
    }
}

/// Errors from [`super::RateLimiter::acquire`]
///
/// The limiter has no failure modes of its own; it only reports that the
/// caller was told to stop while waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RateLimitError {
    /// Shutdown was requested while waiting for admission
    #[error("Rate limiter wait cancelled")]
    Cancelled,
}
