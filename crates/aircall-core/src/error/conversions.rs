//! From trait implementations for AircallError conversions

use super::types::AircallError;
use crate::rate_limiter::RateLimitError;

impl From<serde_json::Error> for AircallError {
    fn from(error: serde_json::Error) -> Self {
        Self::json(error.to_string())
    }
}

impl From<reqwest::Error> for AircallError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            return Self::Timeout;
        }
        if error.is_decode() {
            return Self::json(error.to_string());
        }
        Self::http(
            format!("Request failed: {}", error),
            error.status().map(|s| s.as_u16()),
        )
    }
}

impl From<RateLimitError> for AircallError {
    fn from(error: RateLimitError) -> Self {
        match error {
            RateLimitError::Cancelled => Self::Cancelled,
        }
    }
}
