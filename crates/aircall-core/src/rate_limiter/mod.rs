//! Client-side rate limiting for the Aircall API
//!
//! Aircall enforces a quota of requests per minute per account. The
//! [`RateLimiter`] paces outbound requests with a sliding window so the quota
//! is respected across every concurrent tool invocation in the process.
//! Callers are delayed, never rejected.

mod limiter;
mod types;

#[cfg(test)]
mod tests;

pub use limiter::RateLimiter;
pub use types::{RateLimitError, RateLimiterConfig};
