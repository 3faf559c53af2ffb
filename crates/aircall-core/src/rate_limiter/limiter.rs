//! Sliding window rate limiter

use super::types::{RateLimitError, RateLimiterConfig};
use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Outcome of one purge-check-append attempt
enum Admission {
    Granted,
    Wait(Duration),
}

/// Sliding window rate limiter
///
/// Keeps the instants of recent admissions. An admission is granted while
/// fewer than `max_requests_per_window` admissions fall inside the trailing
/// window; otherwise the caller sleeps until the oldest one leaves it and
/// tries again. Expired entries are evicted lazily on each attempt.
///
/// Share one instance (behind an `Arc`) between every call site that talks to
/// the same quota.
#[derive(Debug)]
pub struct RateLimiter {
    /// Configuration
    config: RateLimiterConfig,
    /// Admission timestamps, oldest first
    timestamps: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    /// Create a new rate limiter
    pub fn new(config: RateLimiterConfig) -> Self {
        Self {
            timestamps: Mutex::new(VecDeque::new()),
            config,
        }
    }

    /// Get configuration
    pub fn config(&self) -> &RateLimiterConfig {
        &self.config
    }

    /// Wait for admission, then record it.
    ///
    /// Returns how long the caller was suspended (`Duration::ZERO` when a slot
    /// was free). The log lock is only held for the purge-check-append step,
    /// never while sleeping. If `cancel` fires first the caller unwinds with
    /// [`RateLimitError::Cancelled`] and no admission is recorded.
    pub async fn acquire(&self, cancel: &CancellationToken) -> Result<Duration, RateLimitError> {
        let start = Instant::now();
        let mut suspended = false;

        loop {
            if cancel.is_cancelled() {
                return Err(RateLimitError::Cancelled);
            }

            let wait = match self.admit().await {
                Admission::Granted => {
                    if suspended {
                        let waited = start.elapsed();
                        warn!(
                            "Rate limiter: waited {:.2}s for a request slot",
                            waited.as_secs_f64()
                        );
                        return Ok(waited);
                    }
                    return Ok(Duration::ZERO);
                }
                Admission::Wait(wait) => wait,
            };

            debug!(
                "Rate limiter: quota of {} reached, retrying in {:?}",
                self.config.max_requests_per_window, wait
            );
            suspended = true;

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(RateLimitError::Cancelled),
                _ = sleep(wait) => {}
            }
        }
    }

    /// Record an admission only if one is available right now
    pub async fn try_acquire(&self) -> bool {
        matches!(self.admit().await, Admission::Granted)
    }

    /// Number of admissions inside the current window
    pub async fn current_count(&self) -> usize {
        let mut timestamps = self.timestamps.lock().await;
        self.evict(&mut timestamps, Instant::now());
        timestamps.len()
    }

    /// One atomic purge + check + append step
    async fn admit(&self) -> Admission {
        let mut timestamps = self.timestamps.lock().await;
        let now = Instant::now();
        self.evict(&mut timestamps, now);

        if timestamps.len() < self.config.max_requests_per_window as usize {
            timestamps.push_back(now);
            debug!(
                "Rate limiter: admitted, {}/{} in window",
                timestamps.len(),
                self.config.max_requests_per_window
            );
            return Admission::Granted;
        }

        // Full log is never empty since max_requests_per_window >= 1.
        // A window past the clock's range waits the whole window.
        let window = self.config.window_duration;
        let wait = timestamps
            .front()
            .map(|oldest| {
                oldest
                    .checked_add(window)
                    .map_or(window, |expiry| expiry.saturating_duration_since(now))
            })
            .unwrap_or(Duration::ZERO);
        Admission::Wait(wait)
    }

    /// Drop entries that have left the window ending at `now`
    fn evict(&self, timestamps: &mut VecDeque<Instant>, now: Instant) {
        while let Some(front) = timestamps.front() {
            if now.saturating_duration_since(*front) >= self.config.window_duration {
                timestamps.pop_front();
            } else {
                break;
            }
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimiterConfig::default())
    }
}
