//! Tests for the sliding window rate limiter
//!
//! All timing tests run on a paused tokio clock, so sleeps inside `acquire`
//! auto-advance virtual time and durations are exact.

use super::{RateLimitError, RateLimiter, RateLimiterConfig};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{advance, Instant};
use tokio_util::sync::CancellationToken;

fn limiter(max: u32, window_secs: u64) -> RateLimiter {
    RateLimiter::new(RateLimiterConfig::new(
        max,
        Duration::from_secs(window_secs),
    ))
}

#[test]
fn test_config_defaults() {
    let config = RateLimiterConfig::default();
    assert_eq!(config.max_requests_per_window, 60);
    assert_eq!(config.window_duration, Duration::from_secs(60));
}

#[test]
fn test_config_zero_quota_is_raised() {
    let config = RateLimiterConfig::per_minute(0);
    assert_eq!(config.max_requests_per_window, 1);
}

#[tokio::test(start_paused = true)]
async fn test_under_quota_has_zero_wait() {
    let limiter = limiter(5, 60);
    let token = CancellationToken::new();

    for _ in 0..5 {
        assert_eq!(limiter.acquire(&token).await, Ok(Duration::ZERO));
    }
    assert_eq!(limiter.current_count().await, 5);
}

#[tokio::test(start_paused = true)]
async fn test_full_window_waits_for_oldest_entry() {
    let limiter = limiter(2, 10);
    let token = CancellationToken::new();

    limiter.acquire(&token).await.unwrap();
    advance(Duration::from_secs(4)).await;
    limiter.acquire(&token).await.unwrap();

    // Oldest admission leaves the window 6s from now, not a full window reset
    let waited = limiter.acquire(&token).await.unwrap();
    assert_eq!(waited, Duration::from_secs(6));
}

#[tokio::test(start_paused = true)]
async fn test_three_per_minute_scenario() {
    let limiter = limiter(3, 60);
    let token = CancellationToken::new();
    let base = Instant::now();

    for _ in 0..3 {
        assert_eq!(limiter.acquire(&token).await, Ok(Duration::ZERO));
        advance(Duration::from_secs(1)).await;
    }

    // t=3: must wait until t=60
    let waited = limiter.acquire(&token).await.unwrap();
    assert_eq!(waited, Duration::from_secs(57));
    assert_eq!(base.elapsed(), Duration::from_secs(60));

    // t=61: the t=0 and t=1 entries have expired
    advance(Duration::from_secs(1)).await;
    assert_eq!(limiter.acquire(&token).await, Ok(Duration::ZERO));
}

#[tokio::test(start_paused = true)]
async fn test_idle_period_restores_full_quota() {
    let limiter = limiter(3, 60);
    let token = CancellationToken::new();

    for _ in 0..3 {
        limiter.acquire(&token).await.unwrap();
    }
    assert!(!limiter.try_acquire().await);

    advance(Duration::from_secs(61)).await;

    assert_eq!(limiter.current_count().await, 0);
    for _ in 0..3 {
        assert_eq!(limiter.acquire(&token).await, Ok(Duration::ZERO));
    }
}

#[tokio::test(start_paused = true)]
async fn test_try_acquire_does_not_wait() {
    let limiter = limiter(1, 60);

    assert!(limiter.try_acquire().await);
    assert!(!limiter.try_acquire().await);
    assert_eq!(limiter.current_count().await, 1);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_callers_admit_exactly_quota() {
    let limiter = Arc::new(limiter(4, 60));
    let token = CancellationToken::new();
    let base = Instant::now();

    let mut handles = Vec::new();
    for _ in 0..10 {
        let limiter = limiter.clone();
        let token = token.clone();
        handles.push(tokio::spawn(async move {
            limiter.acquire(&token).await.unwrap();
            Instant::now()
        }));
    }

    let mut admitted = Vec::new();
    for handle in handles {
        admitted.push(handle.await.unwrap());
    }
    admitted.sort();

    let immediate = admitted.iter().filter(|t| **t == base).count();
    assert_eq!(immediate, 4);

    // Sliding window property: any 5 consecutive admissions span >= 60s
    for pair in admitted.windows(5) {
        assert!(pair[4].duration_since(pair[0]) >= Duration::from_secs(60));
    }
}

#[tokio::test(start_paused = true)]
async fn test_lock_is_released_while_waiting() {
    let limiter = Arc::new(limiter(1, 60));
    let token = CancellationToken::new();
    limiter.acquire(&token).await.unwrap();

    let waiter = {
        let limiter = limiter.clone();
        let token = token.clone();
        tokio::spawn(async move { limiter.acquire(&token).await })
    };
    tokio::task::yield_now().await;

    // A sleeping waiter must not block other callers from inspecting the log
    assert!(!limiter.try_acquire().await);
    assert_eq!(limiter.current_count().await, 1);

    assert_eq!(waiter.await.unwrap(), Ok(Duration::from_secs(60)));
}

#[tokio::test(start_paused = true)]
async fn test_cancellation_unwinds_waiter_without_admission() {
    let limiter = Arc::new(limiter(1, 60));
    let token = CancellationToken::new();
    limiter.acquire(&token).await.unwrap();

    let waiter = {
        let limiter = limiter.clone();
        let token = token.clone();
        tokio::spawn(async move { limiter.acquire(&token).await })
    };
    tokio::task::yield_now().await;
    advance(Duration::from_secs(5)).await;

    token.cancel();

    assert_eq!(waiter.await.unwrap(), Err(RateLimitError::Cancelled));
    assert_eq!(limiter.current_count().await, 1);
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_token_rejects_before_admission() {
    let limiter = limiter(5, 60);
    let token = CancellationToken::new();
    token.cancel();

    assert_eq!(limiter.acquire(&token).await, Err(RateLimitError::Cancelled));
    assert_eq!(limiter.current_count().await, 0);
}

#[tokio::test(start_paused = true)]
async fn test_huge_quota_allocates_lazily() {
    let limiter = RateLimiter::new(RateLimiterConfig::new(u32::MAX, Duration::from_secs(60)));

    assert!(limiter.try_acquire().await);
    assert!(limiter.try_acquire().await);
    assert_eq!(limiter.current_count().await, 2);
}

#[tokio::test(start_paused = true)]
async fn test_unbounded_window_blocks_until_cancelled() {
    let limiter = Arc::new(RateLimiter::new(RateLimiterConfig::new(
        1,
        Duration::from_secs(u64::MAX),
    )));
    assert!(limiter.try_acquire().await);
    assert!(!limiter.try_acquire().await);

    let token = CancellationToken::new();
    let waiter = {
        let limiter = limiter.clone();
        let token = token.clone();
        tokio::spawn(async move { limiter.acquire(&token).await })
    };
    tokio::task::yield_now().await;
    advance(Duration::from_secs(3600)).await;
    assert!(!waiter.is_finished());

    token.cancel();

    assert_eq!(waiter.await.unwrap(), Err(RateLimitError::Cancelled));
    assert_eq!(limiter.current_count().await, 1);
}
