//! HTTP implementation of [`CallCenterApi`]

use super::api::CallCenterApi;
use super::types::{Call, CallPage, ListCallsQuery, Summary, Transcript};
use crate::config::AircallConfig;
use crate::error::{AircallError, AircallResult};
use crate::rate_limiter::RateLimiter;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

const USER_AGENT: &str = concat!("aircall-mcp/", env!("CARGO_PKG_VERSION"));

/// Async Aircall client with built-in rate limiting
#[derive(Debug, Clone)]
pub struct AircallClient {
    http: reqwest::Client,
    config: AircallConfig,
    limiter: Arc<RateLimiter>,
    shutdown: CancellationToken,
}

impl AircallClient {
    /// Create a client with its own limiter built from `config.rate_limit`
    pub fn new(config: AircallConfig, shutdown: CancellationToken) -> AircallResult<Self> {
        let limiter = Arc::new(RateLimiter::new(config.rate_limit));
        Self::with_limiter(config, limiter, shutdown)
    }

    /// Create a client sharing an existing limiter
    pub fn with_limiter(
        config: AircallConfig,
        limiter: Arc<RateLimiter>,
        shutdown: CancellationToken,
    ) -> AircallResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AircallError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            config,
            limiter,
            shutdown,
        })
    }

    /// Get configuration
    pub fn config(&self) -> &AircallConfig {
        &self.config
    }

    /// Shared rate limiter
    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    /// Make a rate-limited GET request and decode the JSON body
    async fn get(&self, path: &str, query: &[(&'static str, String)]) -> AircallResult<Value> {
        self.limiter.acquire(&self.shutdown).await?;

        let url = format!("{}{}", self.config.base_url, path);
        debug!("Aircall request: GET {}", url);

        let request = self
            .http
            .get(&url)
            .basic_auth(&self.config.api_id, Some(&self.config.api_token))
            .query(query)
            .send();

        let response = tokio::select! {
            _ = self.shutdown.cancelled() => return Err(AircallError::Cancelled),
            response = request => response?,
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("Aircall response {} for {}", status, url);
            return Err(AircallError::from_status(
                status.as_u16(),
                &body,
                self.config.rate_limit.max_requests_per_window,
            ));
        }

        Ok(response.json::<Value>().await?)
    }
}

/// Return `value[key]` when present, otherwise the value itself
fn unwrap_key(mut value: Value, key: &str) -> Value {
    if let Some(inner) = value.as_object_mut().and_then(|map| map.remove(key)) {
        return inner;
    }
    value
}

/// Treat a 404 as "not available"
fn optional<T>(result: AircallResult<T>) -> AircallResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

#[async_trait]
impl CallCenterApi for AircallClient {
    async fn list_calls(&self, query: &ListCallsQuery) -> AircallResult<CallPage> {
        let data = self.get("/calls", &query.to_pairs()).await?;
        Ok(serde_json::from_value(data)?)
    }

    async fn get_call(&self, call_id: i64) -> AircallResult<Call> {
        let data = self.get(&format!("/calls/{}", call_id), &[]).await?;
        Ok(serde_json::from_value(unwrap_key(data, "call"))?)
    }

    async fn get_transcript(&self, call_id: i64) -> AircallResult<Option<Transcript>> {
        let data = optional(
            self.get(&format!("/calls/{}/transcription", call_id), &[])
                .await,
        )?;
        Ok(data.map(|d| Transcript::from_value(unwrap_key(d, "transcription"))))
    }

    async fn get_summary(&self, call_id: i64) -> AircallResult<Option<Summary>> {
        let data = optional(self.get(&format!("/calls/{}/summary", call_id), &[]).await)?;
        match data {
            Some(d) => Ok(Some(serde_json::from_value(unwrap_key(d, "summary"))?)),
            None => Ok(None),
        }
    }
}
