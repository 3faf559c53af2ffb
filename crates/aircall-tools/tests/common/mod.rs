//! In-memory call-center API used by the tool tests

#![allow(dead_code)]

use aircall_core::client::{Call, CallPage, ListCallsQuery, NamedRef, PageMeta, Summary, Tag, Transcript};
use aircall_core::{AircallError, AircallResult, CallCenterApi, RateLimiter, RateLimiterConfig};
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[derive(Default)]
pub struct FakeApi {
    pub calls: Vec<Call>,
    pub total: Option<u64>,
    pub transcripts: HashMap<i64, Transcript>,
    pub summaries: HashMap<i64, Summary>,
    pub failing: HashMap<i64, AircallError>,
    pub list_failure: Option<AircallError>,
    pub queries: Mutex<Vec<ListCallsQuery>>,
    pub requests: AtomicUsize,
    pub limiter: Option<RateLimiter>,
    pub shutdown: CancellationToken,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_call(mut self, call: Call) -> Self {
        self.calls.push(call);
        self
    }

    pub fn with_total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }

    pub fn with_transcript(mut self, call_id: i64, lines: &[(&str, &str)]) -> Self {
        let utterances: Vec<_> = lines
            .iter()
            .enumerate()
            .map(|(i, (participant, text))| {
                json!({"participant_type": participant, "text": text, "start_time": i as f64 * 1.5})
            })
            .collect();
        self.transcripts.insert(
            call_id,
            Transcript::from_value(json!({"id": call_id, "content": {"utterances": utterances}})),
        );
        self
    }

    pub fn with_summary(mut self, call_id: i64, content: &str) -> Self {
        self.summaries.insert(
            call_id,
            Summary {
                content: Some(content.to_string()),
            },
        );
        self
    }

    pub fn failing(mut self, call_id: i64, error: AircallError) -> Self {
        self.failing.insert(call_id, error);
        self
    }

    pub fn failing_list(mut self, error: AircallError) -> Self {
        self.list_failure = Some(error);
        self
    }

    pub fn rate_limited(mut self, max: u32, window: Duration) -> Self {
        self.limiter = Some(RateLimiter::new(RateLimiterConfig::new(max, window)));
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<ListCallsQuery> {
        self.queries.lock().unwrap().last().cloned()
    }

    async fn admit(&self, call_id: Option<i64>) -> AircallResult<()> {
        if let Some(limiter) = &self.limiter {
            limiter.acquire(&self.shutdown).await?;
        }
        self.requests.fetch_add(1, Ordering::SeqCst);
        let failure = match call_id {
            Some(id) => self.failing.get(&id),
            None => self.list_failure.as_ref(),
        };
        match failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

pub fn call(id: i64, duration: i64, started_at: i64) -> Call {
    Call {
        id,
        direction: Some("inbound".to_string()),
        duration: Some(duration),
        started_at: Some(started_at),
        user: Some(NamedRef {
            name: Some("Alice".to_string()),
        }),
        number: Some(NamedRef {
            name: Some("Support Line".to_string()),
        }),
        tags: Some(vec![Tag {
            name: Some("vip".to_string()),
        }]),
    }
}

#[async_trait]
impl CallCenterApi for FakeApi {
    async fn list_calls(&self, query: &ListCallsQuery) -> AircallResult<CallPage> {
        self.admit(None).await?;
        self.queries.lock().unwrap().push(query.clone());

        let calls: Vec<Call> = self
            .calls
            .iter()
            .take(query.per_page as usize)
            .cloned()
            .collect();
        Ok(CallPage {
            meta: Some(PageMeta {
                total: Some(self.total.unwrap_or(self.calls.len() as u64)),
                count: Some(calls.len() as u64),
                current_page: Some(query.page as u64),
                per_page: Some(query.per_page as u64),
            }),
            calls,
        })
    }

    async fn get_call(&self, call_id: i64) -> AircallResult<Call> {
        self.admit(Some(call_id)).await?;
        self.calls
            .iter()
            .find(|c| c.id == call_id)
            .cloned()
            .ok_or_else(|| AircallError::from_status(404, "", 60))
    }

    async fn get_transcript(&self, call_id: i64) -> AircallResult<Option<Transcript>> {
        self.admit(Some(call_id)).await?;
        Ok(self.transcripts.get(&call_id).cloned())
    }

    async fn get_summary(&self, call_id: i64) -> AircallResult<Option<Summary>> {
        self.admit(Some(call_id)).await?;
        Ok(self.summaries.get(&call_id).cloned())
    }
}
