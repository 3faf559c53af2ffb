//! Call-center API abstraction

use super::types::{Call, CallPage, ListCallsQuery, Summary, Transcript};
use crate::error::AircallResult;
use async_trait::async_trait;

/// Read access to calls, transcripts and summaries
///
/// Every method issues exactly one outbound request.
#[async_trait]
pub trait CallCenterApi: Send + Sync {
    /// List calls with pagination and server-side filters
    async fn list_calls(&self, query: &ListCallsQuery) -> AircallResult<CallPage>;

    /// Get details for a specific call
    async fn get_call(&self, call_id: i64) -> AircallResult<Call>;

    /// Get the transcript for a call, `None` if the call has none
    async fn get_transcript(&self, call_id: i64) -> AircallResult<Option<Transcript>>;

    /// Get the AI summary for a call, `None` if not available
    async fn get_summary(&self, call_id: i64) -> AircallResult<Option<Summary>>;
}
