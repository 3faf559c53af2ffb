//! `aircall_search_transcripts`: substring search across call transcripts
//!
//! Candidate calls come either from explicit ids or from a date-bounded
//! listing. Each transcript is then fetched one at a time, so a search over N
//! calls costs N+1 (or 2N) rate-limited requests.

use crate::format::format_datetime;
use crate::params;
use crate::search::find_excerpts;
use aircall_core::client::{Call, ListCallsQuery};
use aircall_core::tools::{Tool, ToolCall, ToolError, ToolParameter, ToolResult, ToolSchema};
use aircall_core::{AircallError, CallCenterApi};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

const MAX_EXCERPTS_PER_CALL: usize = 5;

struct SearchInput {
    query: String,
    call_ids: Option<Vec<i64>>,
    from: Option<i64>,
    to: Option<i64>,
    limit: i64,
    case_sensitive: bool,
}

impl SearchInput {
    fn parse(call: &ToolCall) -> Result<Self, ToolError> {
        let query = call
            .get_typed::<String>("query")?
            .ok_or_else(|| ToolError::InvalidArguments("query is required".into()))?;
        let length = query.chars().count();
        if !(2..=200).contains(&length) {
            return Err(ToolError::InvalidArguments(
                "query must be between 2 and 200 characters".into(),
            ));
        }

        Ok(Self {
            query,
            call_ids: params::list(call, "call_ids", 20)?,
            from: params::date(call, "from_date")?,
            to: params::date(call, "to_date")?,
            limit: params::int_in_range(call, "limit", 10, 1, 50)?,
            case_sensitive: params::flag(call, "case_sensitive")?,
        })
    }
}

pub struct SearchTranscriptsTool {
    api: Arc<dyn CallCenterApi>,
}

impl SearchTranscriptsTool {
    pub fn new(api: Arc<dyn CallCenterApi>) -> Self {
        Self { api }
    }

    async fn candidate_calls(&self, input: &SearchInput) -> Result<Vec<Call>, ToolError> {
        match input.call_ids.as_deref().filter(|ids| !ids.is_empty()) {
            Some(ids) => {
                let mut calls = Vec::new();
                for &id in ids.iter().take(input.limit as usize) {
                    match self.api.get_call(id).await {
                        Ok(call) => calls.push(call),
                        Err(AircallError::Cancelled) => return Err(ToolError::Cancelled),
                        Err(e) => debug!("Skipping call {}: {}", id, e),
                    }
                }
                Ok(calls)
            }
            None => {
                let query = ListCallsQuery {
                    per_page: input.limit as u32,
                    from: input.from,
                    to: input.to,
                    ..ListCallsQuery::default()
                };
                Ok(self.api.list_calls(&query).await?.calls)
            }
        }
    }
}

#[async_trait]
impl Tool for SearchTranscriptsTool {
    fn name(&self) -> &str {
        "aircall_search_transcripts"
    }

    fn description(&self) -> &str {
        "Search across call transcripts for specific content. Returns matching calls with \
         relevant transcript excerpts."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            self.name(),
            self.description(),
            vec![
                ToolParameter::string("query", "Text to search for in transcripts")
                    .with_property("minLength", 2)
                    .with_property("maxLength", 200),
                ToolParameter::array("call_ids", "Limit search to specific call IDs (max 20)", "integer")
                    .optional()
                    .with_property("maxItems", 20),
                ToolParameter::string("from_date", "Start date for call range (ISO format or Unix timestamp)")
                    .optional(),
                ToolParameter::string("to_date", "End date for call range (ISO format or Unix timestamp)")
                    .optional(),
                ToolParameter::integer("limit", "Maximum calls to search (1-50)")
                    .with_default(10)
                    .with_property("minimum", 1)
                    .with_property("maximum", 50),
                ToolParameter::boolean("case_sensitive", "Case-sensitive search").with_default(false),
            ],
        )
    }

    fn validate(&self, call: &ToolCall) -> Result<(), ToolError> {
        SearchInput::parse(call).map(|_| ())
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let input = SearchInput::parse(call)?;

        let candidates = self.candidate_calls(&input).await?;
        if candidates.is_empty() {
            return Ok(ToolResult::success(&call.id, self.name(), "No calls found to search."));
        }

        let mut matches = Vec::new();
        for candidate in &candidates {
            let Some(transcript) = self.api.get_transcript(candidate.id).await? else {
                continue;
            };
            let excerpts =
                find_excerpts(&transcript, &input.query, input.case_sensitive, MAX_EXCERPTS_PER_CALL);
            if !excerpts.is_empty() {
                matches.push((candidate, excerpts));
            }
        }

        if matches.is_empty() {
            return Ok(ToolResult::success(
                &call.id,
                self.name(),
                format!("No transcripts found containing '{}'.", input.query),
            ));
        }

        let mut lines = vec![format!("# Search Results for '{}'", input.query), String::new()];
        lines.push(format!("Found {} calls with matching content", matches.len()));
        lines.push(String::new());

        for (candidate, excerpts) in &matches {
            lines.push(format!("## Call {}", candidate.id));
            lines.push(format!("- **Date**: {}", format_datetime(candidate.started_at)));
            lines.push(format!(
                "- **Direction**: {}",
                candidate.direction.as_deref().unwrap_or("None")
            ));
            lines.push(String::new());
            lines.push("**Matching excerpts:**".to_string());
            lines.extend(excerpts.iter().map(|e| format!("> {}", e)));
            lines.push(String::new());
        }

        Ok(ToolResult::success(&call.id, self.name(), lines.join("\n"))
            .with_metadata("searched", candidates.len())
            .with_metadata("matched", matches.len()))
    }
}
