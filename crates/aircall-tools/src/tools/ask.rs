//! `aircall_ask`: answer a natural-language question about calls
//!
//! The question is split into a date range ("yesterday", "last 3 days", ...)
//! and search terms. Calls in the range are listed, then their transcripts are
//! searched concurrently. All transcript fetches still go through the shared
//! rate limiter, so a large range simply takes longer; the whole search is
//! bounded by [`SEARCH_TIMEOUT`].

use crate::dates::extract_date_from_query;
use crate::format::call_overview_lines;
use crate::search::{extract_search_terms, find_excerpts};
use aircall_core::client::{Call, ListCallsQuery};
use aircall_core::tools::{Tool, ToolCall, ToolError, ToolParameter, ToolResult, ToolSchema};
use aircall_core::{AircallError, CallCenterApi};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Upper bound on the concurrent transcript search
pub const SEARCH_TIMEOUT: Duration = Duration::from_secs(60);

const MAX_EXCERPTS_PER_CALL: usize = 3;
const MAX_LISTED_CALLS: usize = 10;

pub struct AskTool {
    api: Arc<dyn CallCenterApi>,
    clock: fn() -> DateTime<Local>,
}

impl AskTool {
    pub fn new(api: Arc<dyn CallCenterApi>) -> Self {
        Self {
            api,
            clock: Local::now,
        }
    }

    /// Resolve relative dates against a fixed clock
    pub fn with_clock(mut self, clock: fn() -> DateTime<Local>) -> Self {
        self.clock = clock;
        self
    }

    async fn search_call(&self, call: Call, terms: &str) -> Result<Option<(Call, Vec<String>)>, AircallError> {
        let Some(transcript) = self.api.get_transcript(call.id).await? else {
            return Ok(None);
        };
        let excerpts = find_excerpts(&transcript, terms, false, MAX_EXCERPTS_PER_CALL);
        Ok((!excerpts.is_empty()).then_some((call, excerpts)))
    }
}

#[async_trait]
impl Tool for AskTool {
    fn name(&self) -> &str {
        "aircall_ask"
    }

    fn description(&self) -> &str {
        "Ask a natural language question about your Aircall data. Handles date phrases \
         (\"today\", \"yesterday\", \"last week\", \"past 3 days\") and searches transcripts \
         for the remaining terms. Example: \"Show me calls mentioning pricing from yesterday\"."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            self.name(),
            self.description(),
            vec![
                ToolParameter::string("question", "Your question in natural language"),
                ToolParameter::integer("limit", "Maximum calls to analyze (1-50)")
                    .with_default(20)
                    .with_property("minimum", 1)
                    .with_property("maximum", 50),
            ],
        )
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let question = call.get_typed::<String>("question")?.unwrap_or_default();
        if question.trim().chars().count() < 3 {
            return Ok(ToolResult::success(
                &call.id,
                self.name(),
                "Please provide a question with at least 3 characters.",
            ));
        }
        let limit = call.get_typed::<i64>("limit")?.unwrap_or(20).clamp(1, 50);

        let (cleaned, range) = extract_date_from_query(&question, (self.clock)());
        let terms = extract_search_terms(&cleaned);
        let date_desc = range.map(|r| r.describe());
        debug!("Question terms: '{}', range: {:?}", terms, date_desc);

        let query = ListCallsQuery {
            per_page: limit as u32,
            from: range.map(|r| r.from_timestamp()),
            to: range.map(|r| r.to_timestamp()),
            ..ListCallsQuery::default()
        };
        let calls = match self.api.list_calls(&query).await {
            Ok(page) => page.calls,
            Err(AircallError::Cancelled) => return Err(ToolError::Cancelled),
            Err(e) => {
                return Ok(ToolResult::error(&call.id, self.name(), e.to_string())
                    .with_output(format!("Error accessing Aircall: {}", e)));
            }
        };

        if calls.is_empty() {
            let text = match &date_desc {
                Some(desc) => format!("No calls found {}.", desc),
                None => "No calls found.".to_string(),
            };
            return Ok(ToolResult::success(&call.id, self.name(), text));
        }

        let searched = calls.len();

        if terms.chars().count() < 2 {
            let mut lines = vec![format!("# {} call(s) found", searched)];
            if let Some(desc) = &date_desc {
                lines.push(format!("*{}*", desc));
            }
            lines.push(String::new());

            for c in calls.iter().take(MAX_LISTED_CALLS) {
                lines.extend(call_overview_lines(c));
                lines.push(String::new());
            }

            if searched > MAX_LISTED_CALLS {
                lines.push(format!("*...and {} more calls*", searched - MAX_LISTED_CALLS));
                lines.push(String::new());
                lines.push(
                    "Tip: Add a search term to find specific content (e.g., 'calls about pricing today')"
                        .to_string(),
                );
            }

            return Ok(ToolResult::success(&call.id, self.name(), lines.join("\n")));
        }

        info!("Searching {} transcripts for '{}'", searched, terms);
        let searches = calls.into_iter().map(|c| self.search_call(c, &terms));
        let results = match tokio::time::timeout(SEARCH_TIMEOUT, join_all(searches)).await {
            Ok(results) => results,
            Err(_) => {
                return Ok(ToolResult::success(
                    &call.id,
                    self.name(),
                    "Search timed out after 60 seconds. Try narrowing your date range or being more specific.",
                ));
            }
        };

        let mut matches = Vec::new();
        for result in results {
            match result {
                Ok(Some(found)) => matches.push(found),
                Ok(None) => {}
                Err(AircallError::Cancelled) => return Err(ToolError::Cancelled),
                // A failed transcript fetch only drops that call
                Err(e) => debug!("Skipping transcript: {}", e),
            }
        }

        if matches.is_empty() {
            let searched_msg = match &date_desc {
                Some(desc) => format!("Searched {} calls {}", searched, desc),
                None => format!("Searched {} calls", searched),
            };
            return Ok(ToolResult::success(
                &call.id,
                self.name(),
                format!(
                    "No calls found mentioning '{}'. {}, but none contained matching content in their transcripts.",
                    terms, searched_msg
                ),
            ));
        }

        let mut lines = vec![format!("# Found {} call(s) mentioning '{}'", matches.len(), terms)];
        if let Some(desc) = &date_desc {
            lines.push(format!("*{}*", desc));
        }
        lines.push(String::new());

        for (matched, excerpts) in &matches {
            lines.extend(call_overview_lines(matched));
            lines.push(String::new());
            lines.push("**Relevant excerpts:**".to_string());
            lines.extend(excerpts.iter().map(|e| format!("> {}", e)));
            lines.push(String::new());
        }

        Ok(ToolResult::success(&call.id, self.name(), lines.join("\n"))
            .with_metadata("searched", searched)
            .with_metadata("matched", matches.len()))
    }
}
