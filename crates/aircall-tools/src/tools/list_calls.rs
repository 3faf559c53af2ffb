//! `aircall_list_calls`: paginated, filtered call listing

use crate::format::{ResponseFormat, call_detail_lines, call_json, to_pretty_json};
use crate::params;
use aircall_core::client::{Call, CallDirection, ListCallsQuery};
use aircall_core::tools::{Tool, ToolCall, ToolError, ToolParameter, ToolResult, ToolSchema};
use aircall_core::CallCenterApi;
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
struct ListCallsInput {
    limit: i64,
    offset: i64,
    direction: Option<CallDirection>,
    from: Option<i64>,
    to: Option<i64>,
    min_duration: Option<i64>,
    tags: Option<Vec<String>>,
    response_format: ResponseFormat,
}

impl ListCallsInput {
    fn parse(call: &ToolCall) -> Result<Self, ToolError> {
        let direction = call
            .get_typed::<String>("direction")?
            .map(|d| {
                d.parse::<CallDirection>().map_err(|_| {
                    ToolError::InvalidArguments("direction must be 'inbound' or 'outbound'".into())
                })
            })
            .transpose()?;

        Ok(Self {
            limit: params::int_in_range(call, "limit", 20, 1, 100)?,
            offset: params::non_negative(call, "offset")?.unwrap_or(0),
            direction,
            from: params::date(call, "from_date")?,
            to: params::date(call, "to_date")?,
            min_duration: params::non_negative(call, "min_duration")?,
            tags: params::list(call, "tags", 10)?,
            response_format: params::parsed(call, "response_format")?.unwrap_or_default(),
        })
    }
}

/// Lists calls with pagination, server-side date/direction filters and
/// client-side duration/tag filters
pub struct ListCallsTool {
    api: Arc<dyn CallCenterApi>,
}

impl ListCallsTool {
    pub fn new(api: Arc<dyn CallCenterApi>) -> Self {
        Self { api }
    }
}

fn apply_filters(calls: Vec<Call>, input: &ListCallsInput) -> Vec<Call> {
    let wanted_tags: Option<HashSet<String>> = input
        .tags
        .as_ref()
        .filter(|tags| !tags.is_empty())
        .map(|tags| tags.iter().map(|t| t.to_lowercase()).collect());

    calls
        .into_iter()
        .filter(|c| match input.min_duration {
            Some(min) if min > 0 => c.duration_secs() >= min,
            _ => true,
        })
        .filter(|c| match &wanted_tags {
            Some(wanted) => c
                .tag_names()
                .iter()
                .any(|name| wanted.contains(&name.to_lowercase())),
            None => true,
        })
        .collect()
}

#[async_trait]
impl Tool for ListCallsTool {
    fn name(&self) -> &str {
        "aircall_list_calls"
    }

    fn description(&self) -> &str {
        "List calls from Aircall with filtering and pagination. Returns call metadata \
         (id, duration, direction, date, agent, tags)."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            self.name(),
            self.description(),
            vec![
                ToolParameter::integer("limit", "Maximum results to return (1-100)")
                    .with_default(20)
                    .with_property("minimum", 1)
                    .with_property("maximum", 100),
                ToolParameter::integer("offset", "Number of results to skip for pagination")
                    .with_default(0)
                    .with_property("minimum", 0),
                ToolParameter::string("direction", "Filter by call direction")
                    .optional()
                    .with_enum(&["inbound", "outbound"]),
                ToolParameter::string(
                    "from_date",
                    "Start date (ISO format: 2024-01-15 or Unix timestamp)",
                )
                .optional(),
                ToolParameter::string("to_date", "End date (ISO format: 2024-01-15 or Unix timestamp)")
                    .optional(),
                ToolParameter::integer("min_duration", "Minimum call duration in seconds")
                    .optional()
                    .with_property("minimum", 0),
                ToolParameter::array("tags", "Filter by tag names", "string")
                    .optional()
                    .with_property("maxItems", 10),
                ToolParameter::string("response_format", "Output format")
                    .with_default("markdown")
                    .with_enum(&["markdown", "json"]),
            ],
        )
    }

    fn validate(&self, call: &ToolCall) -> Result<(), ToolError> {
        ListCallsInput::parse(call).map(|_| ())
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let input = ListCallsInput::parse(call)?;

        let query = ListCallsQuery {
            page: (input.offset / input.limit + 1) as u32,
            per_page: input.limit as u32,
            direction: input.direction,
            from: input.from,
            to: input.to,
            ..ListCallsQuery::default()
        };
        debug!("Listing calls: {:?}", query);

        let page = self.api.list_calls(&query).await?;
        let total_hint = page.total();
        let calls = apply_filters(page.calls, &input);

        if calls.is_empty() {
            return Ok(ToolResult::success(
                &call.id,
                self.name(),
                "No calls found matching the specified criteria.",
            ));
        }

        let total = total_hint.map(|t| t as i64).unwrap_or(calls.len() as i64);
        let has_more = input.offset + (calls.len() as i64) < total;

        let output = match input.response_format {
            ResponseFormat::Markdown => {
                let mut lines = vec!["# Aircall Calls".to_string(), String::new()];
                lines.push(format!("Showing {} calls (offset: {})", calls.len(), input.offset));
                if has_more {
                    lines.push(format!("*Use offset={} for next page*", input.offset + input.limit));
                }
                lines.push(String::new());

                for c in &calls {
                    lines.push(format!("## Call {}", c.id));
                    lines.extend(call_detail_lines(c));
                    lines.push(String::new());
                }
                lines.join("\n")
            }
            ResponseFormat::Json => to_pretty_json(&json!({
                "total": total,
                "count": calls.len(),
                "offset": input.offset,
                "has_more": has_more,
                "calls": calls.iter().map(call_json).collect::<Vec<_>>(),
            })),
        };

        Ok(ToolResult::success(&call.id, self.name(), output).with_metadata("count", calls.len()))
    }
}
