//! `aircall_get_summary`: AI-generated call summary

use crate::format::{ResponseFormat, to_pretty_json};
use crate::params;
use aircall_core::CallCenterApi;
use aircall_core::tools::{Tool, ToolCall, ToolError, ToolParameter, ToolResult, ToolSchema};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

pub struct GetSummaryTool {
    api: Arc<dyn CallCenterApi>,
}

impl GetSummaryTool {
    pub fn new(api: Arc<dyn CallCenterApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Tool for GetSummaryTool {
    fn name(&self) -> &str {
        "aircall_get_summary"
    }

    fn description(&self) -> &str {
        "Get the AI-generated summary for a specific call."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            self.name(),
            self.description(),
            vec![
                ToolParameter::integer("call_id", "The Aircall call ID").with_property("minimum", 1),
                ToolParameter::string("response_format", "Output format")
                    .with_default("markdown")
                    .with_enum(&["markdown", "json"]),
            ],
        )
    }

    fn validate(&self, call: &ToolCall) -> Result<(), ToolError> {
        params::call_id(call)?;
        params::parsed::<ResponseFormat>(call, "response_format")?;
        Ok(())
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let call_id = params::call_id(call)?;
        let format: ResponseFormat = params::parsed(call, "response_format")?.unwrap_or_default();

        let Some(summary) = self.api.get_summary(call_id).await? else {
            return Ok(ToolResult::success(
                &call.id,
                self.name(),
                format!(
                    "No summary available for call {}. The summary may still be processing or unavailable.",
                    call_id
                ),
            ));
        };

        let output = match format {
            ResponseFormat::Markdown => format!(
                "# Summary for Call {}\n\n{}",
                call_id,
                summary.content.as_deref().unwrap_or("No summary content.")
            ),
            ResponseFormat::Json => to_pretty_json(&json!({
                "call_id": call_id,
                "summary": summary.content,
            })),
        };

        Ok(ToolResult::success(&call.id, self.name(), output))
    }
}
