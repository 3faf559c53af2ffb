//! `aircall_get_call_insights`: call metadata, summary and transcript together

use crate::format::{
    ResponseFormat, SpeakerLabels, call_detail_lines, format_datetime, format_transcript_text,
    to_pretty_json,
};
use crate::params;
use aircall_core::CallCenterApi;
use aircall_core::tools::{Tool, ToolCall, ToolError, ToolParameter, ToolResult, ToolSchema};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

pub struct CallInsightsTool {
    api: Arc<dyn CallCenterApi>,
}

impl CallInsightsTool {
    pub fn new(api: Arc<dyn CallCenterApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Tool for CallInsightsTool {
    fn name(&self) -> &str {
        "aircall_get_call_insights"
    }

    fn description(&self) -> &str {
        "Get combined insights for a call including metadata, transcript, and summary. \
         Useful for getting a complete picture of a call in a single request."
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

        // Three sequential requests, each admitted by the limiter
        let details = self.api.get_call(call_id).await?;
        let transcript = self.api.get_transcript(call_id).await?;
        let summary = self.api.get_summary(call_id).await?;

        let transcript_text =
            transcript.map(|t| format_transcript_text(&t, SpeakerLabels::Role, false));

        let output = match format {
            ResponseFormat::Markdown => {
                let mut lines = vec![format!("# Call Insights: {}", call_id), String::new()];
                lines.push("## Call Details".to_string());
                lines.extend(call_detail_lines(&details));

                lines.push(String::new());
                lines.push("## Summary".to_string());
                lines.push(match &summary {
                    Some(s) => s
                        .content
                        .clone()
                        .unwrap_or_else(|| "No summary content.".to_string()),
                    None => "*No summary available*".to_string(),
                });

                lines.push(String::new());
                lines.push("## Transcript".to_string());
                lines.push(
                    transcript_text
                        .unwrap_or_else(|| "*No transcript available*".to_string()),
                );

                lines.join("\n")
            }
            ResponseFormat::Json => to_pretty_json(&json!({
                "call_id": call_id,
                "direction": details.direction,
                "duration_seconds": details.duration,
                "started_at": details.started_at,
                "date": format_datetime(details.started_at),
                "agent_name": details.agent_name(),
                "number_name": details.number_name(),
                "tags": details.tag_names(),
                "summary": summary.and_then(|s| s.content),
                "transcript": transcript_text,
            })),
        };

        Ok(ToolResult::success(&call.id, self.name(), output))
    }
}
