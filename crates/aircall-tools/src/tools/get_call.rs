//! `aircall_get_call`: single call details with optional transcript and summary

use crate::format::{
    ResponseFormat, SpeakerLabels, call_detail_lines, call_json, format_transcript_text,
    to_pretty_json,
};
use crate::params;
use aircall_core::CallCenterApi;
use aircall_core::tools::{Tool, ToolCall, ToolError, ToolParameter, ToolResult, ToolSchema};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

struct GetCallInput {
    call_id: i64,
    include_transcript: bool,
    include_summary: bool,
    response_format: ResponseFormat,
}

impl GetCallInput {
    fn parse(call: &ToolCall) -> Result<Self, ToolError> {
        Ok(Self {
            call_id: params::call_id(call)?,
            include_transcript: params::flag(call, "include_transcript")?,
            include_summary: params::flag(call, "include_summary")?,
            response_format: params::parsed(call, "response_format")?.unwrap_or_default(),
        })
    }
}

pub struct GetCallTool {
    api: Arc<dyn CallCenterApi>,
}

impl GetCallTool {
    pub fn new(api: Arc<dyn CallCenterApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Tool for GetCallTool {
    fn name(&self) -> &str {
        "aircall_get_call"
    }

    fn description(&self) -> &str {
        "Get detailed information about a specific call, optionally including its \
         transcript and AI summary."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            self.name(),
            self.description(),
            vec![
                ToolParameter::integer("call_id", "The Aircall call ID").with_property("minimum", 1),
                ToolParameter::boolean("include_transcript", "Include the call transcript")
                    .with_default(false),
                ToolParameter::boolean("include_summary", "Include the AI summary")
                    .with_default(false),
                ToolParameter::string("response_format", "Output format")
                    .with_default("markdown")
                    .with_enum(&["markdown", "json"]),
            ],
        )
    }

    fn validate(&self, call: &ToolCall) -> Result<(), ToolError> {
        GetCallInput::parse(call).map(|_| ())
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let input = GetCallInput::parse(call)?;

        let details = self.api.get_call(input.call_id).await?;
        let transcript = if input.include_transcript {
            self.api.get_transcript(input.call_id).await?
        } else {
            None
        };
        let summary = if input.include_summary {
            self.api.get_summary(input.call_id).await?
        } else {
            None
        };

        let transcript_text =
            transcript.map(|t| format_transcript_text(&t, SpeakerLabels::Role, false));

        let output = match input.response_format {
            ResponseFormat::Markdown => {
                let mut lines = vec![format!("# Call {}", details.id), String::new()];
                lines.extend(call_detail_lines(&details));

                if let Some(summary) = &summary {
                    lines.push(String::new());
                    lines.push("## Summary".to_string());
                    lines.push(
                        summary
                            .content
                            .clone()
                            .unwrap_or_else(|| "No summary content.".to_string()),
                    );
                }

                if let Some(text) = &transcript_text {
                    lines.push(String::new());
                    lines.push("## Transcript".to_string());
                    lines.push(text.clone());
                }

                lines.join("\n")
            }
            ResponseFormat::Json => {
                let mut value = call_json(&details);
                if let Value::Object(map) = &mut value {
                    if let Some(summary) = summary {
                        map.insert("summary".into(), summary.content.into());
                    }
                    if let Some(text) = transcript_text {
                        map.insert("transcript".into(), text.into());
                    }
                }
                to_pretty_json(&value)
            }
        };

        Ok(ToolResult::success(&call.id, self.name(), output))
    }
}
