//! `aircall_get_transcript`: transcript in text, structured or raw form

use crate::format::{SpeakerLabels, TranscriptFormat, format_transcript_text, to_pretty_json};
use crate::params;
use aircall_core::CallCenterApi;
use aircall_core::tools::{Tool, ToolCall, ToolError, ToolParameter, ToolResult, ToolSchema};
use async_trait::async_trait;
use std::sync::Arc;

struct GetTranscriptInput {
    call_id: i64,
    format: TranscriptFormat,
    speaker_labels: SpeakerLabels,
}

impl GetTranscriptInput {
    fn parse(call: &ToolCall) -> Result<Self, ToolError> {
        Ok(Self {
            call_id: params::call_id(call)?,
            format: params::parsed(call, "format")?.unwrap_or_default(),
            speaker_labels: params::parsed(call, "speaker_labels")?.unwrap_or_default(),
        })
    }
}

pub struct GetTranscriptTool {
    api: Arc<dyn CallCenterApi>,
}

impl GetTranscriptTool {
    pub fn new(api: Arc<dyn CallCenterApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Tool for GetTranscriptTool {
    fn name(&self) -> &str {
        "aircall_get_transcript"
    }

    fn description(&self) -> &str {
        "Get the transcript for a specific call as readable text, text with timestamps, \
         or the raw API payload."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            self.name(),
            self.description(),
            vec![
                ToolParameter::integer("call_id", "The Aircall call ID").with_property("minimum", 1),
                ToolParameter::string(
                    "format",
                    "Transcript format: 'text' (readable), 'structured' (with timestamps), or 'raw'",
                )
                .with_default("text")
                .with_enum(&["text", "structured", "raw"]),
                ToolParameter::string(
                    "speaker_labels",
                    "Speaker labels: 'role' (Agent/Customer), 'type' (internal/external), or 'detailed'",
                )
                .with_default("role")
                .with_enum(&["role", "type", "detailed"]),
            ],
        )
    }

    fn validate(&self, call: &ToolCall) -> Result<(), ToolError> {
        GetTranscriptInput::parse(call).map(|_| ())
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let input = GetTranscriptInput::parse(call)?;

        let Some(transcript) = self.api.get_transcript(input.call_id).await? else {
            return Ok(ToolResult::success(
                &call.id,
                self.name(),
                format!(
                    "No transcript available for call {}. The call may not have been recorded or transcribed.",
                    input.call_id
                ),
            ));
        };

        let output = match input.format {
            TranscriptFormat::Raw => to_pretty_json(&transcript.raw),
            TranscriptFormat::Text => {
                format_transcript_text(&transcript, input.speaker_labels, false)
            }
            TranscriptFormat::Structured => {
                format_transcript_text(&transcript, input.speaker_labels, true)
            }
        };

        Ok(ToolResult::success(&call.id, self.name(), output)
            .with_metadata("utterances", transcript.utterances.len()))
    }
}
