//! Text rendering shared by the tools

use aircall_core::client::{Call, Transcript, Utterance};
use chrono::{Local, TimeZone};
use serde_json::{Value, json};
use std::str::FromStr;

/// Output format for tool responses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    #[default]
    Markdown,
    Json,
}

impl FromStr for ResponseFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "markdown" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            _ => Err("response_format must be 'markdown' or 'json'".to_string()),
        }
    }
}

/// Transcript rendering mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TranscriptFormat {
    /// Readable conversation
    #[default]
    Text,
    /// Conversation with `[start]` timestamps
    Structured,
    /// API payload as-is
    Raw,
}

impl FromStr for TranscriptFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "structured" => Ok(Self::Structured),
            "raw" => Ok(Self::Raw),
            _ => Err("format must be one of: text, structured, raw".to_string()),
        }
    }
}

/// How speakers are labelled in transcripts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpeakerLabels {
    /// Agent / Customer / AI Assistant
    #[default]
    Role,
    /// Raw participant type
    Type,
    /// Participant type plus agent id or phone number
    Detailed,
}

impl FromStr for SpeakerLabels {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "role" => Ok(Self::Role),
            "type" => Ok(Self::Type),
            "detailed" => Ok(Self::Detailed),
            _ => Err("speaker_labels must be one of: role, type, detailed".to_string()),
        }
    }
}

/// Render a Unix timestamp in local time, `Unknown` when absent
pub fn format_datetime(timestamp: Option<i64>) -> String {
    match timestamp.filter(|ts| *ts != 0) {
        Some(ts) => match Local.timestamp_opt(ts, 0).single() {
            Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => "Unknown".to_string(),
        },
        None => "Unknown".to_string(),
    }
}

/// Render seconds as `Xm Ys`, or `Ys` under a minute
pub fn format_duration(seconds: i64) -> String {
    if seconds <= 0 {
        return "0s".to_string();
    }
    let (minutes, secs) = (seconds / 60, seconds % 60);
    if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Role label for a participant type
pub fn role_label(participant_type: &str) -> &'static str {
    match participant_type {
        "internal" => "Agent",
        "ai_voice_agent" => "AI Assistant",
        "external" => "Customer",
        _ => "Unknown",
    }
}

/// Speaker label for an utterance
pub fn speaker_label(utterance: &Utterance, labels: SpeakerLabels) -> String {
    let participant = utterance.participant();
    match labels {
        SpeakerLabels::Role => role_label(participant).to_string(),
        SpeakerLabels::Type => participant.to_string(),
        SpeakerLabels::Detailed => {
            if let Some(agent_id) = utterance.ai_voice_agent_id.as_deref().filter(|s| !s.is_empty()) {
                let short: String = agent_id.chars().take(8).collect();
                format!("{} ({}...)", participant, short)
            } else if let Some(phone) = utterance.phone_number.as_deref().filter(|s| !s.is_empty()) {
                format!("{} ({})", participant, phone)
            } else {
                participant.to_string()
            }
        }
    }
}

/// Render a transcript as one `Speaker: text` line per utterance.
///
/// Utterances with blank text are skipped.
pub fn format_transcript_text(
    transcript: &Transcript,
    labels: SpeakerLabels,
    include_timestamps: bool,
) -> String {
    if transcript.utterances.is_empty() {
        return "No transcript content available.".to_string();
    }

    transcript
        .utterances
        .iter()
        .filter_map(|u| {
            let text = u.text().trim();
            if text.is_empty() {
                return None;
            }
            let speaker = speaker_label(u, labels);
            Some(if include_timestamps {
                format!("[{:.1}s] {}: {}", u.start_time.unwrap_or(0.0), speaker, text)
            } else {
                format!("{}: {}", speaker, text)
            })
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Markdown bullet lines describing a call
pub fn call_detail_lines(call: &Call) -> Vec<String> {
    let mut lines = vec![
        format!("- **Direction**: {}", call.direction.as_deref().unwrap_or("unknown")),
        format!("- **Duration**: {}", format_duration(call.duration_secs())),
        format!("- **Date**: {}", format_datetime(call.started_at)),
    ];
    if let Some(agent) = call.agent_name() {
        lines.push(format!("- **Agent**: {}", agent));
    }
    if let Some(number) = call.number_name() {
        lines.push(format!("- **Number**: {}", number));
    }
    let tags = call.tag_names();
    if !tags.is_empty() {
        lines.push(format!("- **Tags**: {}", tags.join(", ")));
    }
    lines
}

/// Short markdown block used by the overview listings in `aircall_ask`
pub fn call_overview_lines(call: &Call) -> Vec<String> {
    let mut lines = vec![
        format!("## Call {}", call.id),
        format!("- **Date**: {}", format_datetime(call.started_at)),
        format!("- **Direction**: {}", call.direction.as_deref().unwrap_or("unknown")),
        format!("- **Duration**: {}", format_duration(call.duration_secs())),
    ];
    if let Some(agent) = call.agent_name() {
        lines.push(format!("- **Agent**: {}", agent));
    }
    lines
}

/// JSON object describing a call
pub fn call_json(call: &Call) -> Value {
    json!({
        "id": call.id,
        "direction": call.direction,
        "duration_seconds": call.duration,
        "started_at": call.started_at,
        "date": format_datetime(call.started_at),
        "agent_name": call.agent_name(),
        "number_name": call.number_name(),
        "tags": call.tag_names(),
    })
}

/// Pretty-print JSON with two-space indentation
pub fn to_pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utterance(participant: &str, text: &str, start: f64) -> Utterance {
        Utterance {
            participant_type: Some(participant.to_string()),
            text: Some(text.to_string()),
            start_time: Some(start),
            ..Utterance::default()
        }
    }

    fn transcript(utterances: Vec<Utterance>) -> Transcript {
        Transcript {
            utterances,
            raw: Value::Null,
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(45), "45s");
        assert_eq!(format_duration(60), "1m 0s");
        assert_eq!(format_duration(125), "2m 5s");
        assert_eq!(format_duration(-3), "0s");
    }

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime(None), "Unknown");
        assert_eq!(format_datetime(Some(0)), "Unknown");

        let expected = Local
            .timestamp_opt(1705312800, 0)
            .unwrap()
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        assert_eq!(format_datetime(Some(1705312800)), expected);
    }

    #[test]
    fn test_role_labels() {
        assert_eq!(role_label("internal"), "Agent");
        assert_eq!(role_label("external"), "Customer");
        assert_eq!(role_label("ai_voice_agent"), "AI Assistant");
        assert_eq!(role_label("bot"), "Unknown");
    }

    #[test]
    fn test_detailed_labels() {
        let ai = Utterance {
            participant_type: Some("ai_voice_agent".into()),
            ai_voice_agent_id: Some("abcdef123456".into()),
            ..Utterance::default()
        };
        assert_eq!(speaker_label(&ai, SpeakerLabels::Detailed), "ai_voice_agent (abcdef12...)");

        let caller = Utterance {
            participant_type: Some("external".into()),
            phone_number: Some("+33123456789".into()),
            ..Utterance::default()
        };
        assert_eq!(speaker_label(&caller, SpeakerLabels::Detailed), "external (+33123456789)");
        assert_eq!(speaker_label(&caller, SpeakerLabels::Type), "external");
    }

    #[test]
    fn test_transcript_text_skips_blank_lines() {
        let t = transcript(vec![
            utterance("internal", " Hello ", 0.0),
            utterance("external", "   ", 1.0),
            utterance("external", "Hi", 2.5),
        ]);

        assert_eq!(
            format_transcript_text(&t, SpeakerLabels::Role, false),
            "Agent: Hello\nCustomer: Hi"
        );
        assert_eq!(
            format_transcript_text(&t, SpeakerLabels::Type, true),
            "[0.0s] internal: Hello\n[2.5s] external: Hi"
        );
    }

    #[test]
    fn test_empty_transcript() {
        assert_eq!(
            format_transcript_text(&transcript(vec![]), SpeakerLabels::Role, false),
            "No transcript content available."
        );
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("json".parse::<ResponseFormat>(), Ok(ResponseFormat::Json));
        assert!("xml".parse::<ResponseFormat>().is_err());
        assert_eq!("raw".parse::<TranscriptFormat>(), Ok(TranscriptFormat::Raw));
        assert_eq!("detailed".parse::<SpeakerLabels>(), Ok(SpeakerLabels::Detailed));
    }
}
