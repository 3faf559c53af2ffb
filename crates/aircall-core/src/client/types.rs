//! Aircall API response models
//!
//! Fields are lenient: anything the API may omit or send as `null` is
//! optional so a partial payload never fails a whole tool call.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Call direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallDirection {
    Inbound,
    Outbound,
}

impl CallDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }
}

impl fmt::Display for CallDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CallDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inbound" => Ok(Self::Inbound),
            "outbound" => Ok(Self::Outbound),
            other => Err(format!(
                "Invalid direction '{}'. Must be 'inbound' or 'outbound'",
                other
            )),
        }
    }
}

/// Object reference that only carries a display name (user, number)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    #[serde(default)]
    pub name: Option<String>,
}

/// Call tag
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub name: Option<String>,
}

/// A call record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Call {
    pub id: i64,
    #[serde(default)]
    pub direction: Option<String>,
    /// Duration in seconds
    #[serde(default)]
    pub duration: Option<i64>,
    /// Unix timestamp
    #[serde(default)]
    pub started_at: Option<i64>,
    #[serde(default)]
    pub user: Option<NamedRef>,
    #[serde(default)]
    pub number: Option<NamedRef>,
    #[serde(default)]
    pub tags: Option<Vec<Tag>>,
}

impl Call {
    /// Duration in seconds, zero when unknown
    pub fn duration_secs(&self) -> i64 {
        self.duration.unwrap_or(0)
    }

    /// Name of the agent who handled the call
    pub fn agent_name(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.name.as_deref())
    }

    /// Name of the Aircall number
    pub fn number_name(&self) -> Option<&str> {
        self.number.as_ref().and_then(|n| n.name.as_deref())
    }

    /// Tag names in API order
    pub fn tag_names(&self) -> Vec<&str> {
        self.tags
            .iter()
            .flatten()
            .filter_map(|t| t.name.as_deref())
            .collect()
    }
}

/// Pagination metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub current_page: Option<u64>,
    #[serde(default)]
    pub per_page: Option<u64>,
}

/// One page of `GET /calls`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallPage {
    #[serde(default)]
    pub calls: Vec<Call>,
    #[serde(default)]
    pub meta: Option<PageMeta>,
}

impl CallPage {
    /// Total matching calls as reported by the API, if any
    pub fn total(&self) -> Option<u64> {
        self.meta.as_ref().and_then(|m| m.total)
    }
}

/// Query parameters for `GET /calls`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCallsQuery {
    pub page: u32,
    pub per_page: u32,
    /// `asc` or `desc`
    pub order: String,
    pub direction: Option<CallDirection>,
    /// Unix timestamp lower bound
    pub from: Option<i64>,
    /// Unix timestamp upper bound
    pub to: Option<i64>,
}

impl Default for ListCallsQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
            order: "desc".to_string(),
            direction: None,
            from: None,
            to: None,
        }
    }
}

impl ListCallsQuery {
    /// Render as URL query pairs
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
            ("order", self.order.clone()),
        ];
        if let Some(direction) = self.direction {
            pairs.push(("direction", direction.to_string()));
        }
        if let Some(from) = self.from {
            pairs.push(("from", from.to_string()));
        }
        if let Some(to) = self.to {
            pairs.push(("to", to.to_string()));
        }
        pairs
    }
}

/// One transcript utterance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    /// `internal`, `external` or `ai_voice_agent`
    #[serde(default)]
    pub participant_type: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    /// Seconds from call start
    #[serde(default)]
    pub start_time: Option<f64>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub ai_voice_agent_id: Option<String>,
}

impl Utterance {
    pub fn participant(&self) -> &str {
        self.participant_type.as_deref().unwrap_or("unknown")
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// Call transcription
///
/// The raw payload is kept for callers that want the API response as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub utterances: Vec<Utterance>,
    pub raw: Value,
}

impl Transcript {
    /// Build from the `transcription` object; malformed utterances are skipped
    pub fn from_value(raw: Value) -> Self {
        let utterances = raw
            .pointer("/content/utterances")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|u| serde_json::from_value::<Utterance>(u.clone()).ok())
                    .collect()
            })
            .unwrap_or_default();
        Self { utterances, raw }
    }
}

/// AI-generated call summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub content: Option<String>,
}
