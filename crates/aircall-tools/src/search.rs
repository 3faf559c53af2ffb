//! Transcript text search

use crate::format::role_label;
use aircall_core::client::Transcript;
use once_cell::sync::Lazy;
use regex::Regex;

/// Phrases dropped from a question before searching transcripts
const FILLER_PHRASES: &[&str] = &[
    "were there",
    "was there",
    "are there",
    "is there",
    "any calls",
    "calls",
    "call",
    "about",
    "regarding",
    "mentioning",
    "where",
    "what",
    "which",
    "how many",
    "show me",
    "find",
    "get",
    "list",
    "search for",
];

static FILLERS: Lazy<Vec<Regex>> = Lazy::new(|| {
    FILLER_PHRASES
        .iter()
        .map(|phrase| Regex::new(&format!(r"(?i)\b{}\b", regex::escape(phrase))).expect("valid regex"))
        .collect()
});

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Lines of a transcript containing `query`, rendered as `Speaker: text`.
///
/// Matching is a plain substring test. At most `max` excerpts are returned.
pub fn find_excerpts(
    transcript: &Transcript,
    query: &str,
    case_sensitive: bool,
    max: usize,
) -> Vec<String> {
    let needle = if case_sensitive {
        query.to_string()
    } else {
        query.to_lowercase()
    };

    transcript
        .utterances
        .iter()
        .filter(|u| {
            if case_sensitive {
                u.text().contains(&needle)
            } else {
                u.text().to_lowercase().contains(&needle)
            }
        })
        .take(max)
        .map(|u| format!("{}: {}", role_label(u.participant()), u.text()))
        .collect()
}

/// Reduce a question to the words worth searching for
pub fn extract_search_terms(question: &str) -> String {
    let mut terms = question.to_string();
    for filler in FILLERS.iter() {
        terms = filler.replace_all(&terms, "").into_owned();
    }
    let terms = WHITESPACE.replace_all(&terms, " ");
    terms
        .trim()
        .trim_matches(|c| matches!(c, '?' | '.' | ',' | '!'))
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aircall_core::client::Utterance;
    use serde_json::Value;

    fn transcript() -> Transcript {
        let lines = [
            ("internal", "Thanks for calling about Pricing"),
            ("external", "I have a pricing question"),
            ("ai_voice_agent", "pricing pricing"),
            ("bot", "PRICING again"),
        ];
        Transcript {
            utterances: lines
                .iter()
                .map(|(p, t)| Utterance {
                    participant_type: Some(p.to_string()),
                    text: Some(t.to_string()),
                    ..Utterance::default()
                })
                .collect(),
            raw: Value::Null,
        }
    }

    #[test]
    fn test_case_insensitive_search() {
        let excerpts = find_excerpts(&transcript(), "pricing", false, 5);
        assert_eq!(
            excerpts,
            vec![
                "Agent: Thanks for calling about Pricing",
                "Customer: I have a pricing question",
                "AI Assistant: pricing pricing",
                "Unknown: PRICING again",
            ]
        );
    }

    #[test]
    fn test_case_sensitive_search_and_cap() {
        let excerpts = find_excerpts(&transcript(), "Pricing", true, 5);
        assert_eq!(excerpts, vec!["Agent: Thanks for calling about Pricing"]);

        assert_eq!(find_excerpts(&transcript(), "pricing", false, 2).len(), 2);
    }

    #[test]
    fn test_extract_search_terms() {
        assert_eq!(
            extract_search_terms("Were there any calls about AI Assist Pro ?"),
            "AI Assist Pro"
        );
        assert_eq!(extract_search_terms("Show me calls mentioning refunds"), "refunds");
        assert_eq!(extract_search_terms("calls"), "");
    }
}
