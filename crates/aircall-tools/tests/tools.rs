mod common;

use aircall_core::tools::{Tool, ToolCall, ToolError};
use aircall_core::AircallError;
use aircall_tools::{
    AskTool, CallInsightsTool, GetSummaryTool, GetTranscriptTool, ListCallsTool,
    SearchTranscriptsTool, default_registry,
};
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use common::{FakeApi, call};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

const JAN_15: i64 = 1705312800;

fn tool_call(name: &str, args: Value) -> ToolCall {
    ToolCall::from_json("call-1", name, args)
}

fn support_api() -> FakeApi {
    FakeApi::new()
        .with_call(call(1, 125, JAN_15))
        .with_call(call(2, 40, JAN_15 + 3600))
        .with_transcript(
            1,
            &[
                ("external", "Hi, I have a question about pricing"),
                ("internal", "Sure, our pricing starts at ten dollars"),
                ("external", "Thanks"),
            ],
        )
        .with_transcript(2, &[("external", "My invoice looks wrong")])
}

// Wednesday 2024-01-17 15:30:00 local
fn fixed_now() -> DateTime<Local> {
    Local
        .from_local_datetime(
            &NaiveDate::from_ymd_opt(2024, 1, 17)
                .unwrap()
                .and_hms_opt(15, 30, 0)
                .unwrap(),
        )
        .earliest()
        .unwrap()
}

#[test]
fn test_default_registry_exposes_all_tools() {
    let registry = default_registry(Arc::new(FakeApi::new()));
    assert_eq!(registry.len(), 7);
    for name in [
        "aircall_list_calls",
        "aircall_get_call",
        "aircall_get_transcript",
        "aircall_search_transcripts",
        "aircall_get_summary",
        "aircall_get_call_insights",
        "aircall_ask",
    ] {
        assert!(registry.has_tool(name), "missing {}", name);
    }
}

#[tokio::test]
async fn test_list_calls_markdown_pages_by_offset() {
    let api = Arc::new(support_api().with_total(50));
    let tool = ListCallsTool::new(api.clone());

    let result = tool
        .execute_with_timing(&tool_call("aircall_list_calls", json!({"limit": 10, "offset": 20})))
        .await
        .unwrap();

    assert!(result.success);
    let text = result.text();
    assert!(text.starts_with("# Aircall Calls"));
    assert!(text.contains("Showing 2 calls (offset: 20)"));
    assert!(text.contains("*Use offset=30 for next page*"));
    assert!(text.contains("## Call 1"));

    let query = api.last_query().unwrap();
    assert_eq!(query.page, 3);
    assert_eq!(query.per_page, 10);
}

#[tokio::test]
async fn test_list_calls_json_applies_client_filters() {
    let api = Arc::new(support_api());
    let tool = ListCallsTool::new(api);

    let result = tool
        .execute_with_timing(&tool_call(
            "aircall_list_calls",
            json!({"min_duration": 60, "tags": ["VIP"], "response_format": "json"}),
        ))
        .await
        .unwrap();

    let body: Value = serde_json::from_str(&result.text()).unwrap();
    assert_eq!(body["count"], 1);
    assert_eq!(body["has_more"], true);
    assert_eq!(body["calls"][0]["id"], 1);
}

#[tokio::test]
async fn test_list_calls_empty_and_invalid() {
    let tool = ListCallsTool::new(Arc::new(FakeApi::new()));

    let empty = tool
        .execute_with_timing(&tool_call("aircall_list_calls", json!({})))
        .await
        .unwrap();
    assert_eq!(empty.text(), "No calls found matching the specified criteria.");

    let invalid = tool
        .execute_with_timing(&tool_call("aircall_list_calls", json!({"limit": 500})))
        .await
        .unwrap();
    assert!(!invalid.success);
    assert_eq!(
        invalid.text(),
        "Error: Invalid parameters - limit must be between 1 and 100"
    );
}

#[tokio::test]
async fn test_get_transcript_formats() {
    let api = Arc::new(support_api());
    let tool = GetTranscriptTool::new(api.clone());

    let text = tool
        .execute_with_timing(&tool_call("aircall_get_transcript", json!({"call_id": 2})))
        .await
        .unwrap();
    assert_eq!(text.text(), "Customer: My invoice looks wrong");

    let structured = tool
        .execute_with_timing(&tool_call(
            "aircall_get_transcript",
            json!({"call_id": 1, "format": "structured"}),
        ))
        .await
        .unwrap();
    assert!(structured.text().contains("[1.5s] Agent: Sure, our pricing starts at ten dollars"));

    let raw = tool
        .execute_with_timing(&tool_call("aircall_get_transcript", json!({"call_id": 2, "format": "raw"})))
        .await
        .unwrap();
    let body: Value = serde_json::from_str(&raw.text()).unwrap();
    assert_eq!(body["id"], 2);

    let missing = tool
        .execute_with_timing(&tool_call("aircall_get_transcript", json!({"call_id": 99})))
        .await
        .unwrap();
    assert!(missing.success);
    assert_eq!(
        missing.text(),
        "No transcript available for call 99. The call may not have been recorded or transcribed."
    );
}

#[tokio::test]
async fn test_get_summary_missing_and_api_error() {
    let api = Arc::new(
        FakeApi::new()
            .with_summary(1, "Customer asked about pricing.")
            .failing(3, AircallError::from_status(403, "", 60)),
    );
    let tool = GetSummaryTool::new(api);

    let found = tool
        .execute_with_timing(&tool_call("aircall_get_summary", json!({"call_id": 1})))
        .await
        .unwrap();
    assert!(found.text().contains("Customer asked about pricing."));

    let missing = tool
        .execute_with_timing(&tool_call("aircall_get_summary", json!({"call_id": 2})))
        .await
        .unwrap();
    assert_eq!(
        missing.text(),
        "No summary available for call 2. The summary may still be processing or unavailable."
    );

    let denied = tool
        .execute_with_timing(&tool_call("aircall_get_summary", json!({"call_id": 3})))
        .await
        .unwrap();
    assert!(!denied.success);
    assert_eq!(denied.text(), "Error: Permission denied for this resource");
}

#[tokio::test]
async fn test_call_insights_makes_three_requests() {
    let api = Arc::new(support_api().with_summary(1, "Pricing question."));
    let tool = CallInsightsTool::new(api.clone());

    let result = tool
        .execute_with_timing(&tool_call("aircall_get_call_insights", json!({"call_id": 1})))
        .await
        .unwrap();

    let text = result.text();
    assert!(text.starts_with("# Call Insights: 1"));
    assert!(text.contains("Pricing question."));
    assert!(text.contains("Customer: Thanks"));
    assert_eq!(api.request_count(), 3);
}

#[tokio::test]
async fn test_search_by_ids_skips_failed_lookups() {
    let api = Arc::new(support_api().failing(7, AircallError::from_status(404, "", 60)));
    let tool = SearchTranscriptsTool::new(api);

    let result = tool
        .execute_with_timing(&tool_call(
            "aircall_search_transcripts",
            json!({"query": "PRICING", "call_ids": [7, 1, 2]}),
        ))
        .await
        .unwrap();

    let text = result.text();
    assert!(text.starts_with("# Search Results for 'PRICING'"));
    assert!(text.contains("Found 1 calls with matching content"));
    assert!(text.contains("> Customer: Hi, I have a question about pricing"));
    assert!(!text.contains("## Call 2"));
    assert_eq!(result.metadata["searched"], 2);
}

#[tokio::test]
async fn test_search_case_sensitive_and_no_match() {
    let tool = SearchTranscriptsTool::new(Arc::new(support_api()));

    let result = tool
        .execute_with_timing(&tool_call(
            "aircall_search_transcripts",
            json!({"query": "PRICING", "case_sensitive": true}),
        ))
        .await
        .unwrap();
    assert_eq!(result.text(), "No transcripts found containing 'PRICING'.");

    let short = tool
        .execute_with_timing(&tool_call("aircall_search_transcripts", json!({"query": "p"})))
        .await
        .unwrap();
    assert_eq!(
        short.text(),
        "Error: Invalid parameters - query must be between 2 and 200 characters"
    );
}

#[tokio::test]
async fn test_ask_short_question() {
    let tool = AskTool::new(Arc::new(FakeApi::new()));
    let result = tool
        .execute_with_timing(&tool_call("aircall_ask", json!({"question": "hi"})))
        .await
        .unwrap();
    assert!(result.success);
    assert_eq!(result.text(), "Please provide a question with at least 3 characters.");
}

#[tokio::test]
async fn test_ask_resolves_dates_and_searches() {
    let api = Arc::new(support_api());
    let tool = AskTool::new(api.clone()).with_clock(fixed_now);

    let result = tool
        .execute_with_timing(&tool_call(
            "aircall_ask",
            json!({"question": "Show me calls mentioning pricing from yesterday"}),
        ))
        .await
        .unwrap();

    let text = result.text();
    assert!(text.starts_with("# Found 1 call(s) mentioning 'pricing'"));
    assert!(text.contains("*on 2024-01-16*"));
    assert!(text.contains("> Agent: Sure, our pricing starts at ten dollars"));

    let query = api.last_query().unwrap();
    let (from, to) = (query.from.unwrap(), query.to.unwrap());
    assert_eq!(to - from, 86399);
}

#[tokio::test]
async fn test_ask_without_terms_lists_calls() {
    let tool = AskTool::new(Arc::new(support_api())).with_clock(fixed_now);

    let result = tool
        .execute_with_timing(&tool_call("aircall_ask", json!({"question": "calls today"})))
        .await
        .unwrap();

    let text = result.text();
    assert!(text.starts_with("# 2 call(s) found"));
    assert!(text.contains("*on 2024-01-17*"));
}

#[tokio::test]
async fn test_ask_reports_no_matches() {
    let tool = AskTool::new(Arc::new(support_api())).with_clock(fixed_now);

    let result = tool
        .execute_with_timing(&tool_call("aircall_ask", json!({"question": "any calls about refunds"})))
        .await
        .unwrap();

    assert_eq!(
        result.text(),
        "No calls found mentioning 'refunds'. Searched 2 calls, but none contained matching content in their transcripts."
    );
}

#[tokio::test(start_paused = true)]
async fn test_ask_times_out_behind_rate_limiter() {
    let mut api = support_api().rate_limited(2, Duration::from_secs(600));
    for id in 3..=6 {
        api = api.with_call(call(id, 10, JAN_15));
    }
    let tool = AskTool::new(Arc::new(api)).with_clock(fixed_now);

    let result = tool
        .execute_with_timing(&tool_call("aircall_ask", json!({"question": "pricing"})))
        .await
        .unwrap();

    assert_eq!(
        result.text(),
        "Search timed out after 60 seconds. Try narrowing your date range or being more specific."
    );
}

#[tokio::test]
async fn test_ask_reports_api_failure_with_context() {
    let api = support_api().failing_list(AircallError::from_status(403, "", 60));
    let tool = AskTool::new(Arc::new(api)).with_clock(fixed_now);

    let result = tool
        .execute_with_timing(&tool_call("aircall_ask", json!({"question": "pricing"})))
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(
        result.text(),
        "Error accessing Aircall: Permission denied for this resource"
    );
}

#[tokio::test]
async fn test_ask_propagates_shutdown() {
    let api = support_api().rate_limited(1, Duration::from_secs(600));
    api.shutdown.cancel();
    let tool = AskTool::new(Arc::new(api)).with_clock(fixed_now);

    let err = tool
        .execute_with_timing(&tool_call("aircall_ask", json!({"question": "pricing"})))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::Cancelled));
}
