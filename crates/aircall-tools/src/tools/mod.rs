//! Aircall tools

pub mod ask;
pub mod call_insights;
pub mod get_call;
pub mod get_summary;
pub mod get_transcript;
pub mod list_calls;
pub mod search_transcripts;

pub use ask::AskTool;
pub use call_insights::CallInsightsTool;
pub use get_call::GetCallTool;
pub use get_summary::GetSummaryTool;
pub use get_transcript::GetTranscriptTool;
pub use list_calls::ListCallsTool;
pub use search_transcripts::SearchTranscriptsTool;
