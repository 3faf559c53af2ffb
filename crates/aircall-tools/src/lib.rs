//! Tool implementations for the Aircall MCP server
//!
//! Every tool is written against [`CallCenterApi`], so the same tools run on
//! the rate-limited HTTP client in production and on in-memory fakes in tests.

pub mod dates;
pub mod format;
pub mod params;
pub mod search;
pub mod tools;

pub use tools::{
    AskTool, CallInsightsTool, GetCallTool, GetSummaryTool, GetTranscriptTool, ListCallsTool,
    SearchTranscriptsTool,
};

use aircall_core::CallCenterApi;
use aircall_core::tools::{Tool, ToolRegistry};
use std::sync::Arc;

/// Get all default tools
pub fn get_default_tools(api: Arc<dyn CallCenterApi>) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(ListCallsTool::new(api.clone())),
        Arc::new(GetCallTool::new(api.clone())),
        Arc::new(GetTranscriptTool::new(api.clone())),
        Arc::new(SearchTranscriptsTool::new(api.clone())),
        Arc::new(GetSummaryTool::new(api.clone())),
        Arc::new(CallInsightsTool::new(api.clone())),
        Arc::new(AskTool::new(api)),
    ]
}

/// Registry with every default tool
pub fn default_registry(api: Arc<dyn CallCenterApi>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    for tool in get_default_tools(api) {
        registry.register(tool);
    }
    registry
}
