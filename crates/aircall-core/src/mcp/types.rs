//! MCP type definitions

use super::protocol::MCP_PROTOCOL_VERSION;
use crate::tools::ToolResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Server information returned from `initialize`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpServerInfo {
    /// Server name
    pub name: String,
    /// Server version
    pub version: String,
}

impl Default for McpServerInfo {
    fn default() -> Self {
        Self {
            name: "aircall".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Server capabilities
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpCapabilities {
    /// Tool capabilities
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolCapabilities>,
}

/// Tool capabilities
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCapabilities {
    /// Whether the server notifies about tool list changes
    #[serde(default)]
    pub list_changed: bool,
}

/// Result of the `initialize` handshake
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    /// Protocol version spoken by the server
    pub protocol_version: String,
    /// Advertised capabilities
    pub capabilities: McpCapabilities,
    /// Server identity
    pub server_info: McpServerInfo,
    /// Usage instructions for the client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl InitializeResult {
    /// Build a handshake result for a tools-only server
    pub fn new(server_info: McpServerInfo, instructions: Option<String>) -> Self {
        Self {
            protocol_version: MCP_PROTOCOL_VERSION.to_string(),
            capabilities: McpCapabilities {
                tools: Some(ToolCapabilities::default()),
            },
            server_info,
            instructions,
        }
    }
}

/// MCP tool definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpTool {
    /// Tool name
    pub name: String,
    /// Tool description
    #[serde(default)]
    pub description: Option<String>,
    /// Input schema (JSON Schema)
    #[serde(default)]
    pub input_schema: Value,
}

/// MCP tool execution result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpToolResult {
    /// Result content
    pub content: Vec<McpContent>,
    /// Whether the execution produced an error
    #[serde(default)]
    pub is_error: bool,
}

impl McpToolResult {
    /// Single text block result
    pub fn text(text: impl Into<String>, is_error: bool) -> Self {
        Self {
            content: vec![McpContent::text(text)],
            is_error,
        }
    }
}

impl From<&ToolResult> for McpToolResult {
    fn from(result: &ToolResult) -> Self {
        Self::text(result.text(), !result.success)
    }
}

/// Content types in MCP responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum McpContent {
    /// Text content
    #[serde(rename = "text")]
    Text { text: String },
}

impl McpContent {
    /// Create text content
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

/// Parameters of `tools/call`
#[derive(Debug, Clone, Deserialize)]
pub struct CallToolParams {
    /// Tool name
    pub name: String,
    /// Tool arguments
    #[serde(default)]
    pub arguments: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_initialize_result_shape() {
        let result = InitializeResult::new(McpServerInfo::default(), Some("hi".into()));
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["protocolVersion"], "2024-11-05");
        assert_eq!(value["serverInfo"]["name"], "aircall");
        assert_eq!(value["capabilities"]["tools"]["listChanged"], false);
        assert_eq!(value["instructions"], "hi");
    }

    #[test]
    fn test_tool_result_conversion() {
        let ok = ToolResult::success("1", "t", "done");
        assert_eq!(
            serde_json::to_value(McpToolResult::from(&ok)).unwrap(),
            json!({"content": [{"type": "text", "text": "done"}], "isError": false})
        );

        let failed = ToolResult::error("1", "t", "Resource not found");
        let value = serde_json::to_value(McpToolResult::from(&failed)).unwrap();
        assert_eq!(value["isError"], true);
        assert_eq!(value["content"][0]["text"], "Error: Resource not found");
    }
}
