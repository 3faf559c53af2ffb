//! MCP server: method dispatch over a tool registry
//!
//! The server is transport agnostic. A transport hands it one decoded line or
//! body at a time and writes back whatever response it returns. Handlers take
//! `&self`, so transports share one server behind an `Arc` and run requests
//! concurrently.

use super::protocol::{methods, McpMessage, McpRequest, McpResponse, McpRpcError, RequestId};
use super::types::{CallToolParams, InitializeResult, McpServerInfo, McpTool, McpToolResult};
use crate::tools::{ToolCall, ToolError, ToolRegistry, ToolResult};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

/// Default instructions sent to clients on `initialize`
pub const DEFAULT_INSTRUCTIONS: &str = "Access Aircall calls, transcripts, and summaries";

/// MCP server serving a fixed set of tools
#[derive(Debug, Clone)]
pub struct McpServer {
    registry: ToolRegistry,
    info: McpServerInfo,
    instructions: Option<String>,
}

impl McpServer {
    /// Create a server over the given registry
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry,
            info: McpServerInfo::default(),
            instructions: Some(DEFAULT_INSTRUCTIONS.to_string()),
        }
    }

    /// Tools served
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Handle one raw JSON-RPC message.
    ///
    /// Returns `None` when nothing should be sent back (notifications and
    /// responses from the client).
    pub async fn handle_text(&self, text: &str) -> Option<McpResponse> {
        match McpMessage::parse(text) {
            Ok(message) => self.handle_message(message).await,
            Err(error) => {
                warn!("Rejected message: {}", error);
                Some(McpResponse::error(None, error))
            }
        }
    }

    /// Handle a JSON value already decoded by the transport
    pub async fn handle_value(&self, value: Value) -> Option<McpResponse> {
        match McpMessage::from_value(value) {
            Ok(message) => self.handle_message(message).await,
            Err(error) => {
                warn!("Rejected message: {}", error);
                Some(McpResponse::error(None, error))
            }
        }
    }

    /// Handle a classified message
    pub async fn handle_message(&self, message: McpMessage) -> Option<McpResponse> {
        match message {
            McpMessage::Request(request) => Some(self.handle_request(request).await),
            McpMessage::Notification(notification) => {
                debug!("Notification: {}", notification.method);
                None
            }
            McpMessage::Response => {
                debug!("Ignoring response from client");
                None
            }
        }
    }

    async fn handle_request(&self, request: McpRequest) -> McpResponse {
        debug!("Request {}: {}", request.id, request.method);

        let outcome = match request.method.as_str() {
            methods::INITIALIZE => Ok(self.initialize(request.params.as_ref())),
            methods::PING => Ok(json!({})),
            methods::TOOLS_LIST => Ok(self.list_tools()),
            methods::TOOLS_CALL => self.call_tool(&request.id, request.params).await,
            other => Err(McpRpcError::method_not_found(other)),
        };

        match outcome {
            Ok(result) => McpResponse::success(request.id, result),
            Err(error) => McpResponse::error(Some(request.id), error),
        }
    }

    fn initialize(&self, params: Option<&Value>) -> Value {
        if let Some(client) = params.and_then(|p| p.get("clientInfo")) {
            let name = client.get("name").and_then(|v| v.as_str()).unwrap_or("unknown");
            let version = client.get("version").and_then(|v| v.as_str()).unwrap_or("");
            info!("Client connected: {} {}", name, version);
        }

        let result = InitializeResult::new(self.info.clone(), self.instructions.clone());
        serde_json::to_value(result).unwrap_or(Value::Null)
    }

    fn list_tools(&self) -> Value {
        let tools: Vec<McpTool> = self
            .registry
            .all_tools()
            .iter()
            .map(|tool| {
                let schema = tool.schema();
                McpTool {
                    name: schema.name,
                    description: Some(schema.description),
                    input_schema: schema.parameters,
                }
            })
            .collect();

        json!({ "tools": tools })
    }

    async fn call_tool(&self, id: &RequestId, params: Option<Value>) -> Result<Value, McpRpcError> {
        let params: CallToolParams = params
            .ok_or_else(|| McpRpcError::invalid_params("Missing params"))
            .and_then(|p| {
                serde_json::from_value(p).map_err(|e| McpRpcError::invalid_params(e.to_string()))
            })?;

        let call = ToolCall::from_json(id.to_string(), &params.name, params.arguments);

        let result = match self.registry.get(&params.name) {
            Some(tool) => {
                info!("Calling tool {}", params.name);
                match tool.execute_with_timing(&call).await {
                    Ok(result) => result,
                    Err(ToolError::Cancelled) => {
                        return Err(McpRpcError::internal_error("Request cancelled"));
                    }
                    Err(e) => ToolResult::error(&call.id, &params.name, e.to_string()),
                }
            }
            None => {
                warn!("Unknown tool requested: {}", params.name);
                ToolResult::error(&call.id, &params.name, format!("Unknown tool: {}", params.name))
            }
        };

        if !result.success {
            debug!(
                "Tool {} returned error: {}",
                params.name,
                result.error.as_deref().unwrap_or("")
            );
        }

        serde_json::to_value(McpToolResult::from(&result))
            .map_err(|e| McpRpcError::internal_error(e.to_string()))
    }
}
