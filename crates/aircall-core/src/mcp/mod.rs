//! MCP (Model Context Protocol) server
//!
//! Exposes the registered tools to MCP clients over JSON-RPC 2.0, either on
//! stdio or over HTTP.

pub mod error;
pub mod protocol;
pub mod server;
pub mod transport;
pub mod types;

pub use error::McpError;
pub use protocol::{McpMessage, McpRequest, McpResponse, McpRpcError, RequestId, MCP_PROTOCOL_VERSION};
pub use server::McpServer;
pub use types::{InitializeResult, McpContent, McpServerInfo, McpTool, McpToolResult};
