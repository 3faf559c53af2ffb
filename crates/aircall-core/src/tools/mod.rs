//! Tool abstraction served over MCP
//!
//! A [`Tool`] has a name, a description, a JSON schema for its arguments and
//! an async `execute`. Tools are collected in a [`ToolRegistry`] which the
//! MCP server lists and dispatches to.

mod base;
mod error;
mod registry;
mod types;

pub use base::Tool;
pub use error::ToolError;
pub use registry::ToolRegistry;
pub use types::{ToolCall, ToolParameter, ToolResult, ToolSchema};
