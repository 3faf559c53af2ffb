//! Aircall MCP Core Library
//!
//! This crate provides the core functionality for the Aircall MCP server:
//! the sliding-window rate limiter that paces outbound API traffic, the
//! rate-limited Aircall REST client, the tool abstraction, and the MCP
//! (Model Context Protocol) server with its stdio and HTTP transports.

pub mod client;
pub mod config;
pub mod error;
pub mod interrupt;
pub mod mcp;
pub mod rate_limiter;
pub mod tools;

// Re-export commonly used types
pub use client::{AircallClient, CallCenterApi};
pub use config::AircallConfig;
pub use error::{AircallError, AircallResult};
pub use interrupt::{ShutdownManager, ShutdownReason};
pub use mcp::{McpError, McpServer};
pub use rate_limiter::{RateLimitError, RateLimiter, RateLimiterConfig};
pub use tools::{Tool, ToolCall, ToolError, ToolRegistry, ToolResult};
