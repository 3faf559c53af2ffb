//! Error types for the Aircall MCP server
//!
//! All errors implement the `UnifiedError` trait which provides consistent fields:
//! - error_code: A unique identifier for programmatic error handling
//! - message: Human-readable error message
//! - is_retryable: Whether repeating the operation may succeed

mod conversions;
mod types;

pub use types::{AircallError, AircallResult, UnifiedError};
