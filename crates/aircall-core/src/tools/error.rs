//! Error types for tool operations

use crate::error::{AircallError, UnifiedError};

/// Error type for tool operations
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Invalid arguments provided to the tool
    #[error("Invalid parameters - {0}")]
    InvalidArguments(String),

    /// Tool execution failed
    #[error("{0}")]
    ExecutionFailed(String),

    /// Tool not found
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Aircall API error
    #[error("{0}")]
    Api(AircallError),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Cancelled by shutdown
    #[error("Tool execution cancelled")]
    Cancelled,
}

impl From<AircallError> for ToolError {
    fn from(error: AircallError) -> Self {
        match error {
            AircallError::Cancelled => Self::Cancelled,
            other => Self::Api(other),
        }
    }
}

impl UnifiedError for ToolError {
    fn error_code(&self) -> &str {
        match self {
            ToolError::InvalidArguments(_) => "TOOL_INVALID_ARGS",
            ToolError::ExecutionFailed(_) => "TOOL_EXEC_FAILED",
            ToolError::NotFound(_) => "TOOL_NOT_FOUND",
            ToolError::Api(e) => e.error_code(),
            ToolError::Json(_) => "TOOL_JSON_ERROR",
            ToolError::Cancelled => "TOOL_CANCELLED",
        }
    }

    fn message(&self) -> &str {
        match self {
            ToolError::InvalidArguments(msg) => msg,
            ToolError::ExecutionFailed(msg) => msg,
            ToolError::NotFound(name) => name,
            ToolError::Api(e) => e.message(),
            ToolError::Json(_) => "JSON error occurred",
            ToolError::Cancelled => "Tool execution cancelled",
        }
    }

    fn is_retryable(&self) -> bool {
        match self {
            ToolError::Api(e) => e.is_retryable(),
            _ => false,
        }
    }
}
