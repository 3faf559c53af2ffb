//! MCP error types

use crate::error::UnifiedError;
use thiserror::Error;

/// Errors raised by the MCP server and its transports
#[derive(Debug, Error)]
pub enum McpError {
    /// Malformed or unexpected protocol traffic
    #[error("Protocol error: {message}")]
    Protocol { message: String },

    /// Transport failure (bind, accept, write)
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// Underlying I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl McpError {
    /// Create a new Protocol error
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Create a new Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}

impl UnifiedError for McpError {
    fn error_code(&self) -> &str {
        match self {
            Self::Protocol { .. } => "MCP_PROTOCOL",
            Self::Transport { .. } => "MCP_TRANSPORT",
            Self::Io(_) => "MCP_IO",
            Self::Serialization(_) => "MCP_SERIALIZATION",
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::Protocol { message } | Self::Transport { message } => message,
            Self::Io(_) => "I/O error",
            Self::Serialization(_) => "Serialization error",
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Transport { .. })
    }
}
