//! Core error types and traits

use thiserror::Error;

const MISSING_CREDENTIALS: &str = "Missing Aircall credentials. Set AIRCALL_API_ID and AIRCALL_API_TOKEN environment variables or pass them to the client.";

/// Result type alias for Aircall operations
pub type AircallResult<T> = Result<T, AircallError>;

/// Unified error trait that all crate errors implement.
pub trait UnifiedError: std::error::Error + Send + Sync {
    /// Get the error code for programmatic handling
    fn error_code(&self) -> &str;

    /// Get the human-readable error message
    fn message(&self) -> &str;

    /// Check if this error is retryable
    fn is_retryable(&self) -> bool {
        false
    }
}

/// Main error type for configuration and API access
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AircallError {
    /// API id or token absent
    #[error("{}", MISSING_CREDENTIALS)]
    MissingCredentials,

    /// Malformed configuration values
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// HTTP errors returned by the Aircall API or the transport
    #[error("{message}")]
    Http {
        message: String,
        status_code: Option<u16>,
    },

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// Response body could not be decoded
    #[error("JSON error: {message}")]
    Json { message: String },

    /// The operation was cancelled by shutdown
    #[error("Operation cancelled")]
    Cancelled,

    /// Generic error
    #[error("{message}")]
    Other { message: String },
}

impl AircallError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an HTTP error with an optional status code
    pub fn http(message: impl Into<String>, status_code: Option<u16>) -> Self {
        Self::Http {
            message: message.into(),
            status_code,
        }
    }

    /// Create a JSON decoding error
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json {
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Map a non-success API status to the user-facing error.
    ///
    /// `rate_limit` is only used to phrase the 429 message.
    pub fn from_status(status: u16, body: &str, rate_limit: u32) -> Self {
        let message = match status {
            401 => "Invalid Aircall API credentials".to_string(),
            403 => "Permission denied for this resource".to_string(),
            404 => "Resource not found".to_string(),
            429 => format!("Rate limit exceeded ({} req/min)", rate_limit),
            s if s >= 500 => "Aircall API temporarily unavailable".to_string(),
            _ => format!("API request failed: {}", body),
        };
        Self::http(message, Some(status))
    }

    /// HTTP status code, if the error came from an API response
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status_code, .. } => *status_code,
            _ => None,
        }
    }

    /// Whether this is a 404 from the API
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}

impl UnifiedError for AircallError {
    fn error_code(&self) -> &str {
        match self {
            Self::MissingCredentials => "AIRCALL_MISSING_CREDENTIALS",
            Self::Config { .. } => "AIRCALL_CONFIG",
            Self::Http { .. } => "AIRCALL_HTTP",
            Self::Timeout => "AIRCALL_TIMEOUT",
            Self::Json { .. } => "AIRCALL_JSON",
            Self::Cancelled => "AIRCALL_CANCELLED",
            Self::Other { .. } => "AIRCALL_OTHER",
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::MissingCredentials => MISSING_CREDENTIALS,
            Self::Config { message } => message,
            Self::Http { message, .. } => message,
            Self::Timeout => "Request timed out",
            Self::Json { message } => message,
            Self::Cancelled => "Operation cancelled",
            Self::Other { message } => message,
        }
    }

    fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout => true,
            Self::Http { status_code, .. } => match status_code {
                Some(code) => *code == 429 || *code >= 500,
                None => true,
            },
            _ => false,
        }
    }
}
