//! Process-wide shutdown signalling
//!
//! A single root [`CancellationToken`] is cancelled when the process is asked
//! to stop. Transports watch it to stop accepting work, and every caller
//! waiting on the rate limiter observes it and unwinds.

use tokio_util::sync::CancellationToken;
use tracing::info;

/// Reason the server is shutting down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// SIGINT (Ctrl+C)
    Interrupt,
    /// SIGTERM
    Terminate,
    /// Input stream closed by the client
    EndOfInput,
    /// Requested programmatically
    Manual,
}

/// Owner of the root shutdown token
#[derive(Debug, Clone, Default)]
pub struct ShutdownManager {
    token: CancellationToken,
}

impl ShutdownManager {
    /// Create a new shutdown manager
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Get the root token
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Create a child token for scoped operations
    pub fn child_token(&self) -> CancellationToken {
        self.token.child_token()
    }

    /// Request shutdown
    pub fn shutdown(&self, reason: ShutdownReason) {
        if !self.token.is_cancelled() {
            info!("Shutting down: {:?}", reason);
            self.token.cancel();
        }
    }

    /// Check if shutdown was requested
    pub fn is_shutting_down(&self) -> bool {
        self.token.is_cancelled()
    }
}
