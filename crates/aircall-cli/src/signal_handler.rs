//! Translate process signals into a shutdown request
//!
//! SIGINT and SIGTERM both cancel the root token held by the
//! [`ShutdownManager`]; transports and callers queued on the rate limiter
//! observe it and unwind.

use aircall_core::{ShutdownManager, ShutdownReason};
use futures::stream::StreamExt;
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook_tokio::{Handle, Signals};
use tokio::task::JoinHandle;
use tracing::debug;

/// Running signal listener
pub struct SignalHandler {
    handle: Handle,
    task: JoinHandle<()>,
}

impl SignalHandler {
    /// Start listening for SIGINT/SIGTERM
    pub fn start(shutdown: ShutdownManager) -> std::io::Result<Self> {
        let signals = Signals::new([SIGINT, SIGTERM])?;
        let handle = signals.handle();
        let task = tokio::spawn(listen(signals, shutdown));
        Ok(Self { handle, task })
    }

    /// Stop listening and wait for the listener task to exit
    pub async fn stop(self) {
        self.handle.close();
        let _ = self.task.await;
    }
}

fn reason_for(signal: i32) -> Option<ShutdownReason> {
    match signal {
        SIGINT => Some(ShutdownReason::Interrupt),
        SIGTERM => Some(ShutdownReason::Terminate),
        _ => None,
    }
}

async fn listen(mut signals: Signals, shutdown: ShutdownManager) {
    while let Some(signal) = signals.next().await {
        match reason_for(signal) {
            Some(reason) => {
                debug!("Received signal {}", signal);
                shutdown.shutdown(reason);
            }
            None => debug!("Ignoring signal {}", signal),
        }
    }
}
