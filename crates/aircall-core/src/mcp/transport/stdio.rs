//! Standard I/O transport for MCP
//!
//! Reads newline-delimited JSON-RPC from the input and writes one response
//! line per request. Every message is handled on its own task so a tool
//! waiting on the rate limiter does not hold up `ping` or other calls.
//! Responses funnel through a single writer task.

use crate::interrupt::ShutdownReason;
use crate::mcp::error::McpError;
use crate::mcp::protocol::McpResponse;
use crate::mcp::server::McpServer;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Serve over the process's stdin and stdout
pub async fn serve_stdio(
    server: Arc<McpServer>,
    shutdown: CancellationToken,
) -> Result<ShutdownReason, McpError> {
    serve(server, tokio::io::stdin(), tokio::io::stdout(), shutdown).await
}

/// Serve over arbitrary streams until end of input or shutdown.
///
/// In-flight requests are allowed to finish (or unwind on shutdown) and their
/// responses are flushed before this returns.
pub async fn serve<R, W>(
    server: Arc<McpServer>,
    reader: R,
    writer: W,
    shutdown: CancellationToken,
) -> Result<ShutdownReason, McpError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel::<McpResponse>();
    let writer_task = tokio::spawn(write_responses(writer, rx));

    let mut lines = BufReader::new(reader).lines();
    let mut in_flight = JoinSet::new();

    info!("MCP server listening on stdio");

    let reason = loop {
        let line = tokio::select! {
            biased;
            _ = shutdown.cancelled() => break ShutdownReason::Manual,
            line = lines.next_line() => line?,
        };

        let Some(line) = line else {
            debug!("End of input");
            break ShutdownReason::EndOfInput;
        };

        if line.trim().is_empty() {
            continue;
        }

        let server = server.clone();
        let tx = tx.clone();
        in_flight.spawn(async move {
            if let Some(response) = server.handle_text(&line).await {
                // Receiver only goes away once the writer failed
                let _ = tx.send(response);
            }
        });

        // Reap finished handlers so the set does not grow unbounded
        while in_flight.try_join_next().is_some() {}
    };

    while let Some(joined) = in_flight.join_next().await {
        if let Err(e) = joined {
            error!("Request handler panicked: {}", e);
        }
    }

    drop(tx);
    match writer_task.await {
        Ok(result) => result?,
        Err(e) => return Err(McpError::transport(format!("Writer task failed: {}", e))),
    }

    Ok(reason)
}

async fn write_responses<W>(
    mut writer: W,
    mut rx: mpsc::UnboundedReceiver<McpResponse>,
) -> Result<(), McpError>
where
    W: AsyncWrite + Unpin,
{
    while let Some(response) = rx.recv().await {
        let mut json = serde_json::to_vec(&response)?;
        json.push(b'\n');
        writer.write_all(&json).await?;
        writer.flush().await?;
    }
    Ok(())
}
