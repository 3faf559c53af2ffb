//! `stdio` command

use aircall_core::mcp::transport::serve_stdio;
use aircall_core::{McpServer, ShutdownManager};
use std::sync::Arc;
use tracing::info;

/// Serve MCP on stdin/stdout until the client disconnects or a signal arrives
pub async fn run(server: Arc<McpServer>, shutdown: ShutdownManager) -> anyhow::Result<()> {
    info!("Serving {} tools over stdio", server.registry().len());

    let reason = serve_stdio(server, shutdown.token()).await?;
    info!("Stdio transport stopped: {:?}", reason);
    Ok(())
}
