//! `http` command

use aircall_core::mcp::transport::{HttpTransportConfig, serve_http};
use aircall_core::{McpServer, ShutdownManager};
use std::sync::Arc;
use tracing::info;

/// Serve MCP over HTTP until a signal arrives
pub async fn run(
    server: Arc<McpServer>,
    config: HttpTransportConfig,
    shutdown: ShutdownManager,
) -> anyhow::Result<()> {
    info!("Serving {} tools over HTTP", server.registry().len());

    serve_http(server, config, shutdown.token()).await?;
    Ok(())
}
