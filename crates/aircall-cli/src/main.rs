//! Aircall MCP server binary
//!
//! Serves the Aircall tools to MCP clients over stdio (the default, for
//! desktop agents that spawn the server) or over HTTP.
//!
//! ```bash
//! AIRCALL_API_ID=... AIRCALL_API_TOKEN=... aircall-mcp
//! aircall-mcp http --bind 127.0.0.1:3000
//! ```
//!
//! Logs go to stderr; stdout is reserved for the protocol stream.

mod args;
mod commands;
mod router;
mod signal_handler;

use aircall_core::ShutdownManager;
use aircall_core::error::UnifiedError;
use args::{Cli, LogFormat};
use clap::Parser;
use signal_handler::SignalHandler;
use tracing_subscriber::EnvFilter;

fn init_logging(cli: &Cli) {
    // RUST_LOG wins over --log-level
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match cli.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let config = match router::load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e.message());
            if let Some(hint) = router::config_error_hint(&e) {
                eprintln!("{}", hint);
            }
            std::process::exit(1);
        }
    };

    let shutdown = ShutdownManager::new();
    let signals = SignalHandler::start(shutdown.clone())?;

    let result = router::route(cli, config, shutdown).await;
    signals.stop().await;
    result
}
