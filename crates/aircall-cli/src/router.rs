//! Command routing logic for CLI

use crate::args::{Cli, Commands};
use crate::commands;
use aircall_core::mcp::transport::HttpTransportConfig;
use aircall_core::rate_limiter::RateLimiterConfig;
use aircall_core::{
    AircallClient, AircallConfig, AircallError, AircallResult, McpServer, ShutdownManager,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Load configuration from the environment and apply CLI overrides
pub fn load_config(cli: &Cli) -> AircallResult<AircallConfig> {
    let config = AircallConfig::from_env()?;
    Ok(apply_overrides(config, cli))
}

/// Follow-up line printed after a startup configuration error
pub fn config_error_hint(error: &AircallError) -> Option<&'static str> {
    match error {
        AircallError::MissingCredentials => {
            Some("Please set AIRCALL_API_ID and AIRCALL_API_TOKEN environment variables.")
        }
        _ => None,
    }
}

fn apply_overrides(mut config: AircallConfig, cli: &Cli) -> AircallConfig {
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.trim_end_matches('/').to_string();
    }
    if cli.rate_limit.is_some() || cli.rate_window_secs.is_some() {
        let current = config.rate_limit;
        config.rate_limit = RateLimiterConfig::new(
            cli.rate_limit.unwrap_or(current.max_requests_per_window),
            cli.rate_window_secs
                .map(Duration::from_secs)
                .unwrap_or(current.window_duration),
        );
    }
    config
}

/// Build the server for `config` and run the selected transport
pub async fn route(
    cli: Cli,
    config: AircallConfig,
    shutdown: ShutdownManager,
) -> anyhow::Result<()> {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %config.base_url,
        rate_limit = config.rate_limit.max_requests_per_window,
        window_secs = config.rate_limit.window_duration.as_secs(),
        "Starting Aircall MCP server"
    );

    let client = AircallClient::new(config, shutdown.token())?;
    let registry = aircall_tools::default_registry(Arc::new(client));
    let server = Arc::new(McpServer::new(registry));

    match cli.command.unwrap_or(Commands::Stdio) {
        Commands::Stdio => commands::stdio::run(server, shutdown).await,
        Commands::Http {
            bind,
            allowed_hosts,
            allowed_origins,
        } => {
            let transport = HttpTransportConfig::new(bind)
                .with_allowed_hosts(allowed_hosts)
                .with_allowed_origins(allowed_origins);
            commands::http::run(server, transport, shutdown).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn base_config() -> AircallConfig {
        AircallConfig::new("id", "token")
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let cli = Cli::try_parse_from(["aircall-mcp"]).unwrap();
        assert_eq!(apply_overrides(base_config(), &cli), base_config());
    }

    #[test]
    fn test_overrides_apply() {
        let cli = Cli::try_parse_from([
            "aircall-mcp",
            "--base-url",
            "http://127.0.0.1:9000/v1/",
            "--rate-window-secs",
            "10",
        ])
        .unwrap();

        let config = apply_overrides(base_config(), &cli);
        assert_eq!(config.base_url, "http://127.0.0.1:9000/v1");
        assert_eq!(config.rate_limit.window_duration, Duration::from_secs(10));
        assert_eq!(
            config.rate_limit.max_requests_per_window,
            base_config().rate_limit.max_requests_per_window
        );
    }

    #[test]
    fn test_hint_only_for_missing_credentials() {
        assert!(
            config_error_hint(&AircallError::MissingCredentials)
                .is_some_and(|hint| hint.contains("AIRCALL_API_TOKEN"))
        );
        assert_eq!(
            config_error_hint(&AircallError::config("Invalid AIRCALL_RATE_LIMIT value")),
            None
        );
    }
}
