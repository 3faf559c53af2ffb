//! CLI argument definitions using clap
//!
//! - aircall-mcp                  # stdio transport (default)
//! - aircall-mcp stdio            # same, explicit
//! - aircall-mcp http --bind ...  # streamable HTTP transport

use aircall_core::mcp::transport::http::DEFAULT_BIND;
use clap::{Parser, Subcommand, ValueEnum};
use std::net::SocketAddr;

#[derive(Parser, Debug)]
#[command(name = "aircall-mcp")]
#[command(about = "MCP server exposing Aircall calls, transcripts and summaries")]
#[command(
    long_about = r#"MCP server exposing Aircall calls, transcripts and summaries

USAGE:
  aircall-mcp                          # Serve over stdin/stdout
  aircall-mcp http --bind 0.0.0.0:3000 # Serve over HTTP

Credentials are read from AIRCALL_API_ID and AIRCALL_API_TOKEN (a .env file
in the working directory is honoured)."#
)]
#[command(version)]
pub struct Cli {
    /// Log level used when RUST_LOG is not set (trace, debug, info, warn, error)
    #[arg(long, env = "AIRCALL_LOG_LEVEL", default_value = "info", global = true)]
    pub log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Override the Aircall API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Override the number of API requests allowed per window
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..), global = true)]
    pub rate_limit: Option<u32>,

    /// Override the rate-limit window length in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..), global = true)]
    pub rate_window_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Serve MCP over stdin/stdout (newline-delimited JSON-RPC)
    Stdio,

    /// Serve MCP over HTTP (POST /mcp, GET /health)
    Http {
        /// Address to listen on
        #[arg(long, env = "AIRCALL_MCP_BIND", default_value = DEFAULT_BIND)]
        bind: SocketAddr,

        /// Accepted Host header pattern, `name:*` matches any port (repeatable)
        #[arg(long = "allowed-host", env = "AIRCALL_MCP_ALLOWED_HOSTS", value_delimiter = ',')]
        allowed_hosts: Vec<String>,

        /// Accepted Origin header pattern, `scheme://name:*` matches any port (repeatable)
        #[arg(
            long = "allowed-origin",
            env = "AIRCALL_MCP_ALLOWED_ORIGINS",
            value_delimiter = ','
        )]
        allowed_origins: Vec<String>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_stdio() {
        let cli = Cli::try_parse_from(["aircall-mcp"]).unwrap();
        assert_eq!(cli.command, None);
        assert_eq!(cli.log_format, LogFormat::Text);
        assert!(cli.rate_limit.is_none());
    }

    #[test]
    fn test_http_subcommand() {
        let cli = Cli::try_parse_from([
            "aircall-mcp",
            "http",
            "--bind",
            "0.0.0.0:8080",
            "--allowed-host",
            "mcp.example.com:*",
            "--allowed-host",
            "localhost:*",
            "--allowed-origin",
            "https://app.example.com,http://localhost:*",
            "--rate-limit",
            "30",
        ])
        .unwrap();

        assert_eq!(cli.rate_limit, Some(30));
        match cli.command {
            Some(Commands::Http {
                bind,
                allowed_hosts,
                allowed_origins,
            }) => {
                assert_eq!(bind.port(), 8080);
                assert_eq!(allowed_hosts, vec!["mcp.example.com:*", "localhost:*"]);
                assert_eq!(
                    allowed_origins,
                    vec!["https://app.example.com", "http://localhost:*"]
                );
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_zero_rate_limit() {
        assert!(Cli::try_parse_from(["aircall-mcp", "--rate-limit", "0"]).is_err());
        assert!(Cli::try_parse_from(["aircall-mcp", "--rate-window-secs", "0"]).is_err());
    }

    #[test]
    fn test_json_logs() {
        let cli = Cli::try_parse_from(["aircall-mcp", "--log-format", "json", "stdio"]).unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
        assert_eq!(cli.command, Some(Commands::Stdio));
    }
}
