//! HTTP transport for MCP
//!
//! `POST /mcp` takes one JSON-RPC message and answers with its response, or
//! `202 Accepted` when the message was a notification. `GET /health` reports
//! liveness. Requests whose `Host` header is not in the allow list are
//! rejected with `421 Misdirected Request` to guard against DNS rebinding,
//! and browser requests carrying a foreign `Origin` get `403 Forbidden`.

use crate::mcp::error::McpError;
use crate::mcp::server::McpServer;
use axum::{
    Json, Router,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Default bind address
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Host patterns accepted when none are configured
pub const DEFAULT_ALLOWED_HOSTS: &[&str] = &["localhost:*", "127.0.0.1:*"];

/// Origin patterns accepted when none are configured
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &["http://localhost:*", "http://127.0.0.1:*"];

/// HTTP transport settings
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Address to listen on
    pub bind: SocketAddr,
    /// Accepted `Host` header patterns; `name:*` matches any port
    pub allowed_hosts: Vec<String>,
    /// Accepted `Origin` header patterns; requests without one are let through
    pub allowed_origins: Vec<String>,
}

fn owned(patterns: &[&str]) -> Vec<String> {
    patterns.iter().map(|p| p.to_string()).collect()
}

impl HttpTransportConfig {
    pub fn new(bind: SocketAddr) -> Self {
        Self {
            bind,
            allowed_hosts: owned(DEFAULT_ALLOWED_HOSTS),
            allowed_origins: owned(DEFAULT_ALLOWED_ORIGINS),
        }
    }

    /// Replace the allow list (an empty list keeps the defaults)
    pub fn with_allowed_hosts(mut self, hosts: Vec<String>) -> Self {
        if !hosts.is_empty() {
            self.allowed_hosts = hosts;
        }
        self
    }

    /// Replace the origin allow list (an empty list keeps the defaults)
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        if !origins.is_empty() {
            self.allowed_origins = origins;
        }
        self
    }
}

#[derive(Clone)]
struct AppState {
    server: Arc<McpServer>,
    allowed_hosts: Arc<Vec<String>>,
    allowed_origins: Arc<Vec<String>>,
}

/// Check a `Host` or `Origin` header value against an allow-list pattern
pub fn host_matches(pattern: &str, host: &str) -> bool {
    let host = host.trim().to_ascii_lowercase();
    let pattern = pattern.trim().to_ascii_lowercase();

    match pattern.strip_suffix(":*") {
        Some(name) => match host.rsplit_once(':') {
            Some((h, port)) if port.chars().all(|c| c.is_ascii_digit()) => h == name,
            _ => host == name,
        },
        None => host == pattern,
    }
}

/// Build the router; exposed so tests can serve it on an ephemeral port
pub fn router(server: Arc<McpServer>, config: &HttpTransportConfig) -> Router {
    let state = AppState {
        server,
        allowed_hosts: Arc::new(config.allowed_hosts.clone()),
        allowed_origins: Arc::new(config.allowed_origins.clone()),
    };

    Router::new()
        .route("/mcp", post(mcp_handler))
        .route("/health", get(health_handler))
        .layer(middleware::from_fn_with_state(state.clone(), check_request))
        .with_state(state)
}

/// Bind and serve until the token is cancelled
pub async fn serve_http(
    server: Arc<McpServer>,
    config: HttpTransportConfig,
    shutdown: CancellationToken,
) -> Result<(), McpError> {
    let listener = TcpListener::bind(config.bind)
        .await
        .map_err(|e| McpError::transport(format!("Failed to bind {}: {}", config.bind, e)))?;
    serve_listener(listener, server, &config, shutdown).await
}

/// Serve on an already bound listener until the token is cancelled
pub async fn serve_listener(
    listener: TcpListener,
    server: Arc<McpServer>,
    config: &HttpTransportConfig,
    shutdown: CancellationToken,
) -> Result<(), McpError> {
    let addr = listener.local_addr()?;
    info!("MCP server listening on http://{}/mcp", addr);
    info!("Allowed hosts: {}", config.allowed_hosts.join(", "));
    info!("Allowed origins: {}", config.allowed_origins.join(", "));

    let app = router(server, config);
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    info!("HTTP transport stopped");
    Ok(())
}

async fn check_request(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");

    if !state.allowed_hosts.iter().any(|p| host_matches(p, host)) {
        warn!("Rejected request for host '{}'", host);
        return (StatusCode::MISDIRECTED_REQUEST, "Invalid Host header").into_response();
    }

    if let Some(origin) = request.headers().get(header::ORIGIN) {
        let origin = origin.to_str().unwrap_or("");
        if !state.allowed_origins.iter().any(|p| host_matches(p, origin)) {
            warn!("Rejected request from origin '{}'", origin);
            return (StatusCode::FORBIDDEN, "Invalid Origin header").into_response();
        }
    }

    next.run(request).await
}

async fn mcp_handler(State(state): State<AppState>, body: String) -> Response {
    match state.server.handle_text(&body).await {
        Some(response) => (StatusCode::OK, Json(response)).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "server": "aircall",
        "tools": state.server.registry().len(),
    }))
}
