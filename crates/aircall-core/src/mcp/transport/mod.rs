//! MCP transports

pub mod http;
pub mod stdio;

pub use http::{HttpTransportConfig, serve_http};
pub use stdio::serve_stdio;
