//! Configuration for the Aircall MCP server
//!
//! Settings are read from the process environment (and a `.env` file when one
//! exists). See [`AircallConfig::from_env`] for the recognised variables.

mod env_loader;

pub use env_loader::{AircallConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
