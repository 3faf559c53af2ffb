//! CLI commands

pub mod http;
pub mod stdio;
