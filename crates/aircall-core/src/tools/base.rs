//! Core Tool trait definition

use super::error::ToolError;
use super::types::{ToolCall, ToolResult, ToolSchema};
use async_trait::async_trait;
use std::time::Instant;
use tracing::debug;

/// Base trait for all tools
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool's unique name (e.g., "aircall_get_call")
    fn name(&self) -> &str;

    /// Get the tool's description for LLM understanding
    fn description(&self) -> &str;

    /// Get the tool's JSON schema for input parameters
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with the given arguments
    ///
    /// # Errors
    ///
    /// Returns `ToolError` if arguments are invalid, the Aircall API fails,
    /// or the server is shutting down.
    async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError>;

    /// Validate the tool call arguments
    ///
    /// Called before `execute()`. Default implementation accepts all arguments.
    fn validate(&self, call: &ToolCall) -> Result<(), ToolError> {
        let _ = call;
        Ok(())
    }

    /// Execute the tool with timing and error handling
    ///
    /// Validation and execution errors are folded into a failed `ToolResult`
    /// whose text is `Error: <message>`. Cancellation is propagated instead,
    /// so a shutting-down server does not report it as a tool failure.
    async fn execute_with_timing(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let start_time = Instant::now();

        if let Err(err) = self.validate(call) {
            return Ok(ToolResult::error(&call.id, self.name(), err.to_string())
                .with_execution_time(start_time.elapsed().as_millis() as u64));
        }

        let result = match self.execute(call).await {
            Ok(mut result) => {
                result.execution_time_ms = Some(start_time.elapsed().as_millis() as u64);
                result
            }
            Err(ToolError::Cancelled) => return Err(ToolError::Cancelled),
            Err(err) => ToolResult::error(&call.id, self.name(), err.to_string())
                .with_execution_time(start_time.elapsed().as_millis() as u64),
        };

        debug!(
            "Tool {} finished in {}ms (success: {})",
            self.name(),
            result.execution_time_ms.unwrap_or(0),
            result.success
        );
        Ok(result)
    }
}
