//! Tool abstraction for the dialogue-policy action surface.

use std::time::Duration;

use async_trait::async_trait;

use crate::context::CallContext;

/// Definition advertised to the dialogue policy for function calling.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Tool execution errors.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

/// Result of a tool execution.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub result: serde_json::Value,
    pub duration: Duration,
}

impl ToolOutput {
    pub fn success(result: serde_json::Value, duration: Duration) -> Self {
        Self { result, duration }
    }

    pub fn text(text: impl Into<String>, duration: Duration) -> Self {
        Self {
            result: serde_json::json!({ "message": text.into() }),
            duration,
        }
    }

    /// Textual form handed back to the dialogue policy: the `message` field
    /// when present, the serialized JSON otherwise.
    pub fn message(&self) -> String {
        self.result
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| self.result.to_string())
    }
}

/// A callable action exposed to the dialogue policy.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique action name.
    fn name(&self) -> &str;

    /// Natural-language description shown to the dialogue policy.
    fn description(&self) -> &str;

    /// JSON Schema for the action's parameters.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Execute with the given parameters.
    async fn execute(
        &self,
        params: serde_json::Value,
        ctx: &CallContext,
    ) -> Result<ToolOutput, ToolError>;
}

/// Extract a required string parameter.
pub fn require_str<'a>(params: &'a serde_json::Value, key: &str) -> Result<&'a str, ToolError> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| ToolError::InvalidParameters(format!("missing required parameter '{key}'")))
}
