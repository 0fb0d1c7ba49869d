//! Tool registry for the callable action surface.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::context::CallContext;
use crate::tools::tool::{Tool, ToolDefinition};

/// Registry of available actions.
pub struct ToolRegistry {
    tools: RwLock<HashMap<String, Arc<dyn Tool>>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: RwLock::new(HashMap::new()),
        }
    }

    /// Register a tool under its name.
    pub async fn register(&self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools.write().await.insert(name.clone(), tool);
        tracing::debug!("Registered tool: {}", name);
    }

    /// Get a tool by name.
    pub async fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.read().await.get(name).cloned()
    }

    /// List all tool names, sorted.
    pub async fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.read().await.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered tools.
    pub async fn count(&self) -> usize {
        self.tools.read().await.len()
    }

    /// Definitions for dialogue-policy function calling.
    pub async fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .read()
            .await
            .values()
            .map(|tool| ToolDefinition {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                parameters: tool.parameters_schema(),
            })
            .collect()
    }

    /// Invoke an action and always come back with a textual result.
    ///
    /// This is the boundary the dialogue policy talks to: unknown actions,
    /// bad parameters, and execution failures all become descriptive strings,
    /// never a propagated fault, because the conversational flow cannot
    /// recover from a crashed call.
    pub async fn dispatch(&self, name: &str, params: serde_json::Value) -> String {
        let Some(tool) = self.get(name).await else {
            return format!("Unknown action: {name}");
        };

        let ctx = CallContext::default();
        match tool.execute(params, &ctx).await {
            Ok(output) => output.message(),
            Err(e) => {
                tracing::warn!(tool = name, error = %e, "Tool call failed");
                e.to_string()
            }
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
