//! Read-only status actions: completion, summary, and full field state.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::context::{CallContext, CurrentSession};
use crate::onboarding::OnboardingService;
use crate::tools::builtin::require_current;
use crate::tools::tool::{Tool, ToolError, ToolOutput};

fn no_params_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {}
    })
}

// ── is_onboarding_complete ──────────────────────────────────────────

/// Report whether all four onboarding fields are filled.
pub struct IsOnboardingCompleteTool {
    service: Arc<OnboardingService>,
    current: Arc<CurrentSession>,
}

impl IsOnboardingCompleteTool {
    pub fn new(service: Arc<OnboardingService>, current: Arc<CurrentSession>) -> Self {
        Self { service, current }
    }
}

#[async_trait]
impl Tool for IsOnboardingCompleteTool {
    fn name(&self) -> &str {
        "is_onboarding_complete"
    }

    fn description(&self) -> &str {
        "Check whether all onboarding fields (name, email, phone, country) \
         have been collected for the current session, naming any that are \
         still missing."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        no_params_schema()
    }

    async fn execute(
        &self,
        _params: serde_json::Value,
        _ctx: &CallContext,
    ) -> Result<ToolOutput, ToolError> {
        let start = Instant::now();
        let session_id = require_current(&self.current).await?;

        let missing = self.service.missing_fields(&session_id).await;
        let result = if missing.is_empty() {
            serde_json::json!({
                "complete": true,
                "missing": [],
                "message": "Onboarding complete - all fields filled",
            })
        } else {
            let names: Vec<&str> = missing.iter().map(|f| f.as_str()).collect();
            serde_json::json!({
                "complete": false,
                "missing": names,
                "message": format!("Onboarding incomplete. Missing: {}", names.join(", ")),
            })
        };

        Ok(ToolOutput::success(result, start.elapsed()))
    }
}

// ── get_summary ─────────────────────────────────────────────────────

/// Summarize the fields collected so far.
pub struct GetSummaryTool {
    service: Arc<OnboardingService>,
    current: Arc<CurrentSession>,
}

impl GetSummaryTool {
    pub fn new(service: Arc<OnboardingService>, current: Arc<CurrentSession>) -> Self {
        Self { service, current }
    }
}

#[async_trait]
impl Tool for GetSummaryTool {
    fn name(&self) -> &str {
        "get_summary"
    }

    fn description(&self) -> &str {
        "Get a summary of the onboarding data collected so far for the \
         current session."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        no_params_schema()
    }

    async fn execute(
        &self,
        _params: serde_json::Value,
        _ctx: &CallContext,
    ) -> Result<ToolOutput, ToolError> {
        let start = Instant::now();
        let session_id = require_current(&self.current).await?;

        let collected = self.service.collected(&session_id).await;
        let message = if collected.is_empty() {
            "No onboarding data collected yet".to_string()
        } else {
            let parts: Vec<String> = collected
                .iter()
                .map(|(field, value)| format!("{}: {value}", field.label()))
                .collect();
            format!("Collected data: {}", parts.join(", "))
        };

        Ok(ToolOutput::success(
            serde_json::json!({
                "collected_count": collected.len(),
                "message": message,
            }),
            start.elapsed(),
        ))
    }
}

// ── get_current_state ───────────────────────────────────────────────

/// Show all four fields, filled or not.
pub struct GetCurrentStateTool {
    service: Arc<OnboardingService>,
    current: Arc<CurrentSession>,
}

impl GetCurrentStateTool {
    pub fn new(service: Arc<OnboardingService>, current: Arc<CurrentSession>) -> Self {
        Self { service, current }
    }
}

#[async_trait]
impl Tool for GetCurrentStateTool {
    fn name(&self) -> &str {
        "get_current_state"
    }

    fn description(&self) -> &str {
        "Get the current value of every onboarding field for the current \
         session, showing 'not provided' for fields still missing."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        no_params_schema()
    }

    async fn execute(
        &self,
        _params: serde_json::Value,
        _ctx: &CallContext,
    ) -> Result<ToolOutput, ToolError> {
        let start = Instant::now();
        let session_id = require_current(&self.current).await?;

        let values = self.service.field_values(&session_id).await;
        let parts: Vec<String> = values
            .iter()
            .map(|(field, value)| {
                format!(
                    "{}: {}",
                    field.label(),
                    value.as_deref().unwrap_or("not provided")
                )
            })
            .collect();

        Ok(ToolOutput::success(
            serde_json::json!({
                "fields": values
                    .iter()
                    .map(|(field, value)| {
                        (field.as_str().to_string(), serde_json::json!(value))
                    })
                    .collect::<serde_json::Map<String, serde_json::Value>>(),
                "message": format!("Current onboarding state: {}", parts.join(", ")),
            }),
            start.elapsed(),
        ))
    }
}
