//! Session persistence actions: save, load, and reset.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::context::{CallContext, CurrentSession};
use crate::onboarding::OnboardingService;
use crate::tools::builtin::require_current;
use crate::tools::tool::{Tool, ToolError, ToolOutput, require_str};

fn session_id_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "session_id": {
                "type": "string",
                "description": "Unique identifier for the session"
            }
        },
        "required": ["session_id"]
    })
}

fn no_params_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {}
    })
}

async fn save_with_message(
    service: &OnboardingService,
    session_id: &str,
    confirmation: String,
) -> Result<ToolOutput, ToolError> {
    let start = Instant::now();
    service
        .save(session_id)
        .await
        .map_err(|e| ToolError::ExecutionFailed(format!("Failed to save session: {e}")))?;
    Ok(ToolOutput::success(
        serde_json::json!({
            "status": "saved",
            "session_id": session_id,
            "message": confirmation,
        }),
        start.elapsed(),
    ))
}

// ── save_session ────────────────────────────────────────────────────

/// Persist a specific session to its record file.
pub struct SaveSessionTool {
    service: Arc<OnboardingService>,
}

impl SaveSessionTool {
    pub fn new(service: Arc<OnboardingService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for SaveSessionTool {
    fn name(&self) -> &str {
        "save_session"
    }

    fn description(&self) -> &str {
        "Save the onboarding state and conversation log of a specific session \
         to its durable record."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        session_id_schema()
    }

    async fn execute(
        &self,
        params: serde_json::Value,
        _ctx: &CallContext,
    ) -> Result<ToolOutput, ToolError> {
        let session_id = require_str(&params, "session_id")?;
        save_with_message(
            &self.service,
            session_id,
            format!("Session {session_id} saved successfully"),
        )
        .await
    }
}

// ── save_current_session ────────────────────────────────────────────

/// Persist the current session.
pub struct SaveCurrentSessionTool {
    service: Arc<OnboardingService>,
    current: Arc<CurrentSession>,
}

impl SaveCurrentSessionTool {
    pub fn new(service: Arc<OnboardingService>, current: Arc<CurrentSession>) -> Self {
        Self { service, current }
    }
}

#[async_trait]
impl Tool for SaveCurrentSessionTool {
    fn name(&self) -> &str {
        "save_current_session"
    }

    fn description(&self) -> &str {
        "Save the current session's onboarding state and conversation log."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        no_params_schema()
    }

    async fn execute(
        &self,
        _params: serde_json::Value,
        _ctx: &CallContext,
    ) -> Result<ToolOutput, ToolError> {
        let session_id = require_current(&self.current).await?;
        save_with_message(
            &self.service,
            &session_id,
            format!("Session {session_id} saved successfully"),
        )
        .await
    }
}

// ── force_save_session ──────────────────────────────────────────────

/// Persist the current session immediately.
pub struct ForceSaveSessionTool {
    service: Arc<OnboardingService>,
    current: Arc<CurrentSession>,
}

impl ForceSaveSessionTool {
    pub fn new(service: Arc<OnboardingService>, current: Arc<CurrentSession>) -> Self {
        Self { service, current }
    }
}

#[async_trait]
impl Tool for ForceSaveSessionTool {
    fn name(&self) -> &str {
        "force_save_session"
    }

    fn description(&self) -> &str {
        "Force an immediate save of the current session. Use after logging \
         messages or storing fields to guarantee durability."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        no_params_schema()
    }

    async fn execute(
        &self,
        _params: serde_json::Value,
        _ctx: &CallContext,
    ) -> Result<ToolOutput, ToolError> {
        let session_id = require_current(&self.current).await?;
        save_with_message(
            &self.service,
            &session_id,
            format!("Session {session_id} force saved successfully"),
        )
        .await
    }
}

// ── load_session ────────────────────────────────────────────────────

/// Load a session's record from durable storage into memory.
pub struct LoadSessionTool {
    service: Arc<OnboardingService>,
}

impl LoadSessionTool {
    pub fn new(service: Arc<OnboardingService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for LoadSessionTool {
    fn name(&self) -> &str {
        "load_session"
    }

    fn description(&self) -> &str {
        "Load an existing session's saved record, replacing the in-memory \
         state for that session. A missing record is reported, not an error."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        session_id_schema()
    }

    async fn execute(
        &self,
        params: serde_json::Value,
        _ctx: &CallContext,
    ) -> Result<ToolOutput, ToolError> {
        let start = Instant::now();
        let session_id = require_str(&params, "session_id")?;

        let result = match self.service.load(session_id).await {
            Ok(messages) => serde_json::json!({
                "status": "loaded",
                "session_id": session_id,
                "message_count": messages,
                "message": format!("Session {session_id} loaded successfully"),
            }),
            Err(e) if e.is_not_found() => serde_json::json!({
                "status": "not_found",
                "session_id": session_id,
                "message": format!("Session file not found for {session_id}"),
            }),
            Err(e) => {
                return Err(ToolError::ExecutionFailed(format!(
                    "Failed to load session: {e}"
                )));
            }
        };

        Ok(ToolOutput::success(result, start.elapsed()))
    }
}

// ── reset_session ───────────────────────────────────────────────────

/// Reset a specific session to empty state and persist the reset.
pub struct ResetSessionTool {
    service: Arc<OnboardingService>,
}

impl ResetSessionTool {
    pub fn new(service: Arc<OnboardingService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for ResetSessionTool {
    fn name(&self) -> &str {
        "reset_session"
    }

    fn description(&self) -> &str {
        "Reset a session's onboarding state and conversation log to empty, \
         then persist the empty state."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        session_id_schema()
    }

    async fn execute(
        &self,
        params: serde_json::Value,
        _ctx: &CallContext,
    ) -> Result<ToolOutput, ToolError> {
        let start = Instant::now();
        let session_id = require_str(&params, "session_id")?;

        self.service
            .reset(session_id)
            .await
            .map_err(|e| ToolError::ExecutionFailed(format!("Failed to reset session: {e}")))?;

        Ok(ToolOutput::success(
            serde_json::json!({
                "status": "reset",
                "session_id": session_id,
                "message": format!("Session {session_id} reset successfully"),
            }),
            start.elapsed(),
        ))
    }
}

// ── reset_current_session ───────────────────────────────────────────

/// Reset the current session.
pub struct ResetCurrentSessionTool {
    service: Arc<OnboardingService>,
    current: Arc<CurrentSession>,
}

impl ResetCurrentSessionTool {
    pub fn new(service: Arc<OnboardingService>, current: Arc<CurrentSession>) -> Self {
        Self { service, current }
    }
}

#[async_trait]
impl Tool for ResetCurrentSessionTool {
    fn name(&self) -> &str {
        "reset_current_session"
    }

    fn description(&self) -> &str {
        "Reset the current session's onboarding state and conversation log to \
         empty, then persist the empty state."
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

        self.service
            .reset(&session_id)
            .await
            .map_err(|e| ToolError::ExecutionFailed(format!("Failed to reset session: {e}")))?;

        Ok(ToolOutput::success(
            serde_json::json!({
                "status": "reset",
                "session_id": session_id,
                "message": format!("Session {session_id} reset successfully"),
            }),
            start.elapsed(),
        ))
    }
}
