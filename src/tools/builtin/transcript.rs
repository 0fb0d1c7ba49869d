//! Conversation logging and history actions.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::context::{CallContext, CurrentSession};
use crate::onboarding::{OnboardingService, Speaker};
use crate::tools::builtin::require_current;
use crate::tools::tool::{Tool, ToolError, ToolOutput, require_str};

fn parse_speaker(value: &str) -> Result<Speaker, ToolError> {
    value
        .parse::<Speaker>()
        .map_err(ToolError::InvalidParameters)
}

fn speaker_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "enum": ["user", "assistant"],
        "description": "Who said it: 'user' or 'assistant'"
    })
}

// ── log_message ─────────────────────────────────────────────────────

/// Append one message to the current session's conversation log.
pub struct LogMessageTool {
    service: Arc<OnboardingService>,
    current: Arc<CurrentSession>,
}

impl LogMessageTool {
    pub fn new(service: Arc<OnboardingService>, current: Arc<CurrentSession>) -> Self {
        Self { service, current }
    }
}

#[async_trait]
impl Tool for LogMessageTool {
    fn name(&self) -> &str {
        "log_message"
    }

    fn description(&self) -> &str {
        "Log a message in the conversation history for the current session. \
         Empty or whitespace-only text is skipped."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "speaker": speaker_schema(),
                "text": {
                    "type": "string",
                    "description": "Message text to log"
                }
            },
            "required": ["speaker", "text"]
        })
    }

    async fn execute(
        &self,
        params: serde_json::Value,
        _ctx: &CallContext,
    ) -> Result<ToolOutput, ToolError> {
        let start = Instant::now();
        let speaker = parse_speaker(require_str(&params, "speaker")?)?;
        let text = require_str(&params, "text")?;
        let session_id = require_current(&self.current).await?;

        let appended = self.service.log_message(&session_id, speaker, text).await;
        let message = if appended {
            format!("Message logged successfully for session {session_id}")
        } else {
            format!("Empty message skipped for session {session_id}")
        };

        Ok(ToolOutput::success(
            serde_json::json!({
                "status": "logged",
                "appended": appended,
                "message": message,
            }),
            start.elapsed(),
        ))
    }
}

// ── log_message_with_session ────────────────────────────────────────

/// Append one message to a specific session's conversation log.
///
/// Safe under concurrent sessions: never reads the shared current-session
/// pointer.
pub struct LogMessageWithSessionTool {
    service: Arc<OnboardingService>,
}

impl LogMessageWithSessionTool {
    pub fn new(service: Arc<OnboardingService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for LogMessageWithSessionTool {
    fn name(&self) -> &str {
        "log_message_with_session"
    }

    fn description(&self) -> &str {
        "Log a message in the conversation history for a specific session id. \
         Use when addressing a session other than the current one."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "session_id": {
                    "type": "string",
                    "description": "Unique identifier for the session"
                },
                "speaker": speaker_schema(),
                "text": {
                    "type": "string",
                    "description": "Message text to log"
                }
            },
            "required": ["session_id", "speaker", "text"]
        })
    }

    async fn execute(
        &self,
        params: serde_json::Value,
        _ctx: &CallContext,
    ) -> Result<ToolOutput, ToolError> {
        let start = Instant::now();
        let session_id = require_str(&params, "session_id")?;
        let speaker = parse_speaker(require_str(&params, "speaker")?)?;
        let text = require_str(&params, "text")?;

        let appended = self.service.log_message(session_id, speaker, text).await;
        let message = if appended {
            format!("Message logged successfully for session {session_id}")
        } else {
            format!("Empty message skipped for session {session_id}")
        };

        Ok(ToolOutput::success(
            serde_json::json!({
                "status": "logged",
                "appended": appended,
                "message": message,
            }),
            start.elapsed(),
        ))
    }
}

// ── log_conversation_turn ───────────────────────────────────────────

/// Log a full user/assistant turn and persist the session afterward.
pub struct LogConversationTurnTool {
    service: Arc<OnboardingService>,
    current: Arc<CurrentSession>,
}

impl LogConversationTurnTool {
    pub fn new(service: Arc<OnboardingService>, current: Arc<CurrentSession>) -> Self {
        Self { service, current }
    }
}

#[async_trait]
impl Tool for LogConversationTurnTool {
    fn name(&self) -> &str {
        "log_conversation_turn"
    }

    fn description(&self) -> &str {
        "Log both the user message and the assistant response of one \
         conversation turn, in order, then save the session. Empty texts are \
         skipped."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "user_message": {
                    "type": "string",
                    "description": "What the user said"
                },
                "assistant_response": {
                    "type": "string",
                    "description": "What the assistant replied"
                }
            },
            "required": ["user_message", "assistant_response"]
        })
    }

    async fn execute(
        &self,
        params: serde_json::Value,
        _ctx: &CallContext,
    ) -> Result<ToolOutput, ToolError> {
        let start = Instant::now();
        let user_message = require_str(&params, "user_message")?;
        let assistant_response = require_str(&params, "assistant_response")?;
        let session_id = require_current(&self.current).await?;

        let appended = self
            .service
            .log_turn(&session_id, user_message, assistant_response)
            .await
            .map_err(|e| {
                ToolError::ExecutionFailed(format!("Failed to log conversation turn: {e}"))
            })?;

        Ok(ToolOutput::success(
            serde_json::json!({
                "status": "logged",
                "appended": appended,
                "message": format!(
                    "Conversation turn logged successfully for session {session_id}"
                ),
            }),
            start.elapsed(),
        ))
    }
}

// ── get_conversation_history ────────────────────────────────────────

/// Render the current session's transcript as a numbered list.
pub struct ConversationHistoryTool {
    service: Arc<OnboardingService>,
    current: Arc<CurrentSession>,
}

impl ConversationHistoryTool {
    pub fn new(service: Arc<OnboardingService>, current: Arc<CurrentSession>) -> Self {
        Self { service, current }
    }
}

#[async_trait]
impl Tool for ConversationHistoryTool {
    fn name(&self) -> &str {
        "get_conversation_history"
    }

    fn description(&self) -> &str {
        "Get the current session's conversation history as a numbered list \
         with speaker, text, and timestamp."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(
        &self,
        _params: serde_json::Value,
        _ctx: &CallContext,
    ) -> Result<ToolOutput, ToolError> {
        let start = Instant::now();
        let session_id = require_current(&self.current).await?;

        let history = self.service.history(&session_id).await;
        let message = if history.is_empty() {
            "No conversation history yet".to_string()
        } else {
            let lines: Vec<String> = history
                .iter()
                .enumerate()
                .map(|(i, entry)| {
                    format!(
                        "{}. [{}] {} (at {})",
                        i + 1,
                        entry.speaker,
                        entry.text,
                        entry.timestamp.to_rfc3339()
                    )
                })
                .collect();
            format!(
                "Conversation history ({} messages):\n{}",
                history.len(),
                lines.join("\n")
            )
        };

        Ok(ToolOutput::success(
            serde_json::json!({
                "message_count": history.len(),
                "message": message,
            }),
            start.elapsed(),
        ))
    }
}
