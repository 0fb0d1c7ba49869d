//! Built-in actions: the onboarding operations exposed to the dialogue policy.

pub mod field;
pub mod session;
pub mod status;
pub mod transcript;

use std::sync::Arc;

use crate::context::CurrentSession;
use crate::onboarding::OnboardingService;
use crate::tools::registry::ToolRegistry;
use crate::tools::tool::ToolError;

/// Resolve the active session id for a zero-argument convenience action.
pub(crate) async fn require_current(current: &CurrentSession) -> Result<String, ToolError> {
    current.get().await.ok_or_else(|| {
        ToolError::ExecutionFailed(
            "No active session: a conversational session has not been started".to_string(),
        )
    })
}

/// Register the full onboarding action surface.
pub async fn register_onboarding_tools(
    registry: &ToolRegistry,
    service: Arc<OnboardingService>,
    current: Arc<CurrentSession>,
) {
    registry
        .register(Arc::new(field::ValidateFieldTool::new(Arc::clone(&service))))
        .await;
    registry
        .register(Arc::new(field::StoreFieldTool::new(
            Arc::clone(&service),
            Arc::clone(&current),
        )))
        .await;
    registry
        .register(Arc::new(transcript::LogMessageTool::new(
            Arc::clone(&service),
            Arc::clone(&current),
        )))
        .await;
    registry
        .register(Arc::new(transcript::LogMessageWithSessionTool::new(
            Arc::clone(&service),
        )))
        .await;
    registry
        .register(Arc::new(transcript::LogConversationTurnTool::new(
            Arc::clone(&service),
            Arc::clone(&current),
        )))
        .await;
    registry
        .register(Arc::new(transcript::ConversationHistoryTool::new(
            Arc::clone(&service),
            Arc::clone(&current),
        )))
        .await;
    registry
        .register(Arc::new(session::SaveSessionTool::new(Arc::clone(&service))))
        .await;
    registry
        .register(Arc::new(session::SaveCurrentSessionTool::new(
            Arc::clone(&service),
            Arc::clone(&current),
        )))
        .await;
    registry
        .register(Arc::new(session::ForceSaveSessionTool::new(
            Arc::clone(&service),
            Arc::clone(&current),
        )))
        .await;
    registry
        .register(Arc::new(session::LoadSessionTool::new(Arc::clone(&service))))
        .await;
    registry
        .register(Arc::new(session::ResetSessionTool::new(Arc::clone(&service))))
        .await;
    registry
        .register(Arc::new(session::ResetCurrentSessionTool::new(
            Arc::clone(&service),
            Arc::clone(&current),
        )))
        .await;
    registry
        .register(Arc::new(status::IsOnboardingCompleteTool::new(
            Arc::clone(&service),
            Arc::clone(&current),
        )))
        .await;
    registry
        .register(Arc::new(status::GetSummaryTool::new(
            Arc::clone(&service),
            Arc::clone(&current),
        )))
        .await;
    registry
        .register(Arc::new(status::GetCurrentStateTool::new(service, current)))
        .await;
}
