//! Lifecycle hooks driven by the external conversational runtime.
//!
//! The runtime owns speech, turn detection, and speaker attribution; this
//! core only promises that a started session begins empty and that every
//! finished utterance is logged and persisted.

use std::sync::Arc;

use crate::context::CurrentSession;
use crate::error::PersistError;
use crate::onboarding::{OnboardingService, Speaker};
use crate::prompts::OPENING_LOG_MESSAGE;

/// Entry points the conversational runtime calls into.
pub struct RuntimeHooks {
    service: Arc<OnboardingService>,
    current: Arc<CurrentSession>,
}

impl RuntimeHooks {
    pub fn new(service: Arc<OnboardingService>, current: Arc<CurrentSession>) -> Self {
        Self { service, current }
    }

    /// A new conversational session started.
    ///
    /// Resets the session to empty state, makes it the active session for
    /// the convenience actions, logs the opening assistant message, and
    /// persists.
    pub async fn on_session_started(&self, session_id: &str) -> Result<(), PersistError> {
        self.service.reset(session_id).await?;
        self.current.set(session_id).await;
        self.service
            .log_message(session_id, Speaker::Assistant, OPENING_LOG_MESSAGE)
            .await;
        self.service.save(session_id).await?;
        tracing::info!(session_id, "Conversational session started");
        Ok(())
    }

    /// A participant finished an utterance (or a final transcript arrived).
    ///
    /// Logs the utterance and persists the session. Empty text is skipped
    /// but the session is still saved. Returns whether an entry was logged.
    pub async fn on_utterance_end(
        &self,
        session_id: &str,
        speaker: Speaker,
        text: &str,
    ) -> Result<bool, PersistError> {
        let logged = self.service.log_message(session_id, speaker, text).await;
        self.service.save(session_id).await?;
        Ok(logged)
    }
}
