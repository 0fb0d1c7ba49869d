//! Session operations — the orchestration layer between the validator, the
//! in-memory store, and the record vault.
//!
//! Every method takes the session id explicitly; resolving "the current
//! session" is left to the convenience tool layer. Failed saves and loads
//! leave the in-memory session untouched.

use std::sync::Arc;

use crate::error::{PersistError, ValidationError};
use crate::onboarding::model::{OnboardingField, Speaker, TranscriptEntry};
use crate::onboarding::validate;
use crate::store::{RecordVault, SessionStore};

/// Orchestrates validate/store/log/save/load/reset for onboarding sessions.
pub struct OnboardingService {
    store: Arc<SessionStore>,
    vault: Arc<dyn RecordVault>,
}

impl OnboardingService {
    pub fn new(store: Arc<SessionStore>, vault: Arc<dyn RecordVault>) -> Self {
        Self { store, vault }
    }

    /// Preview validation for a candidate value. Pure: never mutates state.
    ///
    /// Returns the normalized value that `store_field` would store.
    pub fn validate_field(&self, field: &str, value: &str) -> Result<String, ValidationError> {
        let field: OnboardingField = field.parse()?;
        validate::validate(field, value)
    }

    /// Validate and store one field.
    ///
    /// Validation always re-runs here; a prior `validate_field` call from the
    /// caller is never trusted. On failure the field keeps its old value.
    pub async fn store_field(
        &self,
        session_id: &str,
        field: &str,
        value: &str,
    ) -> Result<(OnboardingField, String), ValidationError> {
        let field: OnboardingField = field.parse()?;
        let normalized = validate::validate(field, value)?;
        self.store
            .set_field(session_id, field, normalized.clone())
            .await;
        tracing::info!(session_id, field = %field, "Stored onboarding field");
        Ok((field, normalized))
    }

    /// Append a transcript entry. Empty-after-trim text is silently skipped;
    /// returns whether an entry was appended.
    pub async fn log_message(&self, session_id: &str, speaker: Speaker, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.store
            .append_entry(session_id, TranscriptEntry::now(speaker, trimmed))
            .await;
        tracing::debug!(session_id, speaker = %speaker, chars = trimmed.len(), "Logged message");
        true
    }

    /// Log a full conversation turn (user then assistant, skipping empty
    /// texts) and persist the session afterward. Returns how many entries
    /// were appended.
    pub async fn log_turn(
        &self,
        session_id: &str,
        user_text: &str,
        assistant_text: &str,
    ) -> Result<usize, PersistError> {
        let mut appended = 0;
        if self.log_message(session_id, Speaker::User, user_text).await {
            appended += 1;
        }
        if self
            .log_message(session_id, Speaker::Assistant, assistant_text)
            .await
        {
            appended += 1;
        }
        self.save(session_id).await?;
        Ok(appended)
    }

    /// Snapshot the session to the vault.
    pub async fn save(&self, session_id: &str) -> Result<(), PersistError> {
        let record = self.store.record(session_id).await;
        self.vault.save(&record).await?;
        tracing::info!(
            session_id,
            messages = record.conversation.len(),
            "Session saved"
        );
        Ok(())
    }

    /// Load a session record from the vault, replacing the in-memory session.
    ///
    /// Returns the number of transcript entries loaded. `NotFound` leaves the
    /// in-memory session as it was.
    pub async fn load(&self, session_id: &str) -> Result<usize, PersistError> {
        let record = self.vault.load(session_id).await?;
        let messages = record.conversation.len();
        self.store.replace(session_id, record).await;
        tracing::info!(session_id, messages, "Session loaded");
        Ok(messages)
    }

    /// Reset the session to empty state and immediately persist the reset.
    pub async fn reset(&self, session_id: &str) -> Result<(), PersistError> {
        self.store.reset(session_id).await;
        self.save(session_id).await?;
        tracing::info!(session_id, "Session reset");
        Ok(())
    }

    /// Fields still missing; empty means onboarding is complete.
    pub async fn missing_fields(&self, session_id: &str) -> Vec<OnboardingField> {
        self.store.onboarding(session_id).await.missing_fields()
    }

    /// Filled `(field, value)` pairs for the summary view.
    pub async fn collected(&self, session_id: &str) -> Vec<(OnboardingField, String)> {
        self.store
            .onboarding(session_id)
            .await
            .filled_fields()
            .into_iter()
            .map(|(f, v)| (f, v.to_string()))
            .collect()
    }

    /// All four fields with their current values (`None` = not provided).
    pub async fn field_values(&self, session_id: &str) -> Vec<(OnboardingField, Option<String>)> {
        let state = self.store.onboarding(session_id).await;
        OnboardingField::ALL
            .into_iter()
            .map(|f| (f, state.get(f).map(str::to_string)))
            .collect()
    }

    /// The session's transcript in append order.
    pub async fn history(&self, session_id: &str) -> Vec<TranscriptEntry> {
        self.store.transcript(session_id).await
    }
}
