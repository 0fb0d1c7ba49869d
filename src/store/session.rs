//! In-memory session store.
//!
//! Owns every `Session` exclusively: collaborators hold a session id and go
//! through the store for each read or write, so no one can act on a stale
//! copy of the state. Sessions are created on first access and live until
//! process exit; reset zeroes a session's value without removing its key.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::onboarding::model::{
    OnboardingField, OnboardingState, SessionRecord, TranscriptEntry,
};

/// One session's in-memory state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub onboarding: OnboardingState,
    pub transcript: Vec<TranscriptEntry>,
}

/// Keyed map of session id → session, with creation-on-first-access.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Current onboarding state for a session (created empty if absent).
    pub async fn onboarding(&self, session_id: &str) -> OnboardingState {
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session_id.to_string())
            .or_default()
            .onboarding
            .clone()
    }

    /// Current transcript for a session (created empty if absent).
    pub async fn transcript(&self, session_id: &str) -> Vec<TranscriptEntry> {
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session_id.to_string())
            .or_default()
            .transcript
            .clone()
    }

    /// Set one onboarding field. The caller is responsible for having
    /// validated `value` first.
    pub async fn set_field(&self, session_id: &str, field: OnboardingField, value: String) {
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session_id.to_string())
            .or_default()
            .onboarding
            .set(field, value);
    }

    /// Append a transcript entry.
    pub async fn append_entry(&self, session_id: &str, entry: TranscriptEntry) {
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session_id.to_string())
            .or_default()
            .transcript
            .push(entry);
    }

    /// Replace the session's state and transcript with empty values.
    /// The key stays in the map.
    pub async fn reset(&self, session_id: &str) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session_id.to_string(), Session::default());
    }

    /// Replace the in-memory session with the content of a loaded record.
    pub async fn replace(&self, session_id: &str, record: SessionRecord) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(
            session_id.to_string(),
            Session {
                onboarding: record.onboarding_data,
                transcript: record.conversation,
            },
        );
    }

    /// Full snapshot of a session as a persistable record.
    pub async fn record(&self, session_id: &str) -> SessionRecord {
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(session_id.to_string()).or_default();
        SessionRecord {
            session_id: session_id.to_string(),
            onboarding_data: session.onboarding.clone(),
            conversation: session.transcript.clone(),
        }
    }

    /// Number of sessions the store has seen.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onboarding::model::Speaker;

    #[tokio::test]
    async fn first_access_creates_empty_session() {
        let store = SessionStore::new();
        assert!(store.is_empty().await);

        let state = store.onboarding("s1").await;
        assert_eq!(state, OnboardingState::default());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn set_field_is_visible_on_next_read() {
        let store = SessionStore::new();
        store
            .set_field("s1", OnboardingField::Email, "a@b.co".to_string())
            .await;
        let state = store.onboarding("s1").await;
        assert_eq!(state.email.as_deref(), Some("a@b.co"));
    }

    #[tokio::test]
    async fn sessions_are_independent() {
        let store = SessionStore::new();
        store
            .set_field("s1", OnboardingField::Name, "Ada".to_string())
            .await;
        store
            .set_field("s2", OnboardingField::Name, "Grace".to_string())
            .await;

        assert_eq!(store.onboarding("s1").await.name.as_deref(), Some("Ada"));
        assert_eq!(store.onboarding("s2").await.name.as_deref(), Some("Grace"));
    }

    #[tokio::test]
    async fn reset_zeroes_but_keeps_key() {
        let store = SessionStore::new();
        store
            .set_field("s1", OnboardingField::Name, "Ada".to_string())
            .await;
        store
            .append_entry("s1", TranscriptEntry::now(Speaker::User, "hi"))
            .await;

        store.reset("s1").await;

        assert_eq!(store.len().await, 1);
        assert_eq!(store.onboarding("s1").await, OnboardingState::default());
        assert!(store.transcript("s1").await.is_empty());
    }

    #[tokio::test]
    async fn transcript_preserves_append_order() {
        let store = SessionStore::new();
        store
            .append_entry("s1", TranscriptEntry::now(Speaker::Assistant, "hello"))
            .await;
        store
            .append_entry("s1", TranscriptEntry::now(Speaker::User, "hi there"))
            .await;

        let transcript = store.transcript("s1").await;
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].speaker, Speaker::Assistant);
        assert_eq!(transcript[1].speaker, Speaker::User);
    }

    #[tokio::test]
    async fn replace_overwrites_full_session() {
        let store = SessionStore::new();
        store
            .set_field("s1", OnboardingField::Name, "Old".to_string())
            .await;

        let mut record = SessionRecord::empty("s1");
        record.onboarding_data.name = Some("New".to_string());
        record
            .conversation
            .push(TranscriptEntry::now(Speaker::User, "loaded"));
        store.replace("s1", record).await;

        assert_eq!(store.onboarding("s1").await.name.as_deref(), Some("New"));
        assert_eq!(store.transcript("s1").await.len(), 1);
    }

    #[tokio::test]
    async fn record_snapshots_state_and_transcript() {
        let store = SessionStore::new();
        store
            .set_field("s1", OnboardingField::Country, "Canada".to_string())
            .await;
        store
            .append_entry("s1", TranscriptEntry::now(Speaker::User, "Canada"))
            .await;

        let record = store.record("s1").await;
        assert_eq!(record.session_id, "s1");
        assert_eq!(record.onboarding_data.country.as_deref(), Some("Canada"));
        assert_eq!(record.conversation.len(), 1);
    }
}
