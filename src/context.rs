//! Call context and the process-wide active-session pointer.

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-wide pointer to the active session.
///
/// Zero-argument convenience actions resolve their target from this slot at
/// call time. It is a single shared value: safe with one active conversation
/// per process, and documented as such. Anything driving multiple sessions
/// concurrently must use the explicit-id actions instead.
pub struct CurrentSession {
    id: RwLock<Option<String>>,
}

impl CurrentSession {
    /// Start with no active session.
    pub fn new() -> Self {
        Self {
            id: RwLock::new(None),
        }
    }

    /// Overwrite the active session id.
    pub async fn set(&self, session_id: &str) {
        let mut id = self.id.write().await;
        *id = Some(session_id.to_string());
        tracing::debug!(session_id, "Active session set");
    }

    /// The active session id, if one has been set.
    pub async fn get(&self) -> Option<String> {
        self.id.read().await.clone()
    }
}

impl Default for CurrentSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Minimal per-invocation context handed to tools.
#[derive(Debug, Clone)]
pub struct CallContext {
    /// Unique id for this tool invocation.
    pub call_id: Uuid,
    /// When the invocation started.
    pub invoked_at: DateTime<Utc>,
}

impl Default for CallContext {
    fn default() -> Self {
        Self {
            call_id: Uuid::new_v4(),
            invoked_at: Utc::now(),
        }
    }
}
