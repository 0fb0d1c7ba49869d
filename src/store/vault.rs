//! Durable storage for session records.
//!
//! One JSON file per session, named deterministically from the session id.
//! Absence of a record is `PersistError::NotFound`, which callers treat as
//! "start fresh" rather than a fault.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::error::PersistError;
use crate::onboarding::model::SessionRecord;

/// Backend-agnostic store for session records.
#[async_trait]
pub trait RecordVault: Send + Sync {
    /// Persist a record, overwriting any prior record for the same id.
    async fn save(&self, record: &SessionRecord) -> Result<(), PersistError>;

    /// Load the record for a session id, or `NotFound` if none exists.
    async fn load(&self, session_id: &str) -> Result<SessionRecord, PersistError>;
}

/// File-backed vault: `<base_dir>/session_<id>.json`, UTF-8, pretty-printed.
pub struct JsonFileVault {
    base_dir: PathBuf,
}

impl JsonFileVault {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn record_path(&self, session_id: &str) -> PathBuf {
        self.base_dir.join(format!("session_{session_id}.json"))
    }
}

#[async_trait]
impl RecordVault for JsonFileVault {
    async fn save(&self, record: &SessionRecord) -> Result<(), PersistError> {
        fs::create_dir_all(&self.base_dir).await?;

        let json = serde_json::to_string_pretty(record)?;
        let path = self.record_path(&record.session_id);

        // Write to a sibling temp file and rename, so a record on disk is
        // always a complete snapshot.
        let tmp_path = self.base_dir.join(format!(
            ".session_{}.json.tmp",
            record.session_id
        ));
        fs::write(&tmp_path, json.as_bytes()).await?;
        fs::rename(&tmp_path, &path).await?;

        tracing::debug!(
            session_id = %record.session_id,
            messages = record.conversation.len(),
            path = %path.display(),
            "Saved session record"
        );
        Ok(())
    }

    async fn load(&self, session_id: &str) -> Result<SessionRecord, PersistError> {
        let path = self.record_path(session_id);
        if !path.exists() {
            return Err(PersistError::NotFound {
                session_id: session_id.to_string(),
            });
        }

        let content = fs::read_to_string(&path).await?;
        let record: SessionRecord = serde_json::from_str(&content)?;

        tracing::debug!(
            session_id = %session_id,
            messages = record.conversation.len(),
            "Loaded session record"
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onboarding::model::{Speaker, TranscriptEntry};
    use tempfile::TempDir;

    fn test_vault() -> (JsonFileVault, TempDir) {
        let dir = TempDir::new().unwrap();
        let vault = JsonFileVault::new(dir.path());
        (vault, dir)
    }

    #[tokio::test]
    async fn save_then_load_roundtrip() {
        let (vault, _dir) = test_vault();

        let mut record = SessionRecord::empty("abc-123");
        record.onboarding_data.name = Some("Ada Lovelace".to_string());
        record.onboarding_data.phone = Some("+14155551234".to_string());
        record
            .conversation
            .push(TranscriptEntry::now(Speaker::User, "my name is Ada"));

        vault.save(&record).await.unwrap();
        let loaded = vault.load("abc-123").await.unwrap();
        assert_eq!(loaded, record);
    }

    #[tokio::test]
    async fn load_missing_record_is_not_found() {
        let (vault, _dir) = test_vault();
        let err = vault.load("nope").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn save_overwrites_prior_record() {
        let (vault, _dir) = test_vault();

        let mut record = SessionRecord::empty("s1");
        record.onboarding_data.name = Some("First".to_string());
        vault.save(&record).await.unwrap();

        record.onboarding_data.name = Some("Second".to_string());
        vault.save(&record).await.unwrap();

        let loaded = vault.load("s1").await.unwrap();
        assert_eq!(loaded.onboarding_data.name.as_deref(), Some("Second"));
    }

    #[tokio::test]
    async fn repeated_save_is_byte_identical() {
        let (vault, dir) = test_vault();

        let mut record = SessionRecord::empty("s1");
        record.onboarding_data.email = Some("a@b.co".to_string());

        vault.save(&record).await.unwrap();
        let first = std::fs::read(dir.path().join("session_s1.json")).unwrap();
        vault.save(&record).await.unwrap();
        let second = std::fs::read(dir.path().join("session_s1.json")).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn record_file_uses_deterministic_name() {
        let (vault, dir) = test_vault();
        vault.save(&SessionRecord::empty("my-id")).await.unwrap();
        assert!(dir.path().join("session_my-id.json").exists());
    }

    #[tokio::test]
    async fn no_temp_file_left_behind() {
        let (vault, dir) = test_vault();
        vault.save(&SessionRecord::empty("s1")).await.unwrap();
        assert!(!dir.path().join(".session_s1.json.tmp").exists());
    }

    #[tokio::test]
    async fn corrupt_record_is_a_parse_error() {
        let (vault, dir) = test_vault();
        std::fs::write(dir.path().join("session_bad.json"), "{not json").unwrap();

        let err = vault.load("bad").await.unwrap_err();
        assert!(matches!(err, PersistError::Parse(_)));
    }

    #[tokio::test]
    async fn creates_base_dir_on_first_save() {
        let dir = TempDir::new().unwrap();
        let vault = JsonFileVault::new(dir.path().join("nested/sessions"));
        vault.save(&SessionRecord::empty("s1")).await.unwrap();
        assert!(dir.path().join("nested/sessions/session_s1.json").exists());
    }
}
