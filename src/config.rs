//! Configuration types.

use std::path::PathBuf;

/// Core configuration.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Directory where session record files are written.
    pub data_dir: PathBuf,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./sessions"),
        }
    }
}

impl CoreConfig {
    /// Build from environment variables, falling back to defaults.
    ///
    /// `VOICE_ONBOARD_DATA_DIR` overrides the session record directory.
    pub fn from_env() -> Self {
        let data_dir = std::env::var("VOICE_ONBOARD_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::default().data_dir);
        Self { data_dir }
    }
}
