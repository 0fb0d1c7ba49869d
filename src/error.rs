//! Error types for the onboarding core.

/// Field validation errors.
///
/// Every variant carries enough context to render the rejection string the
/// dialogue policy reads back to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("unknown field '{field}': must be one of name, email, phone, country")]
    UnknownField { field: String },

    #[error("name must be between {min} and {max} characters, got {actual}")]
    NameLength {
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("'{value}' is not a valid email address")]
    EmailFormat { value: String },

    #[error("'{value}' is not a valid international phone number (expected e.g. +14155551234)")]
    PhoneFormat { value: String },

    #[error("'{value}' is not a recognized country name")]
    UnknownCountry { value: String },
}

/// Persistence errors for session records.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("no saved record for session {session_id}")]
    NotFound { session_id: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse session record: {0}")]
    Parse(#[from] serde_json::Error),
}

impl PersistError {
    /// Whether this is the non-fatal "no record yet" case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
