//! Data model for an onboarding session: collected fields, transcript
//! entries, and the on-disk record shape.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The four onboarding fields collected during a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnboardingField {
    Name,
    Email,
    Phone,
    Country,
}

impl OnboardingField {
    /// All fields, in the order they are collected and reported.
    pub const ALL: [OnboardingField; 4] = [Self::Name, Self::Email, Self::Phone, Self::Country];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Country => "country",
        }
    }

    /// Capitalized label for user-facing summaries ("Name", "Email", ...).
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Country => "Country",
        }
    }
}

impl FromStr for OnboardingField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            "country" => Ok(Self::Country),
            other => Err(ValidationError::UnknownField {
                field: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for OnboardingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The collected onboarding data for one session.
///
/// A field is `Some` only if its value most recently passed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingState {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl OnboardingState {
    pub fn get(&self, field: OnboardingField) -> Option<&str> {
        match field {
            OnboardingField::Name => self.name.as_deref(),
            OnboardingField::Email => self.email.as_deref(),
            OnboardingField::Phone => self.phone.as_deref(),
            OnboardingField::Country => self.country.as_deref(),
        }
    }

    pub fn set(&mut self, field: OnboardingField, value: String) {
        match field {
            OnboardingField::Name => self.name = Some(value),
            OnboardingField::Email => self.email = Some(value),
            OnboardingField::Phone => self.phone = Some(value),
            OnboardingField::Country => self.country = Some(value),
        }
    }

    /// Fields not yet filled, in collection order.
    pub fn missing_fields(&self) -> Vec<OnboardingField> {
        OnboardingField::ALL
            .into_iter()
            .filter(|f| self.get(*f).is_none())
            .collect()
    }

    /// Complete ⇔ all four fields are filled.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Filled `(field, value)` pairs, in collection order.
    pub fn filled_fields(&self) -> Vec<(OnboardingField, &str)> {
        OnboardingField::ALL
            .into_iter()
            .filter_map(|f| self.get(f).map(|v| (f, v)))
            .collect()
    }
}

/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

impl FromStr for Speaker {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "assistant" => Ok(Self::Assistant),
            other => Err(format!(
                "unknown speaker '{other}': must be 'user' or 'assistant'"
            )),
        }
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Assistant => f.write_str("assistant"),
        }
    }
}

/// One immutable transcript entry. Append order is chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl TranscriptEntry {
    /// Build an entry stamped with the current time.
    pub fn now(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// On-disk projection of a session, one JSON file per session.
///
/// Partial or missing fields deserialize to empty values, never to a crash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: String,
    #[serde(default)]
    pub onboarding_data: OnboardingState,
    #[serde(default)]
    pub conversation: Vec<TranscriptEntry>,
}

impl SessionRecord {
    /// An empty record for a session with no collected data.
    pub fn empty(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            onboarding_data: OnboardingState::default(),
            conversation: Vec::new(),
        }
    }
}
