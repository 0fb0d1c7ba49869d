//! Field validation rules.
//!
//! Pure and deterministic: the same `(field, value)` input always produces
//! the same result, and nothing here touches session state.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;
use crate::onboarding::countries::is_known_country;
use crate::onboarding::model::OnboardingField;

const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 100;

// Local-part @ domain, domain must contain a dot, no whitespace anywhere.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

// E.164-like: optional '+', first digit 1-9, 2-15 digits total.
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9][0-9]{1,14}$").unwrap());

/// Validate a candidate value for one field.
///
/// Returns the trimmed value that should be stored on success. Other fields
/// of the session are never consulted or re-validated.
pub fn validate(field: OnboardingField, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    match field {
        OnboardingField::Name => {
            let len = trimmed.chars().count();
            if (NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len) {
                Ok(trimmed.to_string())
            } else {
                Err(ValidationError::NameLength {
                    min: NAME_MIN_CHARS,
                    max: NAME_MAX_CHARS,
                    actual: len,
                })
            }
        }
        OnboardingField::Email => {
            if EMAIL_PATTERN.is_match(trimmed) {
                Ok(trimmed.to_string())
            } else {
                Err(ValidationError::EmailFormat {
                    value: trimmed.to_string(),
                })
            }
        }
        OnboardingField::Phone => {
            if PHONE_PATTERN.is_match(trimmed) {
                Ok(trimmed.to_string())
            } else {
                Err(ValidationError::PhoneFormat {
                    value: trimmed.to_string(),
                })
            }
        }
        OnboardingField::Country => {
            if is_known_country(trimmed) {
                Ok(trimmed.to_string())
            } else {
                Err(ValidationError::UnknownCountry {
                    value: trimmed.to_string(),
                })
            }
        }
    }
}
