//! Onboarding domain: collected fields, validation rules, and the session
//! operations the dialogue policy drives.

pub mod countries;
pub mod model;
pub mod service;
pub mod validate;

pub use model::{
    OnboardingField, OnboardingState, SessionRecord, Speaker, TranscriptEntry,
};
pub use service::OnboardingService;
