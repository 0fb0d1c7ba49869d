//! End-to-end onboarding flows through the tool surface, including a
//! simulated process restart against the same record directory.

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use voice_onboard::context::CurrentSession;
use voice_onboard::hooks::RuntimeHooks;
use voice_onboard::onboarding::OnboardingService;
use voice_onboard::store::{JsonFileVault, SessionStore};
use voice_onboard::tools::ToolRegistry;
use voice_onboard::tools::builtin::register_onboarding_tools;

struct Harness {
    registry: ToolRegistry,
    service: Arc<OnboardingService>,
    current: Arc<CurrentSession>,
}

/// Build a fresh in-memory core over a record directory, as a new process
/// would after a restart.
async fn harness(data_dir: &Path) -> Harness {
    let store = Arc::new(SessionStore::new());
    let vault = Arc::new(JsonFileVault::new(data_dir));
    let service = Arc::new(OnboardingService::new(store, vault));
    let current = Arc::new(CurrentSession::new());

    let registry = ToolRegistry::new();
    register_onboarding_tools(&registry, Arc::clone(&service), Arc::clone(&current)).await;

    Harness {
        registry,
        service,
        current,
    }
}

async fn dispatch(harness: &Harness, action: &str, params: serde_json::Value) -> String {
    harness.registry.dispatch(action, params).await
}

#[tokio::test]
async fn registry_exposes_the_full_action_surface() {
    let dir = TempDir::new().unwrap();
    let h = harness(dir.path()).await;

    let expected = [
        "validate_field",
        "store_field",
        "log_message",
        "log_message_with_session",
        "log_conversation_turn",
        "save_session",
        "save_current_session",
        "force_save_session",
        "load_session",
        "reset_session",
        "reset_current_session",
        "is_onboarding_complete",
        "get_summary",
        "get_current_state",
        "get_conversation_history",
    ];
    let names = h.registry.list().await;
    for name in expected {
        assert!(names.contains(&name.to_string()), "missing action {name}");
    }
    assert_eq!(names.len(), expected.len());

    // Every definition carries a description and an object schema.
    for def in h.registry.tool_definitions().await {
        assert!(!def.description.is_empty(), "{} has no description", def.name);
        assert_eq!(def.parameters["type"], "object", "{} schema", def.name);
    }
}

#[tokio::test]
async fn invalid_email_is_rejected_everywhere() {
    let dir = TempDir::new().unwrap();
    let h = harness(dir.path()).await;
    h.current.set("s1").await;

    let result = dispatch(
        &h,
        "validate_field",
        serde_json::json!({"field": "email", "value": "not-an-email"}),
    )
    .await;
    assert!(result.starts_with("Invalid email"), "got: {result}");

    let result = dispatch(
        &h,
        "store_field",
        serde_json::json!({"field": "email", "value": "not-an-email"}),
    )
    .await;
    assert!(result.starts_with("Cannot store invalid value"), "got: {result}");

    let state = dispatch(&h, "get_current_state", serde_json::json!({})).await;
    assert!(state.contains("Email: not provided"), "got: {state}");
}

#[tokio::test]
async fn stored_phone_shows_up_in_summary() {
    let dir = TempDir::new().unwrap();
    let h = harness(dir.path()).await;
    h.current.set("s1").await;

    let result = dispatch(
        &h,
        "store_field",
        serde_json::json!({"field": "phone", "value": "+14155551234"}),
    )
    .await;
    assert_eq!(result, "Phone stored successfully: +14155551234");

    let summary = dispatch(&h, "get_summary", serde_json::json!({})).await;
    assert!(summary.contains("Phone: +14155551234"), "got: {summary}");
}

#[tokio::test]
async fn country_must_be_on_the_reference_list() {
    let dir = TempDir::new().unwrap();
    let h = harness(dir.path()).await;
    h.current.set("s1").await;

    let result = dispatch(
        &h,
        "store_field",
        serde_json::json!({"field": "country", "value": "Atlantis"}),
    )
    .await;
    assert!(result.starts_with("Cannot store invalid value"), "got: {result}");

    let result = dispatch(
        &h,
        "store_field",
        serde_json::json!({"field": "country", "value": "Canada"}),
    )
    .await;
    assert_eq!(result, "Country stored successfully: Canada");
}

#[tokio::test]
async fn completing_all_fields_reports_complete() {
    let dir = TempDir::new().unwrap();
    let h = harness(dir.path()).await;
    h.current.set("s1").await;

    let result = dispatch(&h, "is_onboarding_complete", serde_json::json!({})).await;
    assert_eq!(
        result,
        "Onboarding incomplete. Missing: name, email, phone, country"
    );

    for (field, value) in [
        ("name", "Ada Lovelace"),
        ("email", "ada@example.com"),
        ("phone", "+14155551234"),
        ("country", "Canada"),
    ] {
        let result = dispatch(
            &h,
            "store_field",
            serde_json::json!({"field": field, "value": value}),
        )
        .await;
        assert!(result.contains("stored successfully"), "got: {result}");
    }

    let result = dispatch(&h, "is_onboarding_complete", serde_json::json!({})).await;
    assert_eq!(result, "Onboarding complete - all fields filled");

    let summary = dispatch(&h, "get_summary", serde_json::json!({})).await;
    for part in [
        "Name: Ada Lovelace",
        "Email: ada@example.com",
        "Phone: +14155551234",
        "Country: Canada",
    ] {
        assert!(summary.contains(part), "summary missing {part}: {summary}");
    }
}

#[tokio::test]
async fn state_survives_a_process_restart() {
    let dir = TempDir::new().unwrap();
    let session_id = "restart-session";

    // First "process": collect data, log a turn, save.
    {
        let h = harness(dir.path()).await;
        h.current.set(session_id).await;

        dispatch(
            &h,
            "store_field",
            serde_json::json!({"field": "name", "value": "Ada Lovelace"}),
        )
        .await;
        dispatch(
            &h,
            "store_field",
            serde_json::json!({"field": "email", "value": "ada@example.com"}),
        )
        .await;
        dispatch(
            &h,
            "log_conversation_turn",
            serde_json::json!({
                "user_message": "My email is ada@example.com",
                "assistant_response": "Got it, thanks Ada!"
            }),
        )
        .await;
        let result = dispatch(&h, "save_current_session", serde_json::json!({})).await;
        assert!(result.contains("saved successfully"), "got: {result}");
    }

    // Second "process": fresh in-memory store, same record directory.
    let h = harness(dir.path()).await;
    h.current.set(session_id).await;

    let result = dispatch(
        &h,
        "load_session",
        serde_json::json!({"session_id": session_id}),
    )
    .await;
    assert!(result.contains("loaded successfully"), "got: {result}");

    let state = dispatch(&h, "get_current_state", serde_json::json!({})).await;
    assert!(state.contains("Name: Ada Lovelace"), "got: {state}");
    assert!(state.contains("Email: ada@example.com"), "got: {state}");
    assert!(state.contains("Phone: not provided"), "got: {state}");

    let history = dispatch(&h, "get_conversation_history", serde_json::json!({})).await;
    assert!(history.contains("My email is ada@example.com"), "got: {history}");
    assert!(history.contains("Got it, thanks Ada!"), "got: {history}");
}

#[tokio::test]
async fn loading_an_unknown_session_is_not_fatal() {
    let dir = TempDir::new().unwrap();
    let h = harness(dir.path()).await;
    h.current.set("unknown-id").await;

    let result = dispatch(
        &h,
        "load_session",
        serde_json::json!({"session_id": "unknown-id"}),
    )
    .await;
    assert_eq!(result, "Session file not found for unknown-id");

    // The session stays at its default empty state.
    let state = dispatch(&h, "get_current_state", serde_json::json!({})).await;
    assert_eq!(
        state,
        "Current onboarding state: Name: not provided, Email: not provided, \
         Phone: not provided, Country: not provided"
    );
}

#[tokio::test]
async fn reset_clears_durable_state() {
    let dir = TempDir::new().unwrap();
    let h = harness(dir.path()).await;
    h.current.set("s1").await;

    dispatch(
        &h,
        "store_field",
        serde_json::json!({"field": "name", "value": "Ada Lovelace"}),
    )
    .await;
    dispatch(&h, "save_current_session", serde_json::json!({})).await;

    let result = dispatch(&h, "reset_current_session", serde_json::json!({})).await;
    assert!(result.contains("reset successfully"), "got: {result}");

    // A restart sees the reset, not the old data.
    let h2 = harness(dir.path()).await;
    h2.current.set("s1").await;
    dispatch(&h2, "load_session", serde_json::json!({"session_id": "s1"})).await;
    let state = dispatch(&h2, "get_current_state", serde_json::json!({})).await;
    assert!(state.contains("Name: not provided"), "got: {state}");
    let history = dispatch(&h2, "get_conversation_history", serde_json::json!({})).await;
    assert_eq!(history, "No conversation history yet");
}

#[tokio::test]
async fn convenience_actions_fail_cleanly_without_a_session() {
    let dir = TempDir::new().unwrap();
    let h = harness(dir.path()).await;

    // No current session set: the result is a descriptive string, not a fault.
    let result = dispatch(&h, "get_summary", serde_json::json!({})).await;
    assert!(result.contains("No active session"), "got: {result}");

    let result = dispatch(
        &h,
        "store_field",
        serde_json::json!({"field": "name", "value": "Ada"}),
    )
    .await;
    assert!(result.contains("No active session"), "got: {result}");
}

#[tokio::test]
async fn runtime_hooks_drive_a_full_conversation() {
    let dir = TempDir::new().unwrap();
    let h = harness(dir.path()).await;
    let hooks = RuntimeHooks::new(Arc::clone(&h.service), Arc::clone(&h.current));
    let session_id = "hook-session";

    hooks.on_session_started(session_id).await.unwrap();
    assert_eq!(h.current.get().await.as_deref(), Some(session_id));

    hooks
        .on_utterance_end(
            session_id,
            voice_onboard::onboarding::Speaker::User,
            "Hi, I'm Ada",
        )
        .await
        .unwrap();

    // Convenience actions now target the hook-started session.
    let result = dispatch(
        &h,
        "store_field",
        serde_json::json!({"field": "name", "value": "Ada Lovelace"}),
    )
    .await;
    assert!(result.contains("stored successfully"), "got: {result}");

    // Everything the hooks did is durable.
    let h2 = harness(dir.path()).await;
    h2.current.set(session_id).await;
    dispatch(
        &h2,
        "load_session",
        serde_json::json!({"session_id": session_id}),
    )
    .await;
    let history = dispatch(&h2, "get_conversation_history", serde_json::json!({})).await;
    assert!(history.contains("Starting onboarding session..."), "got: {history}");
    assert!(history.contains("Hi, I'm Ada"), "got: {history}");
}
