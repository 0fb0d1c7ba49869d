use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use voice_onboard::config::CoreConfig;
use voice_onboard::context::CurrentSession;
use voice_onboard::hooks::RuntimeHooks;
use voice_onboard::onboarding::OnboardingService;
use voice_onboard::store::{JsonFileVault, SessionStore};
use voice_onboard::tools::ToolRegistry;
use voice_onboard::tools::builtin::register_onboarding_tools;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = CoreConfig::from_env();
    let session_id = uuid::Uuid::new_v4().to_string();

    eprintln!("🎙️  Voice Onboard v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Session dir: {}", config.data_dir.display());
    eprintln!("   Session id:  {}", session_id);
    eprintln!("   Invoke actions as: <action> <json-params>");
    eprintln!("   /tools lists actions, /quit exits.\n");

    // ── Core wiring ──────────────────────────────────────────────────
    let store = Arc::new(SessionStore::new());
    let vault = Arc::new(JsonFileVault::new(config.data_dir.clone()));
    let service = Arc::new(OnboardingService::new(store, vault));
    let current = Arc::new(CurrentSession::new());

    let registry = ToolRegistry::new();
    register_onboarding_tools(&registry, Arc::clone(&service), Arc::clone(&current)).await;
    eprintln!("   Actions: {} registered\n", registry.count().await);

    // Stand-in for the conversational runtime: start one session.
    let hooks = RuntimeHooks::new(Arc::clone(&service), Arc::clone(&current));
    hooks.on_session_started(&session_id).await?;

    // ── REPL driving the action surface ──────────────────────────────
    let stdin = tokio::io::stdin();
    let reader = BufReader::new(stdin);
    let mut lines = reader.lines();

    eprint!("> ");
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            eprint!("> ");
            continue;
        }
        if line == "/quit" {
            break;
        }
        if line == "/tools" {
            for def in registry.tool_definitions().await {
                println!("{} — {}", def.name, def.description);
            }
            eprint!("> ");
            continue;
        }

        let (action, raw_params) = match line.split_once(' ') {
            Some((action, rest)) => (action, rest.trim()),
            None => (line, ""),
        };
        let params = if raw_params.is_empty() {
            serde_json::json!({})
        } else {
            match serde_json::from_str(raw_params) {
                Ok(value) => value,
                Err(e) => {
                    println!("Invalid JSON parameters: {e}\n");
                    eprint!("> ");
                    continue;
                }
            }
        };

        let result = registry.dispatch(action, params).await;
        println!("{result}\n");
        eprint!("> ");
    }

    Ok(())
}
