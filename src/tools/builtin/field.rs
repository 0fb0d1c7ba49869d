//! Field validation and storage actions.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::context::{CallContext, CurrentSession};
use crate::onboarding::OnboardingService;
use crate::tools::builtin::require_current;
use crate::tools::tool::{Tool, ToolError, ToolOutput, require_str};

const FIELD_SCHEMA_DESCRIPTION: &str = r#"One of "name", "email", "phone", "country""#;

// ── validate_field ──────────────────────────────────────────────────

/// Preview validation of a candidate value without storing anything.
pub struct ValidateFieldTool {
    service: Arc<OnboardingService>,
}

impl ValidateFieldTool {
    pub fn new(service: Arc<OnboardingService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for ValidateFieldTool {
    fn name(&self) -> &str {
        "validate_field"
    }

    fn description(&self) -> &str {
        "Validate a user-provided onboarding field value before storing it. \
         Checks the value against the field's format rule and reports why an \
         invalid value was rejected. Does not store anything."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "field": {
                    "type": "string",
                    "enum": ["name", "email", "phone", "country"],
                    "description": FIELD_SCHEMA_DESCRIPTION
                },
                "value": {
                    "type": "string",
                    "description": "The user's provided value to validate"
                }
            },
            "required": ["field", "value"]
        })
    }

    async fn execute(
        &self,
        params: serde_json::Value,
        _ctx: &CallContext,
    ) -> Result<ToolOutput, ToolError> {
        let start = Instant::now();
        let field = require_str(&params, "field")?;
        let value = require_str(&params, "value")?;

        let result = match self.service.validate_field(field, value) {
            Ok(normalized) => serde_json::json!({
                "status": "valid",
                "field": field,
                "value": normalized,
                "message": format!("Valid {field}: {normalized}"),
            }),
            Err(e) => serde_json::json!({
                "status": "invalid",
                "field": field,
                "message": format!("Invalid {field}: {e}"),
            }),
        };

        Ok(ToolOutput::success(result, start.elapsed()))
    }
}

// ── store_field ─────────────────────────────────────────────────────

/// Validate and store a field for the current session.
///
/// Validation re-runs internally; a prior `validate_field` call is never
/// trusted.
pub struct StoreFieldTool {
    service: Arc<OnboardingService>,
    current: Arc<CurrentSession>,
}

impl StoreFieldTool {
    pub fn new(service: Arc<OnboardingService>, current: Arc<CurrentSession>) -> Self {
        Self { service, current }
    }
}

#[async_trait]
impl Tool for StoreFieldTool {
    fn name(&self) -> &str {
        "store_field"
    }

    fn description(&self) -> &str {
        "Store a validated onboarding field value for the current session. \
         The value is re-validated before storing; invalid values are \
         rejected and the field keeps its previous value."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "field": {
                    "type": "string",
                    "enum": ["name", "email", "phone", "country"],
                    "description": FIELD_SCHEMA_DESCRIPTION
                },
                "value": {
                    "type": "string",
                    "description": "The value to validate and store"
                }
            },
            "required": ["field", "value"]
        })
    }

    async fn execute(
        &self,
        params: serde_json::Value,
        _ctx: &CallContext,
    ) -> Result<ToolOutput, ToolError> {
        let start = Instant::now();
        let field = require_str(&params, "field")?;
        let value = require_str(&params, "value")?;
        let session_id = require_current(&self.current).await?;

        let result = match self.service.store_field(&session_id, field, value).await {
            Ok((stored_field, normalized)) => serde_json::json!({
                "status": "stored",
                "field": stored_field.as_str(),
                "value": normalized,
                "message": format!(
                    "{} stored successfully: {normalized}",
                    stored_field.label()
                ),
            }),
            Err(e) => serde_json::json!({
                "status": "rejected",
                "field": field,
                "message": format!("Cannot store invalid value: Invalid {field}: {e}"),
            }),
        };

        Ok(ToolOutput::success(result, start.elapsed()))
    }
}
