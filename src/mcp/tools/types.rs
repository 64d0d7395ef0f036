//! Tool request types with JSON schemas
//!
//! One struct per tool; the declared input schema of each tool is generated
//! from these. `Option` fields are optional on the wire, and an absent field
//! means the corresponding key is omitted from the outgoing request entirely.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value};

// ============================================================================
// Constraint tools
// ============================================================================

/// Request for get_constraints tool
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetConstraintsRequest {
    #[schemars(description = "The passport ID")]
    pub passport_id: String,
}

/// Request for set_constraints tool
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SetConstraintsRequest {
    #[schemars(description = "The passport ID")]
    pub passport_id: String,

    #[schemars(
        description = "Constraint map (e.g., { \"read\": { \"core:rate:max_per_minute\": 100 } })"
    )]
    pub constraints: Map<String, Value>,
}

/// Request for list_constraint_types tool
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListConstraintTypesRequest {
    #[schemars(description = "Filter by category (e.g., \"cost\", \"rate\")")]
    pub category: Option<String>,
}

/// Request for list_constraint_templates tool
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListConstraintTemplatesRequest {
    #[schemars(description = "Filter by category")]
    pub category: Option<String>,
}

/// Request for apply_constraint_template tool
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ApplyConstraintTemplateRequest {
    #[schemars(description = "The passport ID")]
    pub passport_id: String,

    #[schemars(description = "Template slug to apply (e.g., \"conservative-agent\")")]
    pub template_slug: String,
}

/// Request for create_constraint_template tool
///
/// Used for schema generation only; the handler forwards the raw argument
/// object verbatim as the POST body.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateConstraintTemplateRequest {
    #[schemars(description = "Unique slug identifier")]
    pub slug: String,

    #[schemars(description = "Human-readable name")]
    pub name: String,

    #[schemars(description = "Optional description")]
    pub description: Option<String>,

    #[schemars(description = "Optional category")]
    pub category: Option<String>,

    #[schemars(description = "Constraint definitions")]
    pub constraints: Map<String, Value>,
}

// ============================================================================
// Cumulative state tools
// ============================================================================

/// Request for get_cumulative_state tool
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetCumulativeStateRequest {
    #[schemars(description = "The passport ID")]
    pub passport_id: String,
}

/// Request for reset_cumulative_state tool
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ResetCumulativeStateRequest {
    #[schemars(description = "The passport ID")]
    pub passport_id: String,

    #[schemars(description = "Window type to reset (e.g., \"daily\", \"hourly\")")]
    pub window_type: Option<String>,
}
