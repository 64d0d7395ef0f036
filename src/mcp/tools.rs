//! Tool registry and handler map
//!
//! Two parallel static structures built once at first use:
//!   - an ordered list of tool descriptors (name, description, input schema,
//!     annotations) advertised via `tools/list`,
//!   - a map from tool name to handler function invoked via `tools/call`.
//!
//! Every handler extracts its arguments, issues exactly one call against the
//! injected [`ApiClient`], and returns the response unchanged. No constraint
//! semantics are interpreted locally.

pub mod constraints;
pub mod state;
pub mod types;

use crate::api::ApiClient;
use crate::error::Error;
use futures::future::BoxFuture;
use rmcp::model::{JsonObject, Tool, ToolAnnotations};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

/// Handler signature shared by every tool: borrow the API client, consume the
/// argument object, resolve to the forwarded response.
pub type HandlerFn =
    for<'a> fn(&'a dyn ApiClient, JsonObject) -> BoxFuture<'a, Result<Value, Error>>;

static REGISTRY: LazyLock<Vec<Tool>> = LazyLock::new(|| {
    let mut tools = constraints::tools();
    tools.extend(state::tools());
    tools
});

static HANDLERS: LazyLock<HashMap<&'static str, HandlerFn>> = LazyLock::new(|| {
    constraints::handlers()
        .into_iter()
        .chain(state::handlers())
        .collect()
});

/// All tool descriptors, in declaration order.
pub fn registry() -> Vec<Tool> {
    REGISTRY.clone()
}

/// Look up the handler for a tool name.
pub fn handler(name: &str) -> Option<&'static HandlerFn> {
    HANDLERS.get(name)
}

/// Build a tool descriptor whose input schema is generated from `T`.
fn tool<T: JsonSchema>(
    name: &'static str,
    description: &'static str,
    annotations: ToolAnnotations,
) -> Tool {
    let mut tool = Tool::new(name, description, input_schema::<T>());
    tool.annotations = Some(annotations);
    tool
}

/// Generate a JSON schema for a request type. Optional fields stay plain
/// (no `null` union type) and are left out of `required`, so "field absent"
/// remains expressible by the caller.
fn input_schema<T: JsonSchema>() -> Arc<JsonObject> {
    let generator = schemars::r#gen::SchemaSettings::draft07()
        .with(|settings| {
            settings.option_add_null_type = false;
            settings.inline_subschemas = true;
        })
        .into_generator();
    let schema = generator.into_root_schema_for::<T>().schema;
    let value = serde_json::to_value(schema).expect("request schema serializes to JSON");

    match value {
        Value::Object(object) => Arc::new(object),
        _ => unreachable!("derived request schema is always a JSON object"),
    }
}

/// Deserialize the raw argument object into a typed request.
fn parse_args<T: DeserializeOwned>(args: JsonObject) -> Result<T, Error> {
    serde_json::from_value(Value::Object(args)).map_err(|e| Error::InvalidInput(e.to_string()))
}
