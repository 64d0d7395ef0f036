//! Constraint and template tools

use super::types::{
    ApplyConstraintTemplateRequest, CreateConstraintTemplateRequest, GetConstraintsRequest,
    ListConstraintTemplatesRequest, ListConstraintTypesRequest, SetConstraintsRequest,
};
use super::{HandlerFn, parse_args, tool};
use crate::api::ApiClient;
use crate::error::Error;
use futures::future::BoxFuture;
use rmcp::model::{JsonObject, Tool, ToolAnnotations};
use serde_json::Value;

pub(super) fn tools() -> Vec<Tool> {
    vec![
        tool::<GetConstraintsRequest>(
            "get_constraints",
            "Get constraints for a passport.",
            ToolAnnotations {
                title: Some("Get Constraints".to_string()),
                read_only_hint: Some(true),
                destructive_hint: Some(false),
                idempotent_hint: None,
                open_world_hint: Some(true),
            },
        ),
        tool::<SetConstraintsRequest>(
            "set_constraints",
            "Set constraints on a passport.",
            ToolAnnotations {
                title: Some("Set Constraints".to_string()),
                read_only_hint: Some(false),
                destructive_hint: Some(true),
                idempotent_hint: Some(true),
                open_world_hint: Some(true),
            },
        ),
        tool::<ListConstraintTypesRequest>(
            "list_constraint_types",
            "List available constraint type definitions.",
            ToolAnnotations {
                title: Some("List Constraint Types".to_string()),
                read_only_hint: Some(true),
                destructive_hint: Some(false),
                idempotent_hint: None,
                open_world_hint: Some(true),
            },
        ),
        tool::<ListConstraintTemplatesRequest>(
            "list_constraint_templates",
            "List system and user constraint templates.",
            ToolAnnotations {
                title: Some("List Constraint Templates".to_string()),
                read_only_hint: Some(true),
                destructive_hint: Some(false),
                idempotent_hint: None,
                open_world_hint: Some(true),
            },
        ),
        tool::<ApplyConstraintTemplateRequest>(
            "apply_constraint_template",
            "Apply a constraint template to a passport.",
            ToolAnnotations {
                title: Some("Apply Constraint Template".to_string()),
                read_only_hint: Some(false),
                destructive_hint: Some(true),
                // The server may compose the template with existing
                // constraints; merge semantics are owned by the remote API.
                idempotent_hint: Some(false),
                open_world_hint: Some(true),
            },
        ),
        tool::<CreateConstraintTemplateRequest>(
            "create_constraint_template",
            "Create a user constraint template.",
            ToolAnnotations {
                title: Some("Create Constraint Template".to_string()),
                read_only_hint: Some(false),
                destructive_hint: Some(false),
                idempotent_hint: Some(false),
                open_world_hint: Some(true),
            },
        ),
    ]
}

pub(super) fn handlers() -> Vec<(&'static str, HandlerFn)> {
    vec![
        ("get_constraints", get_constraints),
        ("set_constraints", set_constraints),
        ("list_constraint_types", list_constraint_types),
        ("list_constraint_templates", list_constraint_templates),
        ("apply_constraint_template", apply_constraint_template),
        ("create_constraint_template", create_constraint_template),
    ]
}

fn get_constraints<'a>(
    api: &'a dyn ApiClient,
    args: JsonObject,
) -> BoxFuture<'a, Result<Value, Error>> {
    Box::pin(async move {
        let request: GetConstraintsRequest = parse_args(args)?;
        tracing::debug!(passport_id = %request.passport_id, "get_constraints");
        api.get(
            &format!("/api/passports/{}/constraints", request.passport_id),
            &[],
        )
        .await
    })
}

fn set_constraints<'a>(
    api: &'a dyn ApiClient,
    args: JsonObject,
) -> BoxFuture<'a, Result<Value, Error>> {
    Box::pin(async move {
        let request: SetConstraintsRequest = parse_args(args)?;
        tracing::debug!(passport_id = %request.passport_id, "set_constraints");
        api.put(
            &format!("/api/passports/{}/constraints", request.passport_id),
            Value::Object(request.constraints),
        )
        .await
    })
}

fn list_constraint_types<'a>(
    api: &'a dyn ApiClient,
    args: JsonObject,
) -> BoxFuture<'a, Result<Value, Error>> {
    Box::pin(async move {
        let request: ListConstraintTypesRequest = parse_args(args)?;
        tracing::debug!(category = ?request.category, "list_constraint_types");
        api.get("/api/constraints/types", &category_query(request.category))
            .await
    })
}

fn list_constraint_templates<'a>(
    api: &'a dyn ApiClient,
    args: JsonObject,
) -> BoxFuture<'a, Result<Value, Error>> {
    Box::pin(async move {
        let request: ListConstraintTemplatesRequest = parse_args(args)?;
        tracing::debug!(category = ?request.category, "list_constraint_templates");
        api.get(
            "/api/constraint-templates",
            &category_query(request.category),
        )
        .await
    })
}

fn apply_constraint_template<'a>(
    api: &'a dyn ApiClient,
    args: JsonObject,
) -> BoxFuture<'a, Result<Value, Error>> {
    Box::pin(async move {
        let request: ApplyConstraintTemplateRequest = parse_args(args)?;
        tracing::debug!(
            passport_id = %request.passport_id,
            template_slug = %request.template_slug,
            "apply_constraint_template"
        );
        api.post(
            &format!("/api/passports/{}/constraints", request.passport_id),
            serde_json::json!({ "template_slug": request.template_slug }),
        )
        .await
    })
}

fn create_constraint_template<'a>(
    api: &'a dyn ApiClient,
    args: JsonObject,
) -> BoxFuture<'a, Result<Value, Error>> {
    Box::pin(async move {
        tracing::debug!(slug = ?args.get("slug"), "create_constraint_template");
        // The whole argument object is the template definition; forward it
        // verbatim.
        api.post("/api/constraint-templates", Value::Object(args))
            .await
    })
}

/// A query slice with `category` only when the filter was given, so an
/// omitted filter stays absent from the request URL.
fn category_query(category: Option<String>) -> Vec<(String, String)> {
    match category {
        Some(category) => vec![("category".to_string(), category)],
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockApiClient;
    use serde_json::json;

    fn args(value: Value) -> JsonObject {
        match value {
            Value::Object(object) => object,
            _ => panic!("test arguments must be a JSON object"),
        }
    }

    #[tokio::test]
    async fn get_constraints_forwards_to_passport_resource() {
        // Given: API returns a constraint map for p1
        let mut api = MockApiClient::new();
        api.expect_get()
            .withf(|path, query| path == "/api/passports/p1/constraints" && query.is_empty())
            .return_once(|_, _| Ok(json!({"read": {}})));

        // When: handler invoked with passport_id
        let result = get_constraints(&api, args(json!({"passport_id": "p1"}))).await;

        // Then: the response body comes back unchanged
        assert_eq!(result.unwrap(), json!({"read": {}}));
    }

    #[tokio::test]
    async fn set_constraints_puts_constraint_map_as_body() {
        let mut api = MockApiClient::new();
        api.expect_put()
            .withf(|path, body| {
                path == "/api/passports/p1/constraints"
                    && *body == json!({"read": {"core:rate:max_per_minute": 100}})
            })
            .return_once(|_, _| Ok(json!({"ok": true})));

        let result = set_constraints(
            &api,
            args(json!({
                "passport_id": "p1",
                "constraints": {"read": {"core:rate:max_per_minute": 100}}
            })),
        )
        .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn list_constraint_types_omits_absent_category() {
        let mut api = MockApiClient::new();
        api.expect_get()
            .withf(|path, query| path == "/api/constraints/types" && query.is_empty())
            .return_once(|_, _| Ok(json!([])));

        let result = list_constraint_types(&api, args(json!({}))).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn list_constraint_types_passes_category_filter() {
        let mut api = MockApiClient::new();
        api.expect_get()
            .withf(|path, query| {
                path == "/api/constraints/types"
                    && query == [("category".to_string(), "rate".to_string())]
            })
            .return_once(|_, _| Ok(json!([])));

        let result = list_constraint_types(&api, args(json!({"category": "rate"}))).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn list_constraint_templates_targets_template_catalog() {
        let mut api = MockApiClient::new();
        api.expect_get()
            .withf(|path, query| path == "/api/constraint-templates" && query.is_empty())
            .return_once(|_, _| Ok(json!([])));

        let result = list_constraint_templates(&api, args(json!({}))).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn apply_constraint_template_posts_slug_body() {
        let mut api = MockApiClient::new();
        api.expect_post()
            .withf(|path, body| {
                path == "/api/passports/p1/constraints"
                    && *body == json!({"template_slug": "conservative-agent"})
            })
            .return_once(|_, _| Ok(json!({"applied": true})));

        let result = apply_constraint_template(
            &api,
            args(json!({"passport_id": "p1", "template_slug": "conservative-agent"})),
        )
        .await;

        assert_eq!(result.unwrap(), json!({"applied": true}));
    }

    #[tokio::test]
    async fn create_constraint_template_forwards_arguments_verbatim() {
        let template = json!({
            "slug": "frugal",
            "name": "Frugal",
            "category": "cost",
            "constraints": {"cost": {"core:cost:max_daily": 5}}
        });

        let mut api = MockApiClient::new();
        let expected = template.clone();
        api.expect_post()
            .withf(move |path, body| path == "/api/constraint-templates" && *body == expected)
            .return_once(|_, _| Ok(json!({"created": true})));

        let result = create_constraint_template(&api, args(template)).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn missing_passport_id_surfaces_as_invalid_input() {
        // No API expectation: the call must never reach the client
        let api = MockApiClient::new();

        let result = get_constraints(&api, args(json!({}))).await;

        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[tokio::test]
    async fn api_failures_are_forwarded_unchanged() {
        let mut api = MockApiClient::new();
        api.expect_get().return_once(|_, _| {
            Err(Error::Api {
                status: 404,
                message: "passport not found".to_string(),
            })
        });

        let result = get_constraints(&api, args(json!({"passport_id": "missing"}))).await;

        assert!(matches!(result, Err(Error::Api { status: 404, .. })));
    }
}
