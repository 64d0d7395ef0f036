//! Cumulative state tools

use super::types::{GetCumulativeStateRequest, ResetCumulativeStateRequest};
use super::{HandlerFn, parse_args, tool};
use crate::api::ApiClient;
use crate::error::Error;
use futures::future::BoxFuture;
use rmcp::model::{JsonObject, Tool, ToolAnnotations};
use serde_json::{Map, Value};

pub(super) fn tools() -> Vec<Tool> {
    vec![
        tool::<GetCumulativeStateRequest>(
            "get_cumulative_state",
            "Get spending and rate limit state for a passport.",
            ToolAnnotations {
                title: Some("Get Cumulative State".to_string()),
                read_only_hint: Some(true),
                destructive_hint: Some(false),
                idempotent_hint: None,
                open_world_hint: Some(true),
            },
        ),
        tool::<ResetCumulativeStateRequest>(
            "reset_cumulative_state",
            "Reset cumulative spending and rate counters for a passport.",
            ToolAnnotations {
                title: Some("Reset Cumulative State".to_string()),
                read_only_hint: Some(false),
                destructive_hint: Some(true),
                idempotent_hint: Some(false),
                open_world_hint: Some(true),
            },
        ),
    ]
}

pub(super) fn handlers() -> Vec<(&'static str, HandlerFn)> {
    vec![
        ("get_cumulative_state", get_cumulative_state),
        ("reset_cumulative_state", reset_cumulative_state),
    ]
}

fn get_cumulative_state<'a>(
    api: &'a dyn ApiClient,
    args: JsonObject,
) -> BoxFuture<'a, Result<Value, Error>> {
    Box::pin(async move {
        let request: GetCumulativeStateRequest = parse_args(args)?;
        tracing::debug!(passport_id = %request.passport_id, "get_cumulative_state");
        api.get(&format!("/api/passports/{}/state", request.passport_id), &[])
            .await
    })
}

fn reset_cumulative_state<'a>(
    api: &'a dyn ApiClient,
    args: JsonObject,
) -> BoxFuture<'a, Result<Value, Error>> {
    Box::pin(async move {
        let request: ResetCumulativeStateRequest = parse_args(args)?;
        tracing::debug!(
            passport_id = %request.passport_id,
            window_type = ?request.window_type,
            "reset_cumulative_state"
        );

        // An omitted window_type means "reset all windows" on the server
        // side, so the key must stay out of the body entirely.
        let mut body = Map::new();
        if let Some(window_type) = request.window_type {
            body.insert("window_type".to_string(), Value::String(window_type));
        }

        api.post(
            &format!("/api/passports/{}/state/reset", request.passport_id),
            Value::Object(body),
        )
        .await
    })
}
