//! HTTP adapter: maps routed requests onto the synthesis engine and engine
//! errors onto status codes. The engine itself never sees axum types.

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::GenerateError;
use crate::engine::context::{CallContext, RequestParams};
use crate::engine::Engine;

#[derive(Clone)]
pub struct ApiState {
    pub engine: Arc<Engine>,
}

/// `GET {base}/:endpoint` — collection (or a single record when the
/// endpoint name is singular).
pub async fn collection(
    State(state): State<ApiState>,
    Path(endpoint): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    respond(&state, &endpoint, None, &query, &headers)
}

/// `GET {base}/:endpoint/:key` — single record addressed by its
/// identifiable field.
pub async fn single(
    State(state): State<ApiState>,
    Path((endpoint, key)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    respond(&state, &endpoint, Some(&key), &query, &headers)
}

fn respond(
    state: &ApiState,
    endpoint: &str,
    key: Option<&str>,
    query: &HashMap<String, String>,
    headers: &HeaderMap,
) -> (StatusCode, Json<Value>) {
    let request = RequestParams::from_query(query);
    let ctx = CallContext {
        request: &request,
        // Presence-only check: any Authorization header authenticates.
        authorized: headers.contains_key(header::AUTHORIZATION),
    };

    match state.engine.generate(endpoint, key, ctx) {
        Ok(payload) => (StatusCode::OK, Json(payload)),
        Err(GenerateError::UnknownEndpoint(name)) => {
            tracing::debug!("Request for unknown endpoint '{}'", name);
            (
                StatusCode::NOT_FOUND,
                Json(json!({"message": "Not found."})),
            )
        }
        Err(GenerateError::Unauthorized) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Unauthorized."})),
        ),
        Err(err @ GenerateError::RelationshipCycle(_)) => {
            tracing::error!("Generation failed for '{}': {}", endpoint, err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"message": err.to_string()})),
            )
        }
    }
}
