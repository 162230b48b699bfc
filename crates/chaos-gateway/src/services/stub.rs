//! Catch-all chaos handler.
//!
//! Every request sleeps for a sampled latency, then rolls against the
//! configured failure rate. Failures answer 500 and emit an `http-errors`
//! metric; successes answer 200 and emit nothing.

use axum::{
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde_json::{json, Value};

use chaos_core::Outcome;

use crate::app_state::AppState;
use crate::config::ServiceConfig;

/// Optional correlation id forwarded into metric contexts.
pub const REQUEST_ID_HEADER: &str = "x-ld-request-id";

pub async fn handle(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let latency = state.faults().sample_latency();
    tokio::time::sleep(latency).await;

    tracing::debug!(
        %method,
        path = %uri.path(),
        request_id = request_id.as_deref().unwrap_or("-"),
        body_bytes = body.len(),
        latency_ms = latency.as_millis() as u64,
        "stub request"
    );

    let outcome = state.faults().roll();
    state.reporter().report(outcome, request_id.as_deref());

    let cfg = state.cfg();
    match outcome {
        Outcome::Failure => {
            tracing::info!(%method, path = %uri.path(), "synthetic failure");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(failure_body(cfg))).into_response()
        }
        Outcome::Success => (StatusCode::OK, Json(success_body(cfg))).into_response(),
    }
}

fn success_body(cfg: &ServiceConfig) -> Value {
    json!({
        "service": cfg.name,
        "version": cfg.version,
        "http_status": Outcome::Success.http_status(),
        "message": "Success!",
    })
}

fn failure_body(cfg: &ServiceConfig) -> Value {
    json!({
        "service": cfg.name,
        "version": cfg.version,
        "http_status": Outcome::Failure.http_status(),
        "error": "Error!",
    })
}
