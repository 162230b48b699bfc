//! Operational HTTP endpoints.
//!
//! - `/health` : liveness with service identity, never delayed or failed

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::app_state::AppState;

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let cfg = state.cfg();
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0);

    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": cfg.name,
            "version": cfg.version,
            "timestamp": timestamp,
        })),
    )
}
