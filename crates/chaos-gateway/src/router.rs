//! Axum router wiring.
//!
//! `GET /health` is the only real route. Every other method/path pair,
//! including `HEAD` and other non-GET requests to `/health`, lands on the
//! stub handler.

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops, services};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/health",
            // axum answers HEAD from the GET handler unless HEAD is routed explicitly
            get(ops::health)
                .head(services::stub::handle)
                .fallback(services::stub::handle),
        )
        .fallback(services::stub::handle)
        .with_state(state)
}
