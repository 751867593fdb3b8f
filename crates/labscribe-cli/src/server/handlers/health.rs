//! Liveness handler.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::server::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub extractor: String,
}

/// GET /api/health - Report liveness and the configured extractor.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        extractor: state.extractor_name().to_string(),
    })
}
