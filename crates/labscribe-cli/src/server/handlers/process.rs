//! Full pipeline handler.

use axum::{extract::State, Json};

use labscribe::{Outcome, PipelineReport};

use super::extract::ReportRequest;
use crate::server::error::ApiError;
use crate::server::state::AppState;

/// POST /api/process-complete - Extract, normalize, verify and explain.
pub async fn process_complete(
    State(state): State<AppState>,
    Json(request): Json<ReportRequest>,
) -> Result<Json<Outcome<PipelineReport>>, ApiError> {
    let input = request.into_input()?;
    let pipeline = state.pipeline.clone();

    let outcome = tokio::task::spawn_blocking(move || pipeline.run(&input)).await??;

    if let Some(failure) = outcome.failure() {
        tracing::info!(reason = %failure.reason, "Report left unprocessed");
    }
    Ok(Json(outcome))
}
