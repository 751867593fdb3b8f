//! Normalization handler.

use axum::{extract::State, Json};
use serde_json::Value;

use labscribe::{NormalizationResult, Outcome, RawTestInput};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// POST /api/normalize-tests - Normalize raw strings and loose records.
///
/// Array elements that are neither strings nor usable records are skipped.
pub async fn normalize_tests(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Outcome<NormalizationResult>>, ApiError> {
    let raw = body
        .get("tests_raw")
        .and_then(Value::as_array)
        .ok_or_else(|| ApiError::BadRequest("tests_raw array is required".to_string()))?;

    let inputs = RawTestInput::from_json_array(raw);
    Ok(Json(state.pipeline.normalize(&inputs)))
}
