//! Summary handler.

use axum::{extract::State, Json};
use serde_json::Value;

use labscribe::{Explanation, NormalizedTest, Outcome};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// POST /api/generate-summary - Summarize normalized tests.
pub async fn generate_summary(
    State(state): State<AppState>,
    Json(mut body): Json<Value>,
) -> Result<Json<Outcome<Explanation>>, ApiError> {
    let tests = match body.get_mut("tests").map(Value::take) {
        Some(tests @ Value::Array(_)) => tests,
        _ => return Err(ApiError::BadRequest("tests array is required".to_string())),
    };

    let tests: Vec<NormalizedTest> = serde_json::from_value(tests)
        .map_err(|e| ApiError::BadRequest(format!("Invalid tests: {}", e)))?;

    Ok(Json(state.pipeline.summarize(&tests)))
}
