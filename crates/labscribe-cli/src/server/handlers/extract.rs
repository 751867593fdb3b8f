//! Extraction handler and the shared report request body.

use axum::{extract::State, Json};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;

use labscribe::{Extraction, ExtractionInput, LabscribeError};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Report to read: text, or a base64 image (optionally a data URL).
#[derive(Debug, Default, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub text: Option<String>,

    #[serde(default)]
    pub image: Option<String>,
}

impl ReportRequest {
    /// Decode the image and reject bodies without any input.
    pub fn into_input(self) -> Result<ExtractionInput, ApiError> {
        let image = match self.image.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(encoded) => {
                let payload = encoded
                    .split_once(";base64,")
                    .map(|(_, data)| data)
                    .unwrap_or(encoded);
                let bytes = STANDARD
                    .decode(payload)
                    .map_err(|e| ApiError::BadRequest(format!("Invalid base64 image: {}", e)))?;
                Some(bytes)
            }
            None => None,
        };

        let input = ExtractionInput {
            text: self.text,
            image,
        };
        input.validate()?;
        Ok(input)
    }
}

/// POST /api/extract-text - Recognize raw test strings in a report.
pub async fn extract_text(
    State(state): State<AppState>,
    Json(request): Json<ReportRequest>,
) -> Result<Json<Extraction>, ApiError> {
    let input = request.into_input()?;
    let pipeline = state.pipeline.clone();

    let extraction = tokio::task::spawn_blocking(move || -> labscribe::Result<Extraction> {
        let extractor = pipeline
            .extractor()
            .ok_or_else(|| LabscribeError::Config("No extractor configured".to_string()))?;
        extractor.extract(&input)
    })
    .await??;

    Ok(Json(extraction))
}
