//! API error types and handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use labscribe::LabscribeError;
use serde::Serialize;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from client.
    BadRequest(String),
    /// Internal server error.
    Internal(String),
    /// Error from the labscribe library.
    Labscribe(LabscribeError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg),
            ApiError::Labscribe(e) => match e {
                LabscribeError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
                LabscribeError::Extraction(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "extraction_failed", e.to_string())
                }
                other => (StatusCode::INTERNAL_SERVER_ERROR, "internal", other.to_string()),
            },
        };

        if status.is_server_error() {
            tracing::error!(%status, %message, "Request failed");
        }

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<LabscribeError> for ApiError {
    fn from(err: LabscribeError) -> Self {
        ApiError::Labscribe(err)
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("Pipeline task failed: {}", err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Labscribe(e) => write!(f, "Labscribe error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}
