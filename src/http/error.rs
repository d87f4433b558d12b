use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::interview::{Notice, SessionError};

/// API-level error type.
/// Implements `IntoResponse` so handlers can return `Result<T, ApiError>`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Interview {0} not found")]
    NotFound(String),

    #[error("No recording available for interview {0}")]
    NoRecording(String),

    #[error("Interview {0} already exists")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) | ApiError::NoRecording(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::Session(err) => match err {
                SessionError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                SessionError::CaptureAccessDenied(_) => {
                    (StatusCode::FORBIDDEN, "CAPTURE_ACCESS_DENIED")
                }
                SessionError::InvalidUpload(_) => {
                    (StatusCode::UNSUPPORTED_MEDIA_TYPE, "INVALID_UPLOAD")
                }
                SessionError::InvalidTransition(_) => (StatusCode::CONFLICT, "INVALID_TRANSITION"),
                SessionError::Capture(e) => {
                    tracing::error!("Capture error: {e}");
                    (StatusCode::INTERNAL_SERVER_ERROR, "CAPTURE_ERROR")
                }
            },
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let notice = match &self {
            ApiError::Session(err) => Notice::from(err),
            other => Notice::destructive("Error", other.to_string()),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string(),
                "notice": notice,
            }
        }));

        (status, body).into_response()
    }
}
