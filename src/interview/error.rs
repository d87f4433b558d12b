use thiserror::Error;

use crate::capture::CaptureError;
use crate::resume::UploadError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// The capture provider refused audio/video access
    #[error("Could not access your microphone or camera: {0}")]
    CaptureAccessDenied(String),

    #[error(transparent)]
    InvalidUpload(#[from] UploadError),

    #[error("{0}")]
    InvalidTransition(&'static str),

    #[error("Capture failed: {0}")]
    Capture(CaptureError),
}

impl From<CaptureError> for SessionError {
    fn from(err: CaptureError) -> Self {
        match err {
            CaptureError::AccessDenied(reason) => SessionError::CaptureAccessDenied(reason),
            other => SessionError::Capture(other),
        }
    }
}
