//! Resume upload validation. Only PDF files are accepted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

pub const PDF_MIME: &str = "application/pdf";

/// An accepted resume upload. Only metadata is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: usize,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("Please upload a PDF file (received {0})")]
    NotPdf(String),

    #[error("No resume file was provided")]
    MissingFile,
}

/// True for `application/pdf`, ignoring case and any parameters
pub fn is_pdf_mime(mime_type: &str) -> bool {
    mime_type
        .split(';')
        .next()
        .map(|essence| essence.trim().eq_ignore_ascii_case(PDF_MIME))
        .unwrap_or(false)
}

/// Accept an uploaded file as the resume if its declared MIME type is PDF
pub fn validate_resume(
    file_name: &str,
    mime_type: Option<&str>,
    data: &[u8],
) -> Result<Resume, UploadError> {
    let mime_type = mime_type.unwrap_or("unknown type");

    if !is_pdf_mime(mime_type) {
        warn!("Rejected resume upload {} ({})", file_name, mime_type);
        return Err(UploadError::NotPdf(mime_type.to_string()));
    }

    info!("Accepted resume upload {} ({} bytes)", file_name, data.len());

    Ok(Resume {
        file_name: file_name.to_string(),
        mime_type: PDF_MIME.to_string(),
        size_bytes: data.len(),
        uploaded_at: Utc::now(),
    })
}
