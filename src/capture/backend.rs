use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// Audio sample data (16-bit PCM, interleaved)
#[derive(Debug, Clone)]
pub struct AudioFrame {
    /// Raw audio samples (i16 PCM, interleaved)
    pub samples: Vec<i16>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: u16,
    /// Timestamp in milliseconds since capture started
    pub timestamp_ms: u64,
}

/// What a capture session records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    AudioOnly,
    AudioVideo,
}

impl MediaKind {
    pub fn mime_type(&self) -> &'static str {
        match self {
            MediaKind::AudioOnly => "audio/wav",
            MediaKind::AudioVideo => "video/x-raw",
        }
    }
}

/// Device constraints passed when requesting capture access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaConstraints {
    pub audio: bool,
    pub video: bool,
}

impl MediaConstraints {
    pub fn new(video: bool) -> Self {
        Self { audio: true, video }
    }

    pub fn kind(&self) -> MediaKind {
        if self.video {
            MediaKind::AudioVideo
        } else {
            MediaKind::AudioOnly
        }
    }
}

/// A finished capture. The payload is opaque to the session.
#[derive(Debug, Clone, PartialEq)]
pub struct Recording {
    pub id: Uuid,
    pub kind: MediaKind,
    pub mime_type: String,
    pub data: Bytes,
    pub duration_ms: u64,
    pub created_at: DateTime<Utc>,
}

impl Recording {
    pub fn new(kind: MediaKind, data: Bytes, duration_ms: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            mime_type: kind.mime_type().to_string(),
            data,
            duration_ms,
            created_at: Utc::now(),
        }
    }

    pub fn info(&self) -> RecordingInfo {
        RecordingInfo {
            id: self.id,
            kind: self.kind,
            mime_type: self.mime_type.clone(),
            size_bytes: self.data.len(),
            duration_ms: self.duration_ms,
            created_at: self.created_at,
        }
    }
}

/// Serializable description of a recording, without the payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingInfo {
    pub id: Uuid,
    pub kind: MediaKind,
    pub mime_type: String,
    pub size_bytes: usize,
    pub duration_ms: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Capture access denied: {0}")]
    AccessDenied(String),

    #[error("Capture already in progress")]
    AlreadyCapturing,

    #[error("No capture in progress")]
    NotCapturing,

    #[error("Capture device error: {0}")]
    Device(#[from] anyhow::Error),
}

/// Host audio/video recording facility
///
/// Implementations:
/// - Synthetic: sine tone microphone, optionally with a blank camera
/// - File: replays a WAV file as the microphone, optionally with a blank camera
/// - Denied: refuses every request (simulates a blocked permission prompt)
#[async_trait::async_trait]
pub trait CaptureProvider: Send + Sync {
    /// Ask for device access. Suspends until access is granted or refused.
    async fn request_access(
        &self,
        constraints: MediaConstraints,
    ) -> Result<Box<dyn CaptureStream>, CaptureError>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}

/// An open capture session on granted devices
#[async_trait::async_trait]
pub trait CaptureStream: Send {
    /// Begin delivering media
    async fn start(&mut self) -> Result<(), CaptureError>;

    /// Finalize the captured media and release all device tracks
    async fn stop(&mut self) -> Result<Recording, CaptureError>;

    /// Check if the stream is currently capturing
    fn is_capturing(&self) -> bool;
}

/// Which backend serves capture requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureSourceKind {
    Synthetic,
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct CaptureSettings {
    pub source: CaptureSourceKind,
    pub sample_rate: u32,
    pub frame_ms: u64,
    /// Longest capture kept per recording; later frames are dropped
    pub max_duration_ms: u64,
    /// Whether a (blank) camera is offered alongside the microphone
    pub camera: bool,
    pub deny_access: bool,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            source: CaptureSourceKind::Synthetic,
            sample_rate: 16000,
            frame_ms: 100,
            max_duration_ms: 300_000,
            camera: false,
            deny_access: false,
        }
    }
}

/// Capture provider factory
pub struct CaptureProviderFactory;

impl CaptureProviderFactory {
    pub fn create(settings: &CaptureSettings) -> Arc<dyn CaptureProvider> {
        if settings.deny_access {
            info!("Capture provider: access denied for every request");
            return Arc::new(DeniedCaptureProvider);
        }

        match &settings.source {
            CaptureSourceKind::Synthetic => {
                info!(
                    "Capture provider: synthetic tone ({}Hz, {}ms frames, camera: {})",
                    settings.sample_rate, settings.frame_ms, settings.camera
                );
                Arc::new(
                    super::synthetic::SyntheticCaptureProvider::new(
                        settings.sample_rate,
                        settings.frame_ms,
                    )
                    .with_camera(settings.camera)
                    .with_max_duration_ms(settings.max_duration_ms),
                )
            }
            CaptureSourceKind::File(path) => {
                info!(
                    "Capture provider: replaying {} (camera: {})",
                    path.display(),
                    settings.camera
                );
                Arc::new(
                    super::file::FileCaptureProvider::new(path.clone(), settings.frame_ms)
                        .with_camera(settings.camera)
                        .with_max_duration_ms(settings.max_duration_ms),
                )
            }
        }
    }
}

/// Refuses all access requests
pub struct DeniedCaptureProvider;

#[async_trait::async_trait]
impl CaptureProvider for DeniedCaptureProvider {
    async fn request_access(
        &self,
        _constraints: MediaConstraints,
    ) -> Result<Box<dyn CaptureStream>, CaptureError> {
        Err(CaptureError::AccessDenied(
            "Permission to use capture devices was refused".to_string(),
        ))
    }

    fn name(&self) -> &str {
        "denied"
    }
}
