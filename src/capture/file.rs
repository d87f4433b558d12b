use std::path::PathBuf;
use tracing::info;

use super::backend::{CaptureError, CaptureProvider, CaptureStream, MediaConstraints};
use super::stream::PacedStream;
use super::wav::AudioFile;

/// Replays a WAV file as if it were the microphone.
///
/// The file is read on every access request, so a missing or corrupt file
/// surfaces as a device error at record time rather than at startup.
pub struct FileCaptureProvider {
    path: PathBuf,
    frame_ms: u64,
    camera: bool,
    max_duration_ms: Option<u64>,
}

impl FileCaptureProvider {
    pub fn new(path: PathBuf, frame_ms: u64) -> Self {
        Self {
            path,
            frame_ms,
            camera: false,
            max_duration_ms: None,
        }
    }

    /// Offer a blank camera so audio+video requests are granted
    pub fn with_camera(mut self, camera: bool) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_max_duration_ms(mut self, max_duration_ms: u64) -> Self {
        self.max_duration_ms = Some(max_duration_ms);
        self
    }
}

#[async_trait::async_trait]
impl CaptureProvider for FileCaptureProvider {
    async fn request_access(
        &self,
        constraints: MediaConstraints,
    ) -> Result<Box<dyn CaptureStream>, CaptureError> {
        if constraints.video && !self.camera {
            return Err(CaptureError::AccessDenied(
                "No camera is available when replaying an audio file".to_string(),
            ));
        }

        let audio = AudioFile::open(&self.path)?;
        info!("File microphone access granted: {}", audio.path);

        let channels = audio.channels.max(1);
        let samples_per_frame =
            (audio.sample_rate as u64 * self.frame_ms / 1000) as usize * channels as usize;
        let samples = audio.samples;
        let mut offset = 0;

        let source = Box::new(move || {
            if offset >= samples.len() || samples_per_frame == 0 {
                return None;
            }
            let end = (offset + samples_per_frame).min(samples.len());
            let frame = samples[offset..end].to_vec();
            offset = end;
            Some(frame)
        });

        let mut stream = PacedStream::new(audio.sample_rate, channels, self.frame_ms, source)
            .with_kind(constraints.kind());
        if let Some(max) = self.max_duration_ms {
            stream = stream.with_max_duration_ms(max);
        }
        Ok(Box::new(stream))
    }

    fn name(&self) -> &str {
        "file"
    }
}
