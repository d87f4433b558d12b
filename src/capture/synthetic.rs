use std::f32::consts::PI;
use tracing::info;

use super::backend::{CaptureError, CaptureProvider, CaptureStream, MediaConstraints};
use super::stream::PacedStream;

const TONE_HZ: f32 = 440.0;
const TONE_AMPLITUDE: f32 = 0.2;

/// Microphone stand-in that captures a continuous sine tone.
///
/// Without a camera, video constraints are refused the way a browser
/// refuses them on a machine without one.
pub struct SyntheticCaptureProvider {
    sample_rate: u32,
    frame_ms: u64,
    camera: bool,
    max_duration_ms: Option<u64>,
}

impl SyntheticCaptureProvider {
    pub fn new(sample_rate: u32, frame_ms: u64) -> Self {
        Self {
            sample_rate,
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
impl CaptureProvider for SyntheticCaptureProvider {
    async fn request_access(
        &self,
        constraints: MediaConstraints,
    ) -> Result<Box<dyn CaptureStream>, CaptureError> {
        if constraints.video && !self.camera {
            return Err(CaptureError::AccessDenied(
                "No camera is available to the synthetic capture device".to_string(),
            ));
        }

        info!(
            "Synthetic capture access granted ({})",
            constraints.kind().mime_type()
        );

        let samples_per_frame = (self.sample_rate as u64 * self.frame_ms / 1000) as usize;
        let step = 2.0 * PI * TONE_HZ / self.sample_rate.max(1) as f32;
        let mut phase = 0.0f32;

        let source = Box::new(move || {
            let samples: Vec<i16> = (0..samples_per_frame)
                .map(|_| {
                    let sample = (phase.sin() * TONE_AMPLITUDE * i16::MAX as f32) as i16;
                    phase = (phase + step) % (2.0 * PI);
                    sample
                })
                .collect();
            Some(samples)
        });

        let mut stream = PacedStream::new(self.sample_rate, 1, self.frame_ms, source)
            .with_kind(constraints.kind());
        if let Some(max) = self.max_duration_ms {
            stream = stream.with_max_duration_ms(max);
        }
        Ok(Box::new(stream))
    }

    fn name(&self) -> &str {
        "synthetic"
    }
}
