use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::backend::{AudioFrame, CaptureError, CaptureStream, MediaKind, Recording};
use super::wav;

/// Produces the samples for the next frame, or `None` once the source is exhausted
pub type FrameSource = Box<dyn FnMut() -> Option<Vec<i16>> + Send>;

/// Capture stream that pulls audio frames from a source at a fixed pace.
///
/// A capture task delivers frames over an mpsc channel to a collector task;
/// `stop()` signals the capture task, waits for both and encodes the result.
/// A blank camera adds no picture data, so audio+video recordings carry the
/// soundtrack only.
pub struct PacedStream {
    sample_rate: u32,
    channels: u16,
    frame_ms: u64,
    kind: MediaKind,
    max_frames: Option<usize>,
    source: Option<FrameSource>,
    capturing: Arc<AtomicBool>,
    capture_task: Option<JoinHandle<()>>,
    collector_task: Option<JoinHandle<Vec<AudioFrame>>>,
}

impl PacedStream {
    pub fn new(sample_rate: u32, channels: u16, frame_ms: u64, source: FrameSource) -> Self {
        Self {
            sample_rate,
            channels,
            frame_ms: frame_ms.max(1),
            kind: MediaKind::AudioOnly,
            max_frames: None,
            source: Some(source),
            capturing: Arc::new(AtomicBool::new(false)),
            capture_task: None,
            collector_task: None,
        }
    }

    /// Label the finished recording as `kind`
    pub fn with_kind(mut self, kind: MediaKind) -> Self {
        self.kind = kind;
        self
    }

    /// Keep at most `max_duration_ms` of audio; capture continues until
    /// stopped but later frames are discarded.
    pub fn with_max_duration_ms(mut self, max_duration_ms: u64) -> Self {
        self.max_frames = Some(((max_duration_ms / self.frame_ms) as usize).max(1));
        self
    }
}

#[async_trait::async_trait]
impl CaptureStream for PacedStream {
    async fn start(&mut self) -> Result<(), CaptureError> {
        if self.capturing.load(Ordering::SeqCst) {
            return Err(CaptureError::AlreadyCapturing);
        }
        // A stream records exactly once
        let mut source = self.source.take().ok_or(CaptureError::AlreadyCapturing)?;

        self.capturing.store(true, Ordering::SeqCst);

        let (frame_tx, mut frame_rx) = mpsc::channel::<AudioFrame>(64);

        let capturing = Arc::clone(&self.capturing);
        let sample_rate = self.sample_rate;
        let channels = self.channels;
        let frame_ms = self.frame_ms;
        let max_frames = self.max_frames;

        let capture_task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_millis(frame_ms));
            let mut timestamp_ms = 0;
            let mut frames_sent = 0usize;
            let mut limit_reached = false;

            loop {
                ticker.tick().await;
                if !capturing.load(Ordering::SeqCst) {
                    break;
                }

                if max_frames.is_some_and(|max| frames_sent >= max) {
                    if !limit_reached {
                        warn!(
                            "Capture reached its {}ms limit, dropping further frames",
                            timestamp_ms
                        );
                        limit_reached = true;
                    }
                    continue;
                }

                let Some(samples) = source() else {
                    // Source exhausted; idle until stopped
                    continue;
                };

                let frame = AudioFrame {
                    samples,
                    sample_rate,
                    channels,
                    timestamp_ms,
                };
                timestamp_ms += frame_ms;
                frames_sent += 1;

                if frame_tx.send(frame).await.is_err() {
                    error!("Frame collector went away, ending capture");
                    break;
                }
            }
        });

        let collector_task = tokio::spawn(async move {
            let mut frames = Vec::new();
            while let Some(frame) = frame_rx.recv().await {
                frames.push(frame);
            }
            frames
        });

        self.capture_task = Some(capture_task);
        self.collector_task = Some(collector_task);

        info!(
            "Capture started ({}Hz, {}ms frames, {})",
            self.sample_rate,
            self.frame_ms,
            self.kind.mime_type()
        );
        Ok(())
    }

    async fn stop(&mut self) -> Result<Recording, CaptureError> {
        if !self.capturing.swap(false, Ordering::SeqCst) {
            return Err(CaptureError::NotCapturing);
        }

        // Capture task owns the sender; joining it closes the channel
        if let Some(task) = self.capture_task.take() {
            if let Err(e) = task.await {
                error!("Capture task panicked: {}", e);
            }
        }

        let frames = match self.collector_task.take() {
            Some(task) => task
                .await
                .map_err(|e| CaptureError::Device(anyhow::anyhow!("Collector task failed: {e}")))?,
            None => Vec::new(),
        };

        let encoded = wav::encode_frames(&frames, self.sample_rate, self.channels)?;
        info!(
            "Capture stopped: {} frames, {}ms, {} bytes",
            frames.len(),
            encoded.duration_ms,
            encoded.data.len()
        );

        Ok(Recording::new(self.kind, encoded.data, encoded.duration_ms))
    }

    fn is_capturing(&self) -> bool {
        self.capturing.load(Ordering::SeqCst)
    }
}

impl Drop for PacedStream {
    fn drop(&mut self) {
        // Release the device if the stream is dropped mid-capture
        self.capturing.store(false, Ordering::SeqCst);
        if let Some(task) = self.capture_task.take() {
            task.abort();
        }
    }
}
