// Test doubles shared by the integration tests
#![allow(dead_code)]

use bytes::Bytes;
use interview_coach::capture::{
    CaptureError, CaptureProvider, CaptureStream, MediaConstraints, MediaKind, Recording,
};
use interview_coach::interview::{ScoreRecord, ScoringProvider, SubScores};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Capture provider that hands out instant in-memory streams.
/// Supports video, and can be told to refuse access.
pub struct StubCaptureProvider {
    deny: bool,
    requests: AtomicUsize,
}

impl StubCaptureProvider {
    pub fn granting() -> Arc<Self> {
        Arc::new(Self {
            deny: false,
            requests: AtomicUsize::new(0),
        })
    }

    pub fn denying() -> Arc<Self> {
        Arc::new(Self {
            deny: true,
            requests: AtomicUsize::new(0),
        })
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl CaptureProvider for StubCaptureProvider {
    async fn request_access(
        &self,
        constraints: MediaConstraints,
    ) -> Result<Box<dyn CaptureStream>, CaptureError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.deny {
            return Err(CaptureError::AccessDenied("blocked by test".to_string()));
        }
        Ok(Box::new(StubStream {
            kind: constraints.kind(),
            capturing: false,
        }))
    }

    fn name(&self) -> &str {
        "stub"
    }
}

pub struct StubStream {
    kind: MediaKind,
    capturing: bool,
}

#[async_trait::async_trait]
impl CaptureStream for StubStream {
    async fn start(&mut self) -> Result<(), CaptureError> {
        if self.capturing {
            return Err(CaptureError::AlreadyCapturing);
        }
        self.capturing = true;
        Ok(())
    }

    async fn stop(&mut self) -> Result<Recording, CaptureError> {
        if !self.capturing {
            return Err(CaptureError::NotCapturing);
        }
        self.capturing = false;
        Ok(Recording::new(self.kind, Bytes::from_static(b"stub-media"), 1200))
    }

    fn is_capturing(&self) -> bool {
        self.capturing
    }
}

/// Scorer that always returns the same sub-scores
pub struct FixedScorer(pub SubScores);

impl FixedScorer {
    pub fn uniform(score: u8) -> Arc<Self> {
        Arc::new(Self(SubScores {
            confidence: score,
            clarity: score,
            relevance: score,
            structure: score,
        }))
    }
}

#[async_trait::async_trait]
impl ScoringProvider for FixedScorer {
    async fn score(&self, question: &str, _recording: &Recording) -> ScoreRecord {
        ScoreRecord::new(question, "Recorded answer".to_string(), self.0)
    }

    fn name(&self) -> &str {
        "fixed"
    }
}
