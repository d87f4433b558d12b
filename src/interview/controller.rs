use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::error::SessionError;
use super::report::SessionReport;
use super::scoring::ScoringProvider;
use super::state::{CompletionPolicy, SessionEvent, SessionSnapshot, SessionState};
use crate::capture::{CaptureProvider, CaptureStream, Recording};
use crate::resume::validate_resume;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeVariant {
    Default,
    Destructive,
}

/// User-facing notification produced by an intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    pub fn info(title: &str, description: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            description: description.into(),
            variant: NoticeVariant::Default,
        }
    }

    pub fn destructive(title: &str, description: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            description: description.into(),
            variant: NoticeVariant::Destructive,
        }
    }
}

impl From<&SessionError> for Notice {
    fn from(err: &SessionError) -> Self {
        match err {
            SessionError::CaptureAccessDenied(_) => Notice::destructive(
                "Error",
                "Could not access microphone/camera. Please check permissions.",
            ),
            SessionError::InvalidUpload(e) => Notice::destructive("Invalid file", e.to_string()),
            other => Notice::destructive("Error", other.to_string()),
        }
    }
}

/// Owns one interview session and the capture stream recording into it.
///
/// Intents run one at a time; capture and scoring side effects happen
/// first and their outcome is folded into the state as an event.
pub struct SessionController {
    id: String,
    state: SessionState,
    capture: Arc<dyn CaptureProvider>,
    scorer: Arc<dyn ScoringProvider>,
    stream: Option<Box<dyn CaptureStream>>,
    created_at: DateTime<Utc>,
}

impl SessionController {
    pub fn new(
        id: String,
        capture: Arc<dyn CaptureProvider>,
        scorer: Arc<dyn ScoringProvider>,
        completion: CompletionPolicy,
    ) -> Self {
        info!(
            "Creating interview session {} (capture: {}, scoring: {})",
            id,
            capture.name(),
            scorer.name()
        );

        Self {
            id,
            state: SessionState::new(completion),
            capture,
            scorer,
            stream: None,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::new(&self.id, &self.state)
    }

    pub fn report(&self) -> SessionReport {
        SessionReport::new(&self.id, &self.state)
    }

    /// Recording for the current question, for playback
    pub fn current_recording(&self) -> Option<&Recording> {
        self.state.current_recording.as_ref()
    }

    fn apply(&mut self, event: SessionEvent) -> Result<(), SessionError> {
        match self.state.apply(event) {
            Ok(next) => {
                self.state = next;
                Ok(())
            }
            Err(e) => {
                warn!("Session {}: rejected intent: {}", self.id, e);
                Err(e)
            }
        }
    }

    pub fn select_role(&mut self, role: &str) -> Result<Option<Notice>, SessionError> {
        self.apply(SessionEvent::RoleSelected(role.to_string()))?;
        info!("Session {}: role = {:?}", self.id, self.state.role);
        Ok(self.questions_notice())
    }

    pub fn select_company(&mut self, company: &str) -> Result<Option<Notice>, SessionError> {
        self.apply(SessionEvent::CompanySelected(company.to_string()))?;
        info!("Session {}: company = {:?}", self.id, self.state.company);
        Ok(self.questions_notice())
    }

    fn questions_notice(&self) -> Option<Notice> {
        if self.state.questions.is_empty() {
            return None;
        }
        Some(Notice::info(
            "Questions ready",
            format!("{} questions prepared", self.state.questions.len()),
        ))
    }

    pub fn toggle_video_mode(&mut self) -> Result<Option<Notice>, SessionError> {
        self.apply(SessionEvent::VideoModeToggled)?;
        info!("Session {}: video mode = {}", self.id, self.state.is_video_mode);
        Ok(None)
    }

    pub fn upload_resume(
        &mut self,
        file_name: &str,
        mime_type: Option<&str>,
        data: &[u8],
    ) -> Result<Option<Notice>, SessionError> {
        let resume = validate_resume(file_name, mime_type, data)?;
        let description = format!("{} uploaded successfully", resume.file_name);
        self.apply(SessionEvent::ResumeAttached(resume))?;
        Ok(Some(Notice::info("Resume uploaded", description)))
    }

    /// Acquire capture devices and begin recording the current question.
    ///
    /// A single access attempt is made; on refusal the state is unchanged.
    pub async fn start_recording(&mut self) -> Result<Option<Notice>, SessionError> {
        if let Err(e) = self.state.check_can_record() {
            warn!("Session {}: rejected intent: {}", self.id, e);
            return Err(e);
        }

        let constraints = self.state.media_constraints();
        info!(
            "Session {}: requesting capture access (video: {})",
            self.id, constraints.video
        );

        let mut stream = match self.capture.request_access(constraints).await {
            Ok(stream) => stream,
            Err(e) => {
                error!("Session {}: capture access failed: {}", self.id, e);
                return Err(e.into());
            }
        };

        if let Err(e) = stream.start().await {
            error!("Session {}: failed to start capture: {}", self.id, e);
            return Err(e.into());
        }

        self.apply(SessionEvent::RecordingStarted)?;
        self.stream = Some(stream);

        let description = if constraints.video {
            "Look at the camera and speak clearly"
        } else {
            "Speak clearly into your microphone"
        };
        Ok(Some(Notice::info("Recording started", description)))
    }

    /// Finalize the recording, release the devices and score the answer
    pub async fn stop_recording(&mut self) -> Result<Option<Notice>, SessionError> {
        let Some(mut stream) = self.stream.take().filter(|_| self.state.is_recording) else {
            let err = SessionError::InvalidTransition("No recording in progress");
            warn!("Session {}: rejected intent: {}", self.id, err);
            return Err(err);
        };

        let recording = match stream.stop().await {
            Ok(recording) => recording,
            Err(e) => {
                error!("Session {}: failed to finalize recording: {}", self.id, e);
                self.apply(SessionEvent::RecordingFailed)?;
                return Err(e.into());
            }
        };

        let question = self.state.current_question().unwrap_or_default().to_string();
        let score = self.scorer.score(&question, &recording).await;

        info!(
            "Session {}: answer {} scored {}/10 ({} bytes of {})",
            self.id,
            self.state.score_records.len() + 1,
            score.rating,
            recording.data.len(),
            recording.mime_type
        );

        self.apply(SessionEvent::RecordingStopped { recording, score })?;

        if self.state.is_complete {
            info!(
                "Session {}: interview complete, overall rating {:.1}",
                self.id,
                self.state.overall_rating().unwrap_or_default()
            );
            return Ok(Some(Notice::info(
                "Interview complete",
                "Your feedback report is ready",
            )));
        }

        Ok(Some(Notice::info(
            "Recording completed",
            "Analyzing your answer...",
        )))
    }

    pub fn toggle_playback(&mut self) -> Result<Option<Notice>, SessionError> {
        self.apply(SessionEvent::PlaybackToggled)?;
        Ok(None)
    }

    pub fn next_question(&mut self) -> Result<Option<Notice>, SessionError> {
        self.apply(SessionEvent::QuestionAdvanced)?;
        info!(
            "Session {}: advanced to question {}",
            self.id,
            self.state.current_index.map(|i| i + 1).unwrap_or_default()
        );
        Ok(None)
    }

    /// Discard everything and return to the idle state, releasing any open capture
    pub async fn reset(&mut self) -> Result<Option<Notice>, SessionError> {
        if let Some(mut stream) = self.stream.take() {
            if stream.is_capturing() {
                if let Err(e) = stream.stop().await {
                    warn!("Session {}: error releasing capture on reset: {}", self.id, e);
                }
            }
        }

        self.apply(SessionEvent::Reset)?;
        info!("Session {}: reset", self.id);
        Ok(None)
    }

    /// Release capture devices when the session is being discarded
    pub async fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            if stream.is_capturing() {
                if let Err(e) = stream.stop().await {
                    warn!("Session {}: error releasing capture on close: {}", self.id, e);
                }
            }
        }
        info!("Session {}: closed", self.id);
    }
}
