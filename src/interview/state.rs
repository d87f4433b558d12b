use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::SessionError;
use super::questions::generate_questions;
use super::scoring::ScoreRecord;
use crate::capture::{MediaConstraints, Recording, RecordingInfo};
use crate::resume::Resume;

/// When a session counts as complete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "answers", rename_all = "snake_case")]
pub enum CompletionPolicy {
    /// Complete once as many answers are scored as there are questions
    #[default]
    QuestionCount,
    /// Complete after a fixed number of scored answers
    Fixed(usize),
}

impl CompletionPolicy {
    pub fn threshold(&self, question_count: usize) -> usize {
        match self {
            CompletionPolicy::QuestionCount => question_count,
            CompletionPolicy::Fixed(n) => *n,
        }
    }
}

/// Per-session settings taken from configuration
#[derive(Debug, Clone, Default)]
pub struct SessionSettings {
    pub completion: CompletionPolicy,
    /// Seed for the simulated scorer; entropy when unset
    pub scoring_seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Role and company not both chosen
    Idle,
    /// Fresh question list, nothing answered yet
    QuestionsReady,
    AwaitingRecording,
    Recording,
    /// Current question has a recording and a score
    RecordingReady,
    Complete,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionPhase::Idle => "idle",
            SessionPhase::QuestionsReady => "questions ready",
            SessionPhase::AwaitingRecording => "awaiting recording",
            SessionPhase::Recording => "recording",
            SessionPhase::RecordingReady => "recording ready",
            SessionPhase::Complete => "complete",
        };
        f.write_str(name)
    }
}

/// Inputs to the session reducer
#[derive(Debug, Clone)]
pub enum SessionEvent {
    RoleSelected(String),
    CompanySelected(String),
    VideoModeToggled,
    ResumeAttached(Resume),
    /// Capture devices granted and recording begun
    RecordingStarted,
    RecordingStopped {
        recording: Recording,
        score: ScoreRecord,
    },
    /// Capture ended without producing a recording
    RecordingFailed,
    PlaybackToggled,
    QuestionAdvanced,
    Reset,
}

/// Full interview session state.
///
/// Values are never mutated in place by callers: each event produces the
/// next state through [`SessionState::apply`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub role: Option<String>,
    pub company: Option<String>,
    pub questions: Vec<String>,
    pub current_index: Option<usize>,
    pub is_recording: bool,
    pub is_video_mode: bool,
    pub is_playing: bool,
    pub current_recording: Option<Recording>,
    pub analysis: Option<String>,
    pub score_records: Vec<ScoreRecord>,
    pub is_complete: bool,
    pub resume: Option<Resume>,
    pub completion: CompletionPolicy,
}

impl SessionState {
    pub fn new(completion: CompletionPolicy) -> Self {
        Self {
            completion,
            ..Self::default()
        }
    }

    pub fn current_question(&self) -> Option<&str> {
        self.current_index
            .and_then(|i| self.questions.get(i))
            .map(String::as_str)
    }

    pub fn has_next_question(&self) -> bool {
        matches!(self.current_index, Some(i) if i + 1 < self.questions.len())
    }

    pub fn completion_threshold(&self) -> usize {
        self.completion.threshold(self.questions.len())
    }

    /// Mean of all ratings so far, derived from the score records
    pub fn overall_rating(&self) -> Option<f64> {
        if self.score_records.is_empty() {
            return None;
        }
        let total: u32 = self.score_records.iter().map(|r| r.rating as u32).sum();
        Some(total as f64 / self.score_records.len() as f64)
    }

    pub fn media_constraints(&self) -> MediaConstraints {
        MediaConstraints::new(self.is_video_mode)
    }

    pub fn phase(&self) -> SessionPhase {
        if self.is_complete {
            SessionPhase::Complete
        } else if self.questions.is_empty() {
            SessionPhase::Idle
        } else if self.is_recording {
            SessionPhase::Recording
        } else if self.current_recording.is_some() {
            SessionPhase::RecordingReady
        } else if self.current_index == Some(0) && self.score_records.is_empty() {
            SessionPhase::QuestionsReady
        } else {
            SessionPhase::AwaitingRecording
        }
    }

    /// Compute the state that follows `event`. Rejected events leave `self` untouched.
    pub fn apply(&self, event: SessionEvent) -> Result<SessionState, SessionError> {
        match event {
            SessionEvent::RoleSelected(role) => {
                let role = self.checked_selection(&role, "Role")?;
                if self.role.as_deref() == Some(role.as_str()) {
                    return Ok(self.clone());
                }
                let mut next = self.clone();
                next.role = Some(role);
                next.regenerate();
                Ok(next)
            }

            SessionEvent::CompanySelected(company) => {
                let company = self.checked_selection(&company, "Company")?;
                if self.company.as_deref() == Some(company.as_str()) {
                    return Ok(self.clone());
                }
                let mut next = self.clone();
                next.company = Some(company);
                next.regenerate();
                Ok(next)
            }

            SessionEvent::VideoModeToggled => {
                if self.is_recording {
                    return Err(SessionError::InvalidTransition(
                        "Cannot change video mode while recording",
                    ));
                }
                let mut next = self.clone();
                next.is_video_mode = !self.is_video_mode;
                Ok(next)
            }

            SessionEvent::ResumeAttached(resume) => {
                let mut next = self.clone();
                next.resume = Some(resume);
                Ok(next)
            }

            SessionEvent::RecordingStarted => {
                self.check_can_record()?;
                let mut next = self.clone();
                next.is_recording = true;
                next.is_playing = false;
                Ok(next)
            }

            SessionEvent::RecordingStopped { recording, score } => {
                if !self.is_recording {
                    return Err(SessionError::InvalidTransition("No recording in progress"));
                }
                let mut next = self.clone();
                next.is_recording = false;
                next.analysis = Some(score.analysis());
                next.current_recording = Some(recording);
                if next.score_records.len() < next.questions.len() {
                    next.score_records.push(score);
                }
                if next.score_records.len() >= next.completion_threshold() {
                    next.is_complete = true;
                }
                Ok(next)
            }

            SessionEvent::RecordingFailed => {
                let mut next = self.clone();
                next.is_recording = false;
                Ok(next)
            }

            SessionEvent::PlaybackToggled => {
                if self.is_recording || self.current_recording.is_none() {
                    return Err(SessionError::InvalidTransition("No recording to play back"));
                }
                let mut next = self.clone();
                next.is_playing = !self.is_playing;
                Ok(next)
            }

            SessionEvent::QuestionAdvanced => {
                if self.is_recording {
                    return Err(SessionError::InvalidTransition(
                        "Stop recording before moving to the next question",
                    ));
                }
                if self.current_recording.is_none() {
                    return Err(SessionError::InvalidTransition(
                        "Record an answer before moving to the next question",
                    ));
                }
                let Some(index) = self.current_index.filter(|_| self.has_next_question()) else {
                    return Err(SessionError::InvalidTransition("There is no next question"));
                };
                let mut next = self.clone();
                next.current_index = Some(index + 1);
                next.current_recording = None;
                next.analysis = None;
                next.is_playing = false;
                Ok(next)
            }

            SessionEvent::Reset => Ok(SessionState::new(self.completion)),
        }
    }

    /// Preconditions for starting a capture on the current question
    pub fn check_can_record(&self) -> Result<(), SessionError> {
        if self.questions.is_empty() {
            return Err(SessionError::InvalidTransition(
                "Select a role and company before recording",
            ));
        }
        if self.is_recording {
            return Err(SessionError::InvalidTransition("Already recording"));
        }
        if self.is_complete {
            return Err(SessionError::InvalidTransition("The interview is already complete"));
        }
        if self.current_recording.is_some() {
            return Err(SessionError::InvalidTransition(
                "This question has already been answered",
            ));
        }
        Ok(())
    }

    fn checked_selection(&self, value: &str, field: &str) -> Result<String, SessionError> {
        if self.is_recording {
            return Err(SessionError::InvalidTransition(
                "Cannot change the selection while recording",
            ));
        }
        let value = value.trim();
        if value.is_empty() {
            return Err(SessionError::Validation(format!("{field} must not be empty")));
        }
        Ok(value.to_string())
    }

    /// Replace the question list and discard all progress tied to the old one
    fn regenerate(&mut self) {
        let (Some(role), Some(company)) = (&self.role, &self.company) else {
            return;
        };
        self.questions = generate_questions(role, company);
        self.current_index = if self.questions.is_empty() { None } else { Some(0) };
        self.current_recording = None;
        self.analysis = None;
        self.is_playing = false;
        self.score_records.clear();
        self.is_complete = false;
    }
}

/// Read-only view of a session for presentation
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub interview_id: String,
    pub phase: SessionPhase,
    pub role: Option<String>,
    pub company: Option<String>,
    pub questions: Vec<String>,
    pub current_index: Option<usize>,
    pub current_question: Option<String>,
    pub has_next_question: bool,
    pub is_recording: bool,
    pub is_video_mode: bool,
    pub is_playing: bool,
    pub recording: Option<RecordingInfo>,
    pub analysis: Option<String>,
    pub score_records: Vec<ScoreRecord>,
    pub completion_threshold: usize,
    pub is_complete: bool,
    pub overall_rating: Option<f64>,
    pub resume: Option<Resume>,
}

impl SessionSnapshot {
    pub fn new(interview_id: &str, state: &SessionState) -> Self {
        Self {
            interview_id: interview_id.to_string(),
            phase: state.phase(),
            role: state.role.clone(),
            company: state.company.clone(),
            questions: state.questions.clone(),
            current_index: state.current_index,
            current_question: state.current_question().map(str::to_string),
            has_next_question: state.has_next_question(),
            is_recording: state.is_recording,
            is_video_mode: state.is_video_mode,
            is_playing: state.is_playing,
            recording: state.current_recording.as_ref().map(Recording::info),
            analysis: state.analysis.clone(),
            score_records: state.score_records.clone(),
            completion_threshold: state.completion_threshold(),
            is_complete: state.is_complete,
            overall_rating: state.overall_rating(),
            resume: state.resume.clone(),
        }
    }
}
