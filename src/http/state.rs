use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use super::error::ApiError;
use crate::capture::{CaptureProvider, CaptureProviderFactory};
use crate::config::Config;
use crate::interview::{RandomScorer, ScoringProvider, SessionController, SessionSettings};

pub type SharedSession = Arc<Mutex<SessionController>>;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Active interview sessions (interview_id → session)
    pub sessions: Arc<RwLock<HashMap<String, SharedSession>>>,

    /// Capture devices handed to every new session
    pub capture: Arc<dyn CaptureProvider>,

    /// Pluggable answer scorer. Default: RandomScorer.
    pub scorer: Arc<dyn ScoringProvider>,

    pub settings: SessionSettings,
}

impl AppState {
    pub fn new(
        capture: Arc<dyn CaptureProvider>,
        scorer: Arc<dyn ScoringProvider>,
        settings: SessionSettings,
    ) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            capture,
            scorer,
            settings,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let capture = CaptureProviderFactory::create(&config.capture_settings()?);
        let settings = config.session_settings();
        let scorer: Arc<dyn ScoringProvider> = match settings.scoring_seed {
            Some(seed) => Arc::new(RandomScorer::seeded(seed)),
            None => Arc::new(RandomScorer::new()),
        };
        Ok(Self::new(capture, scorer, settings))
    }

    pub fn new_session(&self, interview_id: String) -> SharedSession {
        Arc::new(Mutex::new(SessionController::new(
            interview_id,
            Arc::clone(&self.capture),
            Arc::clone(&self.scorer),
            self.settings.completion,
        )))
    }

    pub async fn session(&self, interview_id: &str) -> Result<SharedSession, ApiError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(interview_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(interview_id.to_string()))
    }
}
