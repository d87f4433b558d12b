pub mod capture;
pub mod config;
pub mod http;
pub mod interview;
pub mod resume;

pub use capture::{
    CaptureError, CaptureProvider, CaptureProviderFactory, CaptureSettings, CaptureStream,
    MediaConstraints, MediaKind, Recording,
};
pub use config::Config;
pub use http::{create_router, ApiError, AppState};
pub use interview::{
    generate_questions, CompletionPolicy, Notice, RandomScorer, ScoreRecord, ScoringProvider,
    SessionController, SessionError, SessionPhase, SessionReport, SessionSettings, SessionState,
};
pub use resume::{validate_resume, Resume, UploadError};
