//! Interview session management
//!
//! This module provides the `SessionController` and the pieces it drives:
//! - Role/company catalog and question list generation
//! - Simulated answer scoring behind a replaceable provider
//! - Session state reducer and derived phases
//! - Summary report

pub mod catalog;
mod controller;
mod error;
pub mod questions;
mod report;
pub mod scoring;
mod state;

pub use catalog::{Catalog, COMPANIES, JOB_ROLES, OTHER_COMPANY};
pub use controller::{Notice, NoticeVariant, SessionController};
pub use error::SessionError;
pub use questions::{generate_questions, role_questions, COMMON_QUESTIONS};
pub use report::{ReportEntry, SessionReport};
pub use scoring::{
    feedback_for_rating, ideal_answer, FeedbackTier, RandomScorer, ScoreRecord, ScoringProvider,
    SubScores,
};
pub use state::{
    CompletionPolicy, SessionEvent, SessionPhase, SessionSettings, SessionSnapshot, SessionState,
};
