//! HTTP API for the interview front end
//!
//! This module exposes the session intents as a REST API:
//! - POST /interviews - Create a session
//! - POST /interviews/:id/{role,company,video-mode,resume} - Set up the interview
//! - POST /interviews/:id/recording/{start,stop} - Record an answer
//! - POST /interviews/:id/{playback,next,reset} - Move through the session
//! - GET /interviews/:id, /recording, /report - Read state, media and results
//! - GET /catalog, /health

mod error;
mod handlers;
mod routes;
mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::{AppState, SharedSession};
