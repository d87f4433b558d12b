use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/catalog", get(handlers::get_catalog))
        // Session lifecycle
        .route("/interviews", post(handlers::create_interview))
        .route(
            "/interviews/:interview_id",
            get(handlers::get_interview).delete(handlers::delete_interview),
        )
        // Selection and setup
        .route("/interviews/:interview_id/role", post(handlers::select_role))
        .route(
            "/interviews/:interview_id/company",
            post(handlers::select_company),
        )
        .route(
            "/interviews/:interview_id/video-mode",
            post(handlers::toggle_video_mode),
        )
        .route(
            "/interviews/:interview_id/resume",
            post(handlers::upload_resume),
        )
        // Recording
        .route(
            "/interviews/:interview_id/recording",
            get(handlers::get_recording),
        )
        .route(
            "/interviews/:interview_id/recording/start",
            post(handlers::start_recording),
        )
        .route(
            "/interviews/:interview_id/recording/stop",
            post(handlers::stop_recording),
        )
        .route(
            "/interviews/:interview_id/playback",
            post(handlers::toggle_playback),
        )
        // Sequencing
        .route("/interviews/:interview_id/next", post(handlers::next_question))
        .route(
            "/interviews/:interview_id/reset",
            post(handlers::reset_interview),
        )
        .route(
            "/interviews/:interview_id/report",
            get(handlers::get_report),
        )
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
