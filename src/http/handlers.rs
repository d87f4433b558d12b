use super::error::ApiError;
use super::state::AppState;
use crate::interview::{Catalog, Notice, SessionController, SessionError, SessionSnapshot};
use crate::resume::UploadError;
use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::info;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct CreateInterviewRequest {
    /// Optional interview ID (if not provided, generate UUID)
    pub interview_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectRoleRequest {
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectCompanyRequest {
    pub company: String,
}

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    /// "json" (default) or "text"
    pub format: Option<String>,
}

/// Result of an intent: the new state plus an optional notification
#[derive(Debug, Serialize)]
pub struct IntentResponse {
    pub state: SessionSnapshot,
    pub notice: Option<Notice>,
}

impl IntentResponse {
    fn new(controller: &SessionController, notice: Option<Notice>) -> Json<Self> {
        Json(Self {
            state: controller.snapshot(),
            notice,
        })
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// GET /catalog
/// Roles and companies available for selection
pub async fn get_catalog() -> Json<Catalog> {
    Json(Catalog::new())
}

/// POST /interviews
/// Create a new interview session
pub async fn create_interview(
    State(state): State<AppState>,
    req: Option<Json<CreateInterviewRequest>>,
) -> Result<(StatusCode, Json<IntentResponse>), ApiError> {
    let req = req.map(|Json(r)| r).unwrap_or_default();
    let interview_id = req
        .interview_id
        .unwrap_or_else(|| format!("interview-{}", uuid::Uuid::new_v4()));

    if interview_id.trim().is_empty() {
        return Err(ApiError::Validation("interview_id must not be empty".to_string()));
    }

    let session = {
        let mut sessions = state.sessions.write().await;
        if sessions.contains_key(&interview_id) {
            return Err(ApiError::Conflict(interview_id));
        }
        let session = state.new_session(interview_id.clone());
        sessions.insert(interview_id.clone(), session.clone());
        session
    };

    info!("Created interview: {}", interview_id);

    let controller = session.lock().await;
    Ok((StatusCode::CREATED, IntentResponse::new(&controller, None)))
}

/// GET /interviews/:interview_id
pub async fn get_interview(
    State(state): State<AppState>,
    Path(interview_id): Path<String>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let session = state.session(&interview_id).await?;
    let controller = session.lock().await;
    Ok(Json(controller.snapshot()))
}

/// DELETE /interviews/:interview_id
/// Discard a session, releasing any open capture
pub async fn delete_interview(
    State(state): State<AppState>,
    Path(interview_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let session = {
        let mut sessions = state.sessions.write().await;
        sessions.remove(&interview_id)
    }
    .ok_or_else(|| ApiError::NotFound(interview_id.clone()))?;

    session.lock().await.close().await;
    info!("Deleted interview: {}", interview_id);

    Ok(StatusCode::NO_CONTENT)
}

/// POST /interviews/:interview_id/role
pub async fn select_role(
    State(state): State<AppState>,
    Path(interview_id): Path<String>,
    Json(req): Json<SelectRoleRequest>,
) -> Result<Json<IntentResponse>, ApiError> {
    let session = state.session(&interview_id).await?;
    let mut controller = session.lock().await;
    let notice = controller.select_role(&req.role)?;
    Ok(IntentResponse::new(&controller, notice))
}

/// POST /interviews/:interview_id/company
pub async fn select_company(
    State(state): State<AppState>,
    Path(interview_id): Path<String>,
    Json(req): Json<SelectCompanyRequest>,
) -> Result<Json<IntentResponse>, ApiError> {
    let session = state.session(&interview_id).await?;
    let mut controller = session.lock().await;
    let notice = controller.select_company(&req.company)?;
    Ok(IntentResponse::new(&controller, notice))
}

/// POST /interviews/:interview_id/video-mode
pub async fn toggle_video_mode(
    State(state): State<AppState>,
    Path(interview_id): Path<String>,
) -> Result<Json<IntentResponse>, ApiError> {
    let session = state.session(&interview_id).await?;
    let mut controller = session.lock().await;
    let notice = controller.toggle_video_mode()?;
    Ok(IntentResponse::new(&controller, notice))
}

/// POST /interviews/:interview_id/resume
/// Multipart upload; the file is read from the `resume` field
pub async fn upload_resume(
    State(state): State<AppState>,
    Path(interview_id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<IntentResponse>, ApiError> {
    let session = state.session(&interview_id).await?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("resume") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("resume").to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::Validation(format!("Failed to read upload: {e}")))?;
        upload = Some((file_name, content_type, data));
        break;
    }

    let (file_name, content_type, data) =
        upload.ok_or(SessionError::InvalidUpload(UploadError::MissingFile))?;

    let mut controller = session.lock().await;
    let notice = controller.upload_resume(&file_name, content_type.as_deref(), &data)?;
    Ok(IntentResponse::new(&controller, notice))
}

/// POST /interviews/:interview_id/recording/start
pub async fn start_recording(
    State(state): State<AppState>,
    Path(interview_id): Path<String>,
) -> Result<Json<IntentResponse>, ApiError> {
    let session = state.session(&interview_id).await?;
    let mut controller = session.lock().await;
    let notice = controller.start_recording().await?;
    Ok(IntentResponse::new(&controller, notice))
}

/// POST /interviews/:interview_id/recording/stop
/// Finalize the recording and score the answer
pub async fn stop_recording(
    State(state): State<AppState>,
    Path(interview_id): Path<String>,
) -> Result<Json<IntentResponse>, ApiError> {
    let session = state.session(&interview_id).await?;
    let mut controller = session.lock().await;
    let notice = controller.stop_recording().await?;
    Ok(IntentResponse::new(&controller, notice))
}

/// GET /interviews/:interview_id/recording
/// Raw media for the current question
pub async fn get_recording(
    State(state): State<AppState>,
    Path(interview_id): Path<String>,
) -> Result<Response, ApiError> {
    let session = state.session(&interview_id).await?;
    let controller = session.lock().await;
    let recording = controller
        .current_recording()
        .ok_or_else(|| ApiError::NoRecording(interview_id.clone()))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, recording.mime_type.clone())],
        recording.data.clone(),
    )
        .into_response())
}

/// POST /interviews/:interview_id/playback
pub async fn toggle_playback(
    State(state): State<AppState>,
    Path(interview_id): Path<String>,
) -> Result<Json<IntentResponse>, ApiError> {
    let session = state.session(&interview_id).await?;
    let mut controller = session.lock().await;
    let notice = controller.toggle_playback()?;
    Ok(IntentResponse::new(&controller, notice))
}

/// POST /interviews/:interview_id/next
pub async fn next_question(
    State(state): State<AppState>,
    Path(interview_id): Path<String>,
) -> Result<Json<IntentResponse>, ApiError> {
    let session = state.session(&interview_id).await?;
    let mut controller = session.lock().await;
    let notice = controller.next_question()?;
    Ok(IntentResponse::new(&controller, notice))
}

/// POST /interviews/:interview_id/reset
pub async fn reset_interview(
    State(state): State<AppState>,
    Path(interview_id): Path<String>,
) -> Result<Json<IntentResponse>, ApiError> {
    let session = state.session(&interview_id).await?;
    let mut controller = session.lock().await;
    let notice = controller.reset().await?;
    Ok(IntentResponse::new(&controller, notice))
}

/// GET /interviews/:interview_id/report
pub async fn get_report(
    State(state): State<AppState>,
    Path(interview_id): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Result<Response, ApiError> {
    let session = state.session(&interview_id).await?;
    let report = session.lock().await.report();

    match query.format.as_deref() {
        None | Some("json") => Ok(Json(report).into_response()),
        Some("text") => Ok((
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            report.to_string(),
        )
            .into_response()),
        Some(other) => Err(ApiError::Validation(format!(
            "Unknown report format: {other}"
        ))),
    }
}
