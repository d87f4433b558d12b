// Integration tests for the session controller driving capture and scoring

mod common;

use anyhow::Result;
use common::{FixedScorer, StubCaptureProvider};
use interview_coach::capture::{
    CaptureProviderFactory, CaptureSettings, MediaKind, SyntheticCaptureProvider,
};
use interview_coach::interview::{
    CompletionPolicy, NoticeVariant, SessionController, SessionError, SessionPhase, SessionState,
};
use interview_coach::Notice;
use std::sync::Arc;

fn controller(policy: CompletionPolicy) -> (SessionController, Arc<StubCaptureProvider>) {
    let capture = StubCaptureProvider::granting();
    let controller = SessionController::new(
        "test-interview".to_string(),
        capture.clone(),
        FixedScorer::uniform(8),
        policy,
    );
    (controller, capture)
}

#[tokio::test]
async fn test_full_interview_completes_after_last_answer() -> Result<()> {
    let (mut session, _) = controller(CompletionPolicy::QuestionCount);
    session.select_role("Software Engineer")?;
    let notice = session.select_company("Google")?;
    assert_eq!(notice.unwrap().description, "11 questions prepared");

    for i in 0..11 {
        assert!(!session.state().is_complete, "complete before answer {}", i + 1);
        session.start_recording().await?;
        assert_eq!(session.state().phase(), SessionPhase::Recording);
        session.stop_recording().await?;
        if session.state().has_next_question() {
            session.next_question()?;
        }
    }

    let state = session.state();
    assert!(state.is_complete);
    assert_eq!(state.score_records.len(), 11);
    assert_eq!(state.overall_rating(), Some(8.0));

    let report = session.report();
    assert!(report.complete);
    assert_eq!(report.entries.len(), 11);
    for (i, entry) in report.entries.iter().enumerate() {
        assert_eq!(entry.number, i + 1);
        assert_eq!(entry.question, state.questions[i]);
    }
    assert!(report.to_string().contains("Overall Rating: 8.0/10"));
    Ok(())
}

#[tokio::test]
async fn test_stop_returns_completion_notice() -> Result<()> {
    let (mut session, _) = controller(CompletionPolicy::Fixed(1));
    session.select_role("UX Designer")?;
    session.select_company("Other")?;

    session.start_recording().await?;
    let notice = session.stop_recording().await?.unwrap();
    assert_eq!(notice.title, "Interview complete");
    assert_eq!(session.state().phase(), SessionPhase::Complete);
    Ok(())
}

#[tokio::test]
async fn test_capture_denied_leaves_state_unchanged() -> Result<()> {
    let capture = StubCaptureProvider::denying();
    let mut session = SessionController::new(
        "denied".to_string(),
        capture.clone(),
        FixedScorer::uniform(8),
        CompletionPolicy::QuestionCount,
    );
    session.select_role("Product Manager")?;
    session.select_company("Amazon")?;
    let before = session.state().clone();

    let err = session.start_recording().await.unwrap_err();
    assert!(matches!(err, SessionError::CaptureAccessDenied(_)));
    assert_eq!(Notice::from(&err).variant, NoticeVariant::Destructive);

    // Single attempt, no retry
    assert_eq!(capture.requests(), 1);
    assert_eq!(session.state(), &before);
    assert_eq!(session.state().phase(), SessionPhase::QuestionsReady);
    Ok(())
}

#[tokio::test]
async fn test_start_before_selection_does_not_touch_devices() {
    let (mut session, capture) = controller(CompletionPolicy::QuestionCount);
    let err = session.start_recording().await.unwrap_err();
    assert!(matches!(err, SessionError::InvalidTransition(_)));
    assert_eq!(capture.requests(), 0);
}

#[tokio::test]
async fn test_video_mode_records_audio_and_video() -> Result<()> {
    let (mut session, _) = controller(CompletionPolicy::QuestionCount);
    session.select_role("Data Scientist")?;
    session.select_company("Tesla")?;
    session.toggle_video_mode()?;

    session.start_recording().await?;
    session.stop_recording().await?;

    let recording = session.current_recording().unwrap();
    assert_eq!(recording.kind, MediaKind::AudioVideo);
    assert_eq!(recording.mime_type, "video/x-raw");
    assert!(!session.state().score_records[0].user_answer.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_video_mode_without_camera_is_denied() -> Result<()> {
    let mut session = SessionController::new(
        "no-camera".to_string(),
        Arc::new(SyntheticCaptureProvider::new(16000, 20)),
        FixedScorer::uniform(8),
        CompletionPolicy::QuestionCount,
    );
    session.select_role("Data Scientist")?;
    session.select_company("Tesla")?;
    session.toggle_video_mode()?;

    let err = session.start_recording().await.unwrap_err();
    assert!(matches!(err, SessionError::CaptureAccessDenied(_)));
    assert!(!session.state().is_recording);
    Ok(())
}

#[tokio::test]
async fn test_video_mode_with_configured_camera() -> Result<()> {
    let capture = CaptureProviderFactory::create(&CaptureSettings {
        frame_ms: 20,
        camera: true,
        ..CaptureSettings::default()
    });
    let mut session = SessionController::new(
        "camera".to_string(),
        capture,
        FixedScorer::uniform(8),
        CompletionPolicy::QuestionCount,
    );
    session.select_role("Data Scientist")?;
    session.select_company("Tesla")?;
    session.toggle_video_mode()?;

    session.start_recording().await?;
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    session.stop_recording().await?;

    let recording = session.current_recording().unwrap();
    assert_eq!(recording.kind, MediaKind::AudioVideo);
    assert_eq!(recording.mime_type, "video/x-raw");
    assert!(recording.duration_ms > 0);
    assert!(session.state().score_records[0]
        .user_answer
        .starts_with("Video response recorded"));
    Ok(())
}

#[tokio::test]
async fn test_next_requires_an_answer() -> Result<()> {
    let (mut session, _) = controller(CompletionPolicy::QuestionCount);
    session.select_role("UX Designer")?;
    session.select_company("Other")?;

    let err = session.next_question().unwrap_err();
    assert!(matches!(err, SessionError::InvalidTransition(_)));
    assert_eq!(session.state().current_index, Some(0));

    session.start_recording().await?;
    session.stop_recording().await?;
    session.next_question()?;
    assert_eq!(session.state().current_index, Some(1));
    Ok(())
}

#[tokio::test]
async fn test_synthetic_capture_end_to_end() -> Result<()> {
    let mut session = SessionController::new(
        "synthetic".to_string(),
        Arc::new(SyntheticCaptureProvider::new(16000, 20)),
        FixedScorer::uniform(7),
        CompletionPolicy::QuestionCount,
    );
    session.select_role("Software Engineer")?;
    session.select_company("Other")?;

    session.start_recording().await?;
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    session.stop_recording().await?;

    let recording = session.current_recording().unwrap();
    assert_eq!(recording.mime_type, "audio/wav");
    assert!(recording.data.starts_with(b"RIFF"));
    assert!(recording.duration_ms > 0);
    assert_eq!(session.state().score_records[0].rating, 7);
    Ok(())
}

#[tokio::test]
async fn test_non_pdf_resume_is_rejected_without_state_change() -> Result<()> {
    let (mut session, _) = controller(CompletionPolicy::QuestionCount);
    session.select_role("Marketing Manager")?;
    let before = session.state().clone();

    let err = session
        .upload_resume("resume.docx", Some("application/msword"), b"doc")
        .unwrap_err();
    assert!(matches!(err, SessionError::InvalidUpload(_)));
    assert!(session.state().resume.is_none());
    assert_eq!(session.state(), &before);

    let notice = session
        .upload_resume("resume.pdf", Some("application/pdf"), b"%PDF-1.4")?
        .unwrap();
    assert_eq!(notice.title, "Resume uploaded");
    let resume = session.state().resume.as_ref().unwrap();
    assert_eq!(resume.file_name, "resume.pdf");
    assert_eq!(resume.size_bytes, 8);
    Ok(())
}

#[tokio::test]
async fn test_reset_releases_active_capture() -> Result<()> {
    let (mut session, _) = controller(CompletionPolicy::QuestionCount);
    session.select_role("Sales Representative")?;
    session.select_company("Microsoft")?;
    session.start_recording().await?;

    session.reset().await?;
    assert_eq!(
        session.state(),
        &SessionState::new(CompletionPolicy::QuestionCount)
    );

    // Stop after reset has nothing to finalize
    assert!(session.stop_recording().await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_reset_after_completion() -> Result<()> {
    let (mut session, _) = controller(CompletionPolicy::QuestionCount);
    session.select_role("UX Designer")?;
    session.select_company("Other")?;
    for _ in 0..3 {
        session.start_recording().await?;
        session.stop_recording().await?;
        if session.state().has_next_question() {
            session.next_question()?;
        }
    }
    assert!(session.state().is_complete);

    session.reset().await?;
    let state = session.state();
    assert_eq!(state.phase(), SessionPhase::Idle);
    assert!(state.role.is_none() && state.company.is_none());
    assert!(state.questions.is_empty() && state.score_records.is_empty());
    Ok(())
}
