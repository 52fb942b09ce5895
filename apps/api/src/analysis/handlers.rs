//! Axum route handlers for resume analysis.

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::info;

use crate::analysis::chain::analyze_resume;
use crate::analysis::extract::{extract_text, FileKind};
use crate::analysis::models::AnalysisResult;
use crate::errors::AppError;
use crate::history::storage::{persist_if_requested, AnalysisKind};
use crate::state::AppState;

/// Shortest extracted text accepted for analysis, in characters.
pub const MIN_TEXT_CHARS: usize = 50;

struct UploadedResume {
    kind: FileKind,
    bytes: Vec<u8>,
}

/// POST /api/v1/resume-analysis
///
/// Multipart form: `resume` file (text, PDF or DOCX) and an optional `userId`.
/// Always answers with an AnalysisResult once text is extracted; LLM failures
/// fall back to the rule-based analyzer.
pub async fn handle_resume_analysis(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let mut upload: Option<UploadedResume> = None;
    let mut user_id: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("resume") => {
                let kind = FileKind::detect(field.content_type(), field.file_name());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                upload = Some(UploadedResume {
                    kind,
                    bytes: bytes.to_vec(),
                });
            }
            Some("userId") => {
                user_id = field.text().await.ok();
            }
            _ => {}
        }
    }

    let upload = upload.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;
    info!(
        "Resume upload received: {:?}, {} bytes",
        upload.kind,
        upload.bytes.len()
    );

    let text = extract_text(upload.kind, upload.bytes).await;
    if text.trim().chars().count() < MIN_TEXT_CHARS {
        return Err(AppError::Validation(
            "Could not extract text from file. Please try a different format.".to_string(),
        ));
    }

    let result = analyze_resume(state.llm.as_ref(), &state.vector_store, &text).await;
    info!(
        "Resume analysis complete: score={}, source={:?}",
        result.overall_score, result.source
    );

    persist_if_requested(
        state.db.as_ref(),
        user_id.as_deref(),
        AnalysisKind::ResumeAnalysis,
        &result,
    )
    .await;

    Ok(Json(result))
}
