use axum::{extract::State, Json};
use tracing::info;

use crate::analysis::handlers::MIN_TEXT_CHARS;
use crate::errors::AppError;
use crate::gap::chain::analyze_gap;
use crate::gap::models::{GapAnalysisRequest, GapAnalysisResult};
use crate::history::storage::{persist_if_requested, AnalysisKind};
use crate::state::AppState;

fn validate(request: &GapAnalysisRequest) -> Result<(), AppError> {
    if request.resume_text.trim().is_empty() || request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Both resumeText and jobDescription are required".to_string(),
        ));
    }
    let resume_len = request.resume_text.chars().count();
    let jd_len = request.job_description.chars().count();
    if resume_len < MIN_TEXT_CHARS || jd_len < MIN_TEXT_CHARS {
        return Err(AppError::Validation(format!(
            "Resume and job description must be at least {MIN_TEXT_CHARS} characters \
             (resumeText: {resume_len}, jobDescription: {jd_len})"
        )));
    }
    Ok(())
}

/// POST /api/v1/jd-gap-analysis
pub async fn handle_gap_analysis(
    State(state): State<AppState>,
    Json(request): Json<GapAnalysisRequest>,
) -> Result<Json<GapAnalysisResult>, AppError> {
    validate(&request)?;
    info!(
        "JD gap analysis request: resume {} chars, JD {} chars",
        request.resume_text.len(),
        request.job_description.len()
    );

    let result = analyze_gap(
        state.llm.as_ref(),
        &state.vector_store,
        &request.resume_text,
        &request.job_description,
    )
    .await;

    persist_if_requested(
        state.db.as_ref(),
        request.user_id.as_deref(),
        AnalysisKind::JdGapAnalysis,
        &result,
    )
    .await;

    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(resume: &str, jd: &str) -> GapAnalysisRequest {
        GapAnalysisRequest {
            resume_text: resume.to_string(),
            job_description: jd.to_string(),
            user_id: None,
        }
    }

    #[test]
    fn test_missing_fields_rejected() {
        let long = "x".repeat(60);
        assert!(matches!(
            validate(&request("", &long)),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            validate(&request(&long, "   ")),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_short_text_rejected() {
        let long = "x".repeat(60);
        let err = validate(&request("too short", &long)).unwrap_err();
        assert!(err.to_string().contains("at least 50 characters"));
    }

    #[test]
    fn test_valid_request_passes() {
        let long = "y".repeat(50);
        assert!(validate(&request(&long, &long)).is_ok());
    }
}
