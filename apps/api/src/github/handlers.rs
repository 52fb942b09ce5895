use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::info;

use crate::errors::AppError;
use crate::github::client::sanitize_username;
use crate::github::metrics::analyze_profile;
use crate::github::models::{GithubAnalysisRequest, GithubAnalysisResult};
use crate::history::storage::{persist_if_requested, AnalysisKind};
use crate::state::AppState;

/// POST /api/v1/github-analysis
///
/// Upstream failures map by message: "not found" → 404, "rate limit" → 429, else 500.
pub async fn handle_github_analysis(
    State(state): State<AppState>,
    Json(request): Json<GithubAnalysisRequest>,
) -> Result<Json<GithubAnalysisResult>, AppError> {
    let raw = request
        .username
        .as_deref()
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| AppError::Validation("GitHub username is required".to_string()))?;
    let username = sanitize_username(raw)
        .ok_or_else(|| AppError::Validation("Invalid GitHub username provided".to_string()))?;

    let (user, repos) = tokio::try_join!(
        state.github.fetch_user(&username),
        state.github.fetch_repos(&username)
    )
    .map_err(|e| AppError::from_upstream_message(e.to_string()))?;

    info!(
        "Fetched GitHub profile {} ({} public repos reported, {} fetched)",
        user.login,
        user.public_repos,
        repos.len()
    );

    let result = analyze_profile(&user, &repos, Utc::now());

    persist_if_requested(
        state.db.as_ref(),
        request.user_id.as_deref(),
        AnalysisKind::GithubAnalysis,
        &result,
    )
    .await;

    Ok(Json(result))
}

/// GET /api/v1/github-analysis
pub async fn handle_github_status() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "GitHub Analysis API is running"
    }))
}
