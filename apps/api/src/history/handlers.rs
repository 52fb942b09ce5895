use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::history::storage::{clamp_limit, get_analysis, list_analyses};
use crate::models::analysis::AnalysisRecordRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub user_id: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisListResponse {
    pub analyses: Vec<AnalysisRecordRow>,
}

fn require_db(state: &AppState) -> Result<&PgPool, AppError> {
    state
        .db
        .as_ref()
        .ok_or_else(|| AppError::Unavailable("Analysis history requires a database".to_string()))
}

fn require_user_id(user_id: Option<String>) -> Result<String, AppError> {
    user_id
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::Validation("userId is required".to_string()))
}

/// GET /api/v1/analyses?userId=…&limit=…
pub async fn handle_list_analyses(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<AnalysisListResponse>, AppError> {
    let pool = require_db(&state)?;
    let user_id = require_user_id(params.user_id)?;
    let analyses = list_analyses(pool, &user_id, clamp_limit(params.limit)).await?;
    Ok(Json(AnalysisListResponse { analyses }))
}

/// GET /api/v1/analyses/:id?userId=…
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<AnalysisRecordRow>, AppError> {
    let pool = require_db(&state)?;
    let user_id = require_user_id(params.user_id)?;
    Ok(Json(get_analysis(pool, id, &user_id).await?))
}
