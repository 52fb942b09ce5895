use serde::Serialize;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::analysis::AnalysisRecordRow;

pub const DEFAULT_LIST_LIMIT: i64 = 20;
pub const MAX_LIST_LIMIT: i64 = 100;

/// What produced a stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    ResumeAnalysis,
    JdGapAnalysis,
    GithubAnalysis,
}

impl AnalysisKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisKind::ResumeAnalysis => "resume_analysis",
            AnalysisKind::JdGapAnalysis => "jd_gap_analysis",
            AnalysisKind::GithubAnalysis => "github_analysis",
        }
    }
}

/// Inserts one record. Append-only; records are never updated.
pub async fn save_analysis<T: Serialize>(
    pool: &PgPool,
    user_id: &str,
    kind: AnalysisKind,
    result: &T,
) -> Result<Uuid, AppError> {
    let id = Uuid::new_v4();
    let value = serde_json::to_value(result)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to serialize result: {e}")))?;

    sqlx::query("INSERT INTO analyses (id, user_id, kind, result) VALUES ($1, $2, $3, $4)")
        .bind(id)
        .bind(user_id)
        .bind(kind.as_str())
        .bind(&value)
        .execute(pool)
        .await?;

    info!("Saved {} {id} for user {user_id}", kind.as_str());
    Ok(id)
}

/// Saves `result` when both a pool and a non-empty user id are present.
/// Failures are logged and swallowed.
pub async fn persist_if_requested<T: Serialize>(
    pool: Option<&PgPool>,
    user_id: Option<&str>,
    kind: AnalysisKind,
    result: &T,
) -> Option<Uuid> {
    let user_id = user_id.map(str::trim).filter(|u| !u.is_empty())?;
    let pool = pool?;
    match save_analysis(pool, user_id, kind, result).await {
        Ok(id) => Some(id),
        Err(e) => {
            warn!("Failed to persist {}: {e}", kind.as_str());
            None
        }
    }
}

/// Newest first.
pub async fn list_analyses(
    pool: &PgPool,
    user_id: &str,
    limit: i64,
) -> Result<Vec<AnalysisRecordRow>, AppError> {
    let rows = sqlx::query_as::<_, AnalysisRecordRow>(
        r#"
        SELECT id, user_id, kind, result, created_at
        FROM analyses
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Fetches one record owned by `user_id`.
pub async fn get_analysis(
    pool: &PgPool,
    id: Uuid,
    user_id: &str,
) -> Result<AnalysisRecordRow, AppError> {
    sqlx::query_as::<_, AnalysisRecordRow>(
        "SELECT id, user_id, kind, result, created_at FROM analyses WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Analysis {id} not found")))
}

/// Default 20, bounded to 1 ..= 100.
pub fn clamp_limit(requested: Option<i64>) -> i64 {
    requested
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(1, MAX_LIST_LIMIT)
}
