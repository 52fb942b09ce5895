use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One persisted analysis. `result` holds the response body exactly as it was returned.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecordRow {
    pub id: Uuid,
    pub user_id: String,
    pub kind: String,
    pub result: Value,
    pub created_at: DateTime<Utc>,
}
