use serde::{Deserialize, Serialize};

use crate::analysis::models::AnalysisSource;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapAnalysisRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_description: String,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapAnalysisResult {
    /// At most 6, no case-insensitive duplicates.
    pub missing_skills: Vec<String>,
    /// 0 – 100
    pub match_score: u32,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    #[serde(default)]
    pub source: AnalysisSource,
}

/// Lenient model output; anything may be missing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmGapAnalysis {
    #[serde(default)]
    pub missing_skills: Vec<String>,
    pub match_score: Option<f64>,
    pub strengths: Option<Vec<String>>,
    pub gaps: Option<Vec<String>>,
}
