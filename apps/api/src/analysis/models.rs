use serde::{Deserialize, Serialize};

/// Which path produced a result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisSource {
    Llm,
    #[default]
    RuleBased,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionScore {
    pub title: String,
    /// 0 – 100
    pub score: u32,
    pub feedback: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketComparison {
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub in_demand_skills: Vec<String>,
}

/// Full resume analysis returned to callers and persisted verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// 0 – 100
    pub overall_score: u32,
    pub sections: Vec<SectionScore>,
    pub market_comparison: MarketComparison,
    pub tips: Vec<String>,
    pub summary: String,
    #[serde(default)]
    pub source: AnalysisSource,
}

// ────────────────────────────────────────────────────────────────────────────
// Lenient LLM output shapes: every field optional so partial answers can be patched
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmAnalysis {
    pub overall_score: Option<f64>,
    #[serde(default)]
    pub sections: Vec<LlmSection>,
    pub market_comparison: Option<LlmMarketComparison>,
    #[serde(default)]
    pub tips: Vec<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LlmSection {
    pub title: Option<String>,
    pub score: Option<f64>,
    pub feedback: Option<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmMarketComparison {
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub gaps: Vec<String>,
    #[serde(default)]
    pub in_demand_skills: Vec<String>,
}

/// Rounds and clamps a model-reported score into 0 – 100.
pub fn clamp_score(raw: f64) -> u32 {
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u32
}
