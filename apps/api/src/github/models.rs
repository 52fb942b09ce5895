use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// GitHub REST payloads (only the fields scoring reads)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct GithubUser {
    pub login: String,
    pub html_url: String,
    #[serde(default)]
    pub public_repos: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GithubRepo {
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    /// Null for repositories that were never pushed to.
    pub pushed_at: Option<DateTime<Utc>>,
    /// Kilobytes.
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub private: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Analysis output
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageStat {
    pub language: String,
    pub repo_count: u32,
    pub percentage: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityMetrics {
    pub total_repos: u32,
    pub recent_commits: bool,
    pub days_since_last_activity: Option<i64>,
    pub active_repos_count: u32,
    pub score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityMetrics {
    pub average_repo_size: u64,
    pub has_advanced_projects: bool,
    pub total_stars: u64,
    pub total_forks: u64,
    pub score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivityMetrics {
    pub repos_updated_last_6_months: u32,
    pub repos_updated_last_12_months: u32,
    pub most_active_month: String,
    pub score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenSourceMetrics {
    pub total_stars: u64,
    pub total_forks: u64,
    /// One decimal place.
    pub average_stars_per_repo: f64,
    pub top_starred_repo: String,
    pub score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMetrics {
    pub languages: Vec<LanguageStat>,
    pub activity: ActivityMetrics,
    pub complexity: ComplexityMetrics,
    pub recent_activity: RecentActivityMetrics,
    pub open_source: OpenSourceMetrics,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageShare {
    pub language: String,
    pub percentage: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthCount {
    /// "Jan 2025"
    pub month: String,
    pub repos: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Charts {
    pub language_distribution: Vec<LanguageShare>,
    pub activity_timeline: Vec<MonthCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubAnalysisResult {
    pub overall_score: u32,
    pub username: String,
    pub profile_url: String,
    pub metrics: ProfileMetrics,
    pub summary: String,
    pub recommendations: Vec<String>,
    pub improvement_ideas: Vec<String>,
    pub charts: Charts,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubAnalysisRequest {
    pub username: Option<String>,
    pub user_id: Option<String>,
}
