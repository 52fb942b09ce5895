use anyhow::{Context, Result};

const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_GROQ_MODEL: &str = "openai/gpt-oss-120b";
const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_YOUTUBE_API_URL: &str = "https://www.googleapis.com/youtube/v3";
const DEFAULT_NEWS_API_URL: &str = "https://news-api14.p.rapidapi.com";
const DEFAULT_JOBS_API_URL: &str = "https://jsearch.p.rapidapi.com";
const DEFAULT_EMBEDDING_CACHE_DIR: &str = ".fastembed_cache";

/// Application configuration loaded from environment variables.
///
/// Only `PORT` is validated at startup. Every third-party integration is
/// optional: a missing key disables that integration and the routes fall back
/// to their rule-based paths.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub groq_api_key: Option<String>,
    pub groq_base_url: String,
    pub groq_model: String,
    pub llm_timeout_secs: u64,
    pub github_token: Option<String>,
    pub github_api_url: String,
    pub youtube_api_key: Option<String>,
    pub youtube_api_url: String,
    /// Shared key for the RapidAPI news and job search feeds.
    pub rapidapi_key: Option<String>,
    pub news_api_url: String,
    pub jobs_api_url: String,
    /// Where the sentence embedding model is cached between starts.
    pub embedding_cache_dir: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            groq_api_key: optional_env("GROQ_API_KEY"),
            groq_base_url: optional_env("GROQ_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GROQ_BASE_URL.to_string()),
            groq_model: optional_env("GROQ_MODEL")
                .unwrap_or_else(|| DEFAULT_GROQ_MODEL.to_string()),
            llm_timeout_secs: optional_env("LLM_TIMEOUT_SECS")
                .map(|v| v.parse::<u64>())
                .transpose()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?
                .unwrap_or(60),
            github_token: optional_env("GITHUB_TOKEN"),
            github_api_url: optional_env("GITHUB_API_URL")
                .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string()),
            youtube_api_key: optional_env("YOUTUBE_API_KEY"),
            youtube_api_url: optional_env("YOUTUBE_API_URL")
                .unwrap_or_else(|| DEFAULT_YOUTUBE_API_URL.to_string()),
            rapidapi_key: optional_env("RAPIDAPI_KEY"),
            news_api_url: optional_env("NEWS_API_URL")
                .unwrap_or_else(|| DEFAULT_NEWS_API_URL.to_string()),
            jobs_api_url: optional_env("JOBS_API_URL")
                .unwrap_or_else(|| DEFAULT_JOBS_API_URL.to_string()),
            embedding_cache_dir: optional_env("EMBEDDING_CACHE_DIR")
                .unwrap_or_else(|| DEFAULT_EMBEDDING_CACHE_DIR.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an env var, treating unset and blank values alike.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
impl Config {
    /// Configuration with every integration disabled.
    pub fn offline() -> Self {
        Config {
            database_url: None,
            groq_api_key: None,
            groq_base_url: DEFAULT_GROQ_BASE_URL.to_string(),
            groq_model: DEFAULT_GROQ_MODEL.to_string(),
            llm_timeout_secs: 5,
            github_token: None,
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            youtube_api_key: None,
            youtube_api_url: DEFAULT_YOUTUBE_API_URL.to_string(),
            rapidapi_key: None,
            news_api_url: DEFAULT_NEWS_API_URL.to_string(),
            jobs_api_url: DEFAULT_JOBS_API_URL.to_string(),
            embedding_cache_dir: DEFAULT_EMBEDDING_CACHE_DIR.to_string(),
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}
