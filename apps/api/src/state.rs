use std::sync::Arc;

use sqlx::PgPool;

use crate::feeds::client::RapidApiClient;
use crate::github::client::GithubClient;
use crate::llm_client::LlmClient;
use crate::rag::VectorStore;
use crate::recommendations::youtube::YoutubeClient;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Every integration except GitHub is optional; `None` routes requests down
/// their rule-based or empty-result paths.
#[derive(Clone)]
pub struct AppState {
    /// Analysis history store. `None` disables persistence and the history routes.
    pub db: Option<PgPool>,
    pub llm: Option<LlmClient>,
    /// Process-wide knowledge collection, built on first use.
    pub vector_store: Arc<VectorStore>,
    pub github: GithubClient,
    pub youtube: Option<YoutubeClient>,
    /// News and internship feeds; `None` without a RapidAPI key.
    pub feeds: Option<RapidApiClient>,
}

#[cfg(test)]
impl AppState {
    /// State with no database, no LLM and no YouTube key.
    pub fn offline() -> Self {
        use crate::config::Config;
        use crate::rag::HashingEmbedder;

        let config = Config::offline();
        AppState {
            db: None,
            llm: None,
            vector_store: Arc::new(VectorStore::new(Arc::new(HashingEmbedder::default()))),
            github: GithubClient::from_config(&config).unwrap(),
            youtube: None,
            feeds: None,
        }
    }
}
