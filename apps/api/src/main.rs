mod analysis;
mod config;
mod db;
mod errors;
mod feeds;
mod gap;
mod github;
mod history;
mod llm_client;
mod models;
mod rag;
mod recommendations;
mod routes;
mod state;

use anyhow::Result;
use sqlx::PgPool;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::feeds::client::RapidApiClient;
use crate::github::client::GithubClient;
use crate::llm_client::LlmClient;
use crate::rag::{load_embedder, VectorStore};
use crate::recommendations::youtube::YoutubeClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting FocusEdu API v{}", env!("CARGO_PKG_VERSION"));

    let db = connect_history_store(&config).await;

    let llm = LlmClient::from_config(&config)?;
    match &llm {
        Some(llm) => info!("LLM client initialized (model: {})", llm.model()),
        None => warn!("GROQ_API_KEY not set, analyses will use rule-based scoring"),
    }

    let github = GithubClient::from_config(&config)?;
    if config.github_token.is_none() {
        info!("GITHUB_TOKEN not set, using unauthenticated GitHub rate limits");
    }

    let youtube = YoutubeClient::from_config(&config)?;
    if youtube.is_none() {
        warn!("YOUTUBE_API_KEY not set, recommendations will not include videos");
    }

    let feeds = RapidApiClient::from_config(&config)?;
    if feeds.is_none() {
        warn!("RAPIDAPI_KEY not set, news and internship feeds will be empty");
    }

    // Build the knowledge collection up front so the first request doesn't pay for it
    let embedder = load_embedder(Path::new(&config.embedding_cache_dir)).await;
    let vector_store = Arc::new(VectorStore::new(embedder));
    match vector_store.initialize().await {
        Ok(collection) => info!(
            "Knowledge collection '{}' ready with {} documents",
            collection.name(),
            collection.len()
        ),
        Err(e) => warn!("Knowledge collection warm-up failed, retrying on first request: {e}"),
    }

    let state = AppState {
        db,
        llm,
        vector_store,
        github,
        youtube,
        feeds,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Connects to PostgreSQL when `DATABASE_URL` is set. Any failure disables
/// history instead of stopping the server.
async fn connect_history_store(config: &Config) -> Option<PgPool> {
    let Some(url) = config.database_url.as_deref() else {
        info!("DATABASE_URL not set, analysis history disabled");
        return None;
    };

    let pool = match create_pool(url).await {
        Ok(pool) => pool,
        Err(e) => {
            warn!("PostgreSQL unavailable, analysis history disabled: {e}");
            return None;
        }
    };

    match ensure_schema(&pool).await {
        Ok(()) => Some(pool),
        Err(e) => {
            warn!("Failed to prepare analysis history schema, history disabled: {e}");
            None
        }
    }
}
