pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers::handle_resume_analysis;
use crate::feeds::handlers::{handle_internships, handle_news};
use crate::gap::handlers::handle_gap_analysis;
use crate::github::handlers::{handle_github_analysis, handle_github_status};
use crate::history::handlers::{handle_get_analysis, handle_list_analyses};
use crate::recommendations::handlers::handle_recommendations;
use crate::state::AppState;

/// Largest accepted request body (resume uploads included).
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis
        .route("/api/v1/resume-analysis", post(handle_resume_analysis))
        .route("/api/v1/jd-gap-analysis", post(handle_gap_analysis))
        .route(
            "/api/v1/github-analysis",
            post(handle_github_analysis).get(handle_github_status),
        )
        // Learning resources
        .route("/api/v1/recommendations", post(handle_recommendations))
        // Feeds
        .route("/api/v1/news", get(handle_news))
        .route("/api/v1/internships", get(handle_internships))
        // History
        .route("/api/v1/analyses", get(handle_list_analyses))
        .route("/api/v1/analyses/:id", get(handle_get_analysis))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
