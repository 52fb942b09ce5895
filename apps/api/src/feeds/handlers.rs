use axum::{
    extract::{Query, State},
    Json,
};
use tracing::info;

use crate::feeds::models::{
    internship_search_term, InternshipQuery, InternshipResponse, NewsQuery, NewsResponse,
    DEFAULT_INTERNSHIP_QUERY, DEFAULT_NEWS_TOPIC,
};
use crate::state::AppState;

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// GET /api/v1/news?topic=…
pub async fn handle_news(
    State(state): State<AppState>,
    Query(params): Query<NewsQuery>,
) -> Json<NewsResponse> {
    let topic = non_blank(params.topic).unwrap_or_else(|| DEFAULT_NEWS_TOPIC.to_string());

    let articles = match &state.feeds {
        Some(feeds) => feeds.trending_news(&topic).await,
        None => {
            info!("RAPIDAPI_KEY not configured, skipping news feed");
            Vec::new()
        }
    };

    Json(NewsResponse { topic, articles })
}

/// GET /api/v1/internships?query=…&location=…&remoteOnly=…
pub async fn handle_internships(
    State(state): State<AppState>,
    Query(params): Query<InternshipQuery>,
) -> Json<InternshipResponse> {
    let query = internship_search_term(
        &non_blank(params.query).unwrap_or_else(|| DEFAULT_INTERNSHIP_QUERY.to_string()),
    );
    let location = non_blank(params.location);

    let internships = match &state.feeds {
        Some(feeds) => {
            feeds
                .search_internships(&query, location.as_deref(), params.remote_only)
                .await
        }
        None => {
            info!("RAPIDAPI_KEY not configured, skipping internship search");
            Vec::new()
        }
    };

    Json(InternshipResponse { query, internships })
}
