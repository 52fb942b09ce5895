use axum::{extract::State, Json};
use tracing::info;

use crate::errors::AppError;
use crate::recommendations::courses::recommend_courses;
use crate::recommendations::models::{RecommendationRequest, RecommendationResponse};
use crate::state::AppState;

/// POST /api/v1/recommendations
///
/// Videos and courses are fetched concurrently; neither failure fails the request.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let topic = request.topic.trim();
    if topic.is_empty() {
        return Err(AppError::Validation("Topic is required".to_string()));
    }
    info!(
        "Fetching recommendations for topic: \"{topic}\" at {} level",
        request.skill_level.as_str()
    );

    let videos = async {
        match &state.youtube {
            Some(youtube) => youtube.search_videos(topic, request.skill_level).await,
            None => {
                info!("YouTube API key not configured, skipping video search");
                Vec::new()
            }
        }
    };
    let courses = recommend_courses(state.llm.as_ref(), &request);
    let (youtube_videos, courses) = tokio::join!(videos, courses);

    info!(
        "Recommendations fetched: {} YouTube videos, {} Udemy courses",
        youtube_videos.len(),
        courses.courses.len()
    );

    Ok(Json(RecommendationResponse {
        youtube_videos,
        udemy_courses: courses.courses,
        ai_insights: courses.insights,
    }))
}
