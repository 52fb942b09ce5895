//! Udemy course suggestions.
//!
//! The LLM runs in JSON mode with the user's search history and starred
//! courses as context. No key, a failed call, or an empty course list all
//! produce three templated courses instead.

use chrono::Utc;
use reqwest::Url;
use serde::Deserialize;
use tracing::{info, warn};

use crate::llm_client::{ChatOptions, LlmClient};
use crate::recommendations::models::{Course, RecommendationRequest, SkillLevel, StarredCourse};
use crate::recommendations::prompts::{
    COURSES_MAX_TOKENS, COURSES_PROMPT_TEMPLATE, COURSES_SYSTEM, COURSES_TEMPERATURE,
};

const UDEMY_SEARCH_URL: &str = "https://www.udemy.com/courses/search/";

#[derive(Debug, Clone)]
pub struct CourseRecommendations {
    pub courses: Vec<Course>,
    pub insights: String,
}

#[derive(Debug, Default, Deserialize)]
struct LlmCourses {
    #[serde(default)]
    courses: Vec<Course>,
    #[serde(default)]
    insights: String,
}

pub async fn recommend_courses(
    llm: Option<&LlmClient>,
    request: &RecommendationRequest,
) -> CourseRecommendations {
    let topic = request.topic.trim();
    let Some(llm) = llm else {
        info!("No LLM configured, using fallback course recommendations");
        return fallback_recommendations(topic, request.skill_level);
    };

    let prompt = build_prompt(
        topic,
        request.skill_level,
        &request.history,
        &request.starred_courses,
    );
    let options = ChatOptions {
        temperature: COURSES_TEMPERATURE,
        max_tokens: COURSES_MAX_TOKENS,
        json_mode: true,
    };

    match llm
        .call_json::<LlmCourses>(&prompt, COURSES_SYSTEM, options)
        .await
    {
        Ok(parsed) if !parsed.courses.is_empty() => CourseRecommendations {
            courses: parsed.courses,
            insights: parsed.insights,
        },
        Ok(_) => {
            warn!("LLM returned no courses for \"{topic}\", using fallback");
            fallback_recommendations(topic, request.skill_level)
        }
        Err(e) => {
            warn!("Course recommendation call failed, using fallback: {e}");
            fallback_recommendations(topic, request.skill_level)
        }
    }
}

pub fn udemy_search_url(topic: &str) -> String {
    Url::parse_with_params(UDEMY_SEARCH_URL, &[("q", topic)])
        .map(String::from)
        .unwrap_or_else(|_| UDEMY_SEARCH_URL.to_string())
}

fn build_prompt(
    topic: &str,
    level: SkillLevel,
    history: &[String],
    starred: &[StarredCourse],
) -> String {
    let mut context = Vec::new();
    if !history.is_empty() {
        context.push(format!(
            "The user has recently searched for: {}.",
            history.join(", ")
        ));
    }
    let starred_titles: Vec<&str> = starred
        .iter()
        .map(|c| c.title.as_str())
        .filter(|t| !t.is_empty())
        .collect();
    if !starred_titles.is_empty() {
        context.push(format!(
            "The user has starred courses related to: {}.",
            starred_titles.join(", ")
        ));
    }

    COURSES_PROMPT_TEMPLATE
        .replace("{topic}", topic)
        .replace("{level}", level.as_str())
        .replace("{context}", &context.join("\n"))
        .replace("{search_url}", &udemy_search_url(topic))
}

pub fn fallback_recommendations(topic: &str, level: SkillLevel) -> CourseRecommendations {
    let stamp = Utc::now().timestamp_millis();
    let url = udemy_search_url(topic);
    let level_name = level.as_str();

    let course = |n: u32, title: String, description: String, instructor: &str, rating: f64| {
        Course {
            id: format!("course-{stamp}-{n}"),
            title,
            description,
            instructor: instructor.to_string(),
            level: level_name.to_string(),
            url: url.clone(),
            rating,
            is_ai_generated: true,
        }
    };

    let courses = vec![
        course(
            1,
            format!("Complete {topic} Masterclass for {}s", level.title()),
            format!("Learn {topic} from scratch with hands-on projects and real-world examples. Perfect for {level_name} level learners."),
            "Industry Expert",
            4.5,
        ),
        course(
            2,
            format!("{topic} Fundamentals: From Zero to Hero"),
            format!("Master the core concepts of {topic} with step-by-step guidance and practical exercises designed for {level_name} learners."),
            "Senior Developer",
            4.6,
        ),
        course(
            3,
            format!("Advanced {topic} Techniques and Best Practices"),
            format!("Deep dive into {topic} with advanced techniques, design patterns, and industry best practices for {level_name} developers."),
            "Tech Lead",
            4.7,
        ),
    ];

    CourseRecommendations {
        courses,
        insights: format!(
            "Based on your interest in {topic} at {level_name} level, these courses will help you build strong foundations and practical skills. Start with the fundamentals and progress through hands-on projects."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn request(topic: &str) -> RecommendationRequest {
        RecommendationRequest {
            topic: topic.to_string(),
            skill_level: SkillLevel::Intermediate,
            history: vec!["Docker".to_string()],
            starred_courses: vec![StarredCourse {
                title: "Kubernetes for Developers".to_string(),
            }],
        }
    }

    #[test]
    fn test_fallback_has_three_templated_courses() {
        let recs = fallback_recommendations("Rust", SkillLevel::Beginner);
        assert_eq!(recs.courses.len(), 3);
        assert_eq!(recs.courses[0].title, "Complete Rust Masterclass for Beginners");
        assert!(recs.courses.iter().all(|c| c.level == "beginner" && c.is_ai_generated));
        assert!(recs.insights.contains("Rust at beginner level"));
    }

    #[test]
    fn test_udemy_url_is_encoded() {
        let url = udemy_search_url("C# & .NET");
        assert!(url.starts_with("https://www.udemy.com/courses/search/?q="));
        assert!(!url.contains(' '));
        assert!(url.contains("%23"));
    }

    #[test]
    fn test_prompt_includes_history_and_starred() {
        let req = request("Go");
        let prompt = build_prompt("Go", req.skill_level, &req.history, &req.starred_courses);
        assert!(prompt.contains("recently searched for: Docker."));
        assert!(prompt.contains("starred courses related to: Kubernetes for Developers."));
        assert!(prompt.contains("\"level\": \"intermediate\""));
        assert!(!prompt.contains("{topic}"));
    }

    #[test]
    fn test_llm_course_payload_tolerates_missing_fields() {
        let parsed: LlmCourses =
            serde_json::from_str(r#"{"courses": [{"title": "Rust Bootcamp"}]}"#).unwrap();
        assert_eq!(parsed.courses[0].title, "Rust Bootcamp");
        assert!(parsed.courses[0].is_ai_generated);
        assert!(parsed.insights.is_empty());
    }

    #[tokio::test]
    async fn test_without_llm_uses_fallback() {
        let recs = recommend_courses(None, &request("GraphQL")).await;
        assert_eq!(recs.courses.len(), 3);
        assert!(recs.courses[1].title.starts_with("GraphQL Fundamentals"));
    }

    #[tokio::test]
    async fn test_unreachable_llm_uses_fallback() {
        let llm = LlmClient::new(
            "key".to_string(),
            "http://127.0.0.1:9".to_string(),
            "model".to_string(),
            Duration::from_secs(2),
        )
        .unwrap();
        let recs = recommend_courses(Some(&llm), &request("GraphQL")).await;
        assert_eq!(recs.courses.len(), 3);
    }
}
