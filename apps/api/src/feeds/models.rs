use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_NEWS_TOPIC: &str = "technology";
pub const DEFAULT_INTERNSHIP_QUERY: &str = "software engineering intern";

#[derive(Debug, Deserialize)]
pub struct NewsQuery {
    pub topic: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternshipQuery {
    pub query: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub remote_only: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub title: String,
    pub link: String,
    pub pub_date: Option<String>,
    pub source: String,
    pub thumbnail: Option<String>,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct NewsResponse {
    pub topic: String,
    pub articles: Vec<NewsArticle>,
}

/// JSearch posting. Read in the upstream snake_case, served in camelCase.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Internship {
    #[serde(default)]
    pub job_id: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub employer_name: String,
    pub employer_logo: Option<String>,
    pub job_city: Option<String>,
    pub job_state: Option<String>,
    pub job_country: Option<String>,
    pub job_employment_type: Option<String>,
    pub job_apply_link: Option<String>,
    pub job_description: Option<String>,
    pub job_posted_at_datetime_utc: Option<String>,
    #[serde(default)]
    pub job_is_remote: bool,
}

#[derive(Debug, Serialize)]
pub struct InternshipResponse {
    pub query: String,
    pub internships: Vec<Internship>,
}

// ────────────────────────────────────────────────────────────────────────────
// News payload normalisation
// ────────────────────────────────────────────────────────────────────────────

/// Accepts a bare array, `{data: [...]}` or `{articles: [...]}`.
/// Items without a title or URL are dropped.
pub fn normalize_articles(body: &Value) -> Vec<NewsArticle> {
    let items = body
        .as_array()
        .or_else(|| body.get("data").and_then(Value::as_array))
        .or_else(|| body.get("articles").and_then(Value::as_array));

    items
        .map(|items| items.iter().filter_map(to_article).collect())
        .unwrap_or_default()
}

fn to_article(item: &Value) -> Option<NewsArticle> {
    let title = first_str(item, &["title"])?;
    let link = first_str(item, &["url", "link"])?;
    let source = ["source", "publisher"]
        .iter()
        .find_map(|key| item.get(key).and_then(|v| v.get("name")).and_then(Value::as_str))
        .unwrap_or("News");

    Some(NewsArticle {
        title,
        link,
        pub_date: first_str(item, &["date", "publishedAt", "published_at"]),
        source: source.to_string(),
        thumbnail: first_str(item, &["thumbnail", "image", "urlToImage"]),
        description: first_str(item, &["excerpt", "description"]).unwrap_or_default(),
    })
}

fn first_str(item: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| item.get(key).and_then(Value::as_str))
        .find(|v| !v.trim().is_empty())
        .map(str::to_string)
}

/// Adds "intern" to queries that don't already ask for internships.
pub fn internship_search_term(query: &str) -> String {
    let query = query.trim();
    if query.to_lowercase().contains("intern") {
        query.to_string()
    } else {
        format!("{query} intern")
    }
}
