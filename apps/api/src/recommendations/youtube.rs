//! YouTube Data API v3 video search.
//!
//! Failures never reach the caller: every error is logged and yields an empty list.

use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::gap::rules::GENERIC_SKILL_PATTERNS;
use crate::recommendations::models::{SkillLevel, YoutubeVideo};

const SEARCH_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_RESULTS: &str = "10";

#[derive(Debug, Error)]
pub enum YoutubeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("YouTube API request failed: {0}")]
    Api(u16),
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: ItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    channel_title: String,
    #[serde(default)]
    published_at: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    high: Option<Thumbnail>,
    medium: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

impl Thumbnails {
    fn best_url(&self) -> Option<String> {
        [&self.high, &self.medium, &self.default]
            .into_iter()
            .flatten()
            .next()
            .map(|t| t.url.clone())
    }
}

#[derive(Clone)]
pub struct YoutubeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl YoutubeClient {
    pub fn new(api_key: String, base_url: &str) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(SEARCH_TIMEOUT).build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `None` when no API key is configured.
    pub fn from_config(config: &Config) -> Result<Option<Self>, reqwest::Error> {
        config
            .youtube_api_key
            .clone()
            .map(|key| Self::new(key, &config.youtube_api_url))
            .transpose()
    }

    /// Up to 10 videos for `topic` at `level`; empty on generic topics or any error.
    pub async fn search_videos(&self, topic: &str, level: SkillLevel) -> Vec<YoutubeVideo> {
        if is_generic_topic(topic) {
            warn!("Generic topic detected: \"{topic}\" - skipping YouTube search");
            return Vec::new();
        }

        let query = build_search_query(topic, level);
        match self.search(&query).await {
            Ok(videos) => {
                info!("Found {} YouTube videos for \"{query}\"", videos.len());
                videos
            }
            Err(e) => {
                warn!("YouTube search failed for \"{query}\": {e}");
                Vec::new()
            }
        }
    }

    async fn search(&self, query: &str) -> Result<Vec<YoutubeVideo>, YoutubeError> {
        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("maxResults", MAX_RESULTS),
                ("order", "relevance"),
                ("videoDuration", "medium"),
                ("videoEmbeddable", "true"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(YoutubeError::Api(status.as_u16()));
        }

        let body: SearchResponse = response.json().await?;
        Ok(body.items.into_iter().filter_map(to_video).collect())
    }
}

fn to_video(item: SearchItem) -> Option<YoutubeVideo> {
    let id = item.id.video_id?;
    Some(YoutubeVideo {
        url: format!("https://www.youtube.com/watch?v={id}"),
        thumbnail: item.snippet.thumbnails.best_url(),
        id,
        title: item.snippet.title,
        description: item.snippet.description,
        channel_title: item.snippet.channel_title,
        published_at: item.snippet.published_at,
    })
}

pub fn is_generic_topic(topic: &str) -> bool {
    let lower = topic.to_lowercase();
    GENERIC_SKILL_PATTERNS.iter().any(|term| lower.contains(term))
}

fn level_prefix(level: SkillLevel) -> &'static str {
    match level {
        SkillLevel::Beginner => "tutorial for beginners",
        SkillLevel::Intermediate => "intermediate guide",
        SkillLevel::Advanced => "advanced concepts",
    }
}

/// Drops filler words that drag in unrelated results, then appends the level phrase.
pub fn build_search_query(topic: &str, level: SkillLevel) -> String {
    static FILLER: OnceLock<Regex> = OnceLock::new();
    let filler = FILLER.get_or_init(|| {
        Regex::new(r"(?i)\b(advanced|technical|skills?|development|practices?)\b")
            .expect("static pattern is valid")
    });

    let cleaned = filler.replace_all(topic, "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        format!("{} programming tutorial", topic.trim())
    } else {
        format!("{cleaned} {} tutorial course", level_prefix(level))
    }
}
