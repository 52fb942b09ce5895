//! RapidAPI client for the news and JSearch feeds.
//!
//! Same contract as the YouTube search: failures are logged and become an
//! empty list, never an error response.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::feeds::models::{normalize_articles, Internship, NewsArticle};

const FEED_TIMEOUT: Duration = Duration::from_secs(10);
const INTERNSHIP_PAGES: &str = "3";

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("RapidAPI request failed: {0}")]
    Api(u16),

    #[error("Invalid feed URL: {0}")]
    InvalidUrl(String),
}

#[derive(Debug, Deserialize)]
struct JobSearchResponse {
    #[serde(default)]
    data: Vec<Internship>,
}

/// One RapidAPI product: its base URL and the `x-rapidapi-host` it expects.
#[derive(Clone)]
struct Endpoint {
    base_url: String,
    host: String,
}

impl Endpoint {
    fn parse(base_url: &str) -> Result<Self, FeedError> {
        let url = Url::parse(base_url).map_err(|_| FeedError::InvalidUrl(base_url.to_string()))?;
        let host = url
            .host_str()
            .ok_or_else(|| FeedError::InvalidUrl(base_url.to_string()))?
            .to_string();
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            host,
        })
    }
}

#[derive(Clone)]
pub struct RapidApiClient {
    client: Client,
    api_key: String,
    news: Endpoint,
    jobs: Endpoint,
}

impl RapidApiClient {
    pub fn new(api_key: String, news_url: &str, jobs_url: &str) -> Result<Self, FeedError> {
        Ok(Self {
            client: Client::builder().timeout(FEED_TIMEOUT).build()?,
            api_key,
            news: Endpoint::parse(news_url)?,
            jobs: Endpoint::parse(jobs_url)?,
        })
    }

    /// `None` when no RapidAPI key is configured.
    pub fn from_config(config: &Config) -> Result<Option<Self>, FeedError> {
        config
            .rapidapi_key
            .clone()
            .map(|key| Self::new(key, &config.news_api_url, &config.jobs_api_url))
            .transpose()
    }

    fn get(&self, endpoint: &Endpoint, path: &str) -> RequestBuilder {
        self.client
            .get(format!("{}{path}", endpoint.base_url))
            .header("x-rapidapi-host", &endpoint.host)
            .header("x-rapidapi-key", &self.api_key)
    }

    /// Trending English-language articles for `topic`; empty on any error.
    pub async fn trending_news(&self, topic: &str) -> Vec<NewsArticle> {
        match self.fetch_news(topic).await {
            Ok(articles) => {
                info!("Fetched {} news articles for \"{topic}\"", articles.len());
                articles
            }
            Err(e) => {
                warn!("News feed failed for \"{topic}\": {e}");
                Vec::new()
            }
        }
    }

    async fn fetch_news(&self, topic: &str) -> Result<Vec<NewsArticle>, FeedError> {
        let response = self
            .get(&self.news, "/v2/trendings")
            .query(&[("topic", topic), ("language", "en")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Api(status.as_u16()));
        }
        let body: Value = response.json().await?;
        Ok(normalize_articles(&body))
    }

    /// Internship postings for an already-normalised search term; empty on any error.
    pub async fn search_internships(
        &self,
        search_term: &str,
        location: Option<&str>,
        remote_only: bool,
    ) -> Vec<Internship> {
        match self.fetch_internships(search_term, location, remote_only).await {
            Ok(jobs) => {
                info!("Fetched {} internships for \"{search_term}\"", jobs.len());
                jobs
            }
            Err(e) => {
                warn!("Job search failed for \"{search_term}\": {e}");
                Vec::new()
            }
        }
    }

    async fn fetch_internships(
        &self,
        search_term: &str,
        location: Option<&str>,
        remote_only: bool,
    ) -> Result<Vec<Internship>, FeedError> {
        let mut params = vec![
            ("query", search_term),
            ("page", "1"),
            ("num_pages", INTERNSHIP_PAGES),
        ];
        if let Some(location) = location {
            params.push(("location", location));
        }
        if remote_only {
            params.push(("remote_jobs_only", "true"));
        }

        let response = self.get(&self.jobs, "/search").query(&params).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Api(status.as_u16()));
        }
        Ok(response.json::<JobSearchResponse>().await?.data)
    }
}
