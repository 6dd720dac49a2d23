//! Reddit search source implementation.
//!
//! Reddit requires an OAuth2 client-credentials token before the search
//! API can be called, so every search is a two-step exchange.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::models::{ResultBuilder, ResultKind, SearchResult, SourceName};
use crate::sources::{Source, SourceError};
use crate::utils::{short_date_from_unix, HttpClient};

const REDDIT_AUTH_BASE_URL: &str = "https://www.reddit.com";
const REDDIT_API_BASE_URL: &str = "https://oauth.reddit.com";
const REDDIT_LINK_PREFIX: &str = "https://reddit.com";
const REDDIT_USER_AGENT: &str = "ExusResearch/1.0";
const REDDIT_MAX_RESULTS: usize = 10;

/// Reddit search source
#[derive(Debug, Clone)]
pub struct RedditSource {
    client: Arc<HttpClient>,
    client_id: String,
    client_secret: String,
    auth_base_url: String,
    api_base_url: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct ListingResponse {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<ListingChild>,
}

#[derive(Debug, Deserialize)]
struct ListingChild {
    data: RedditPost,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RedditPost {
    title: String,
    selftext: String,
    author: String,
    permalink: String,
    created_utc: f64,
    subreddit_name_prefixed: String,
    score: i64,
    num_comments: u64,
}

impl RedditSource {
    /// Create a new Reddit source
    pub fn new(client: Arc<HttpClient>, client_id: String, client_secret: String) -> Self {
        Self::with_base_urls(
            client,
            client_id,
            client_secret,
            REDDIT_AUTH_BASE_URL,
            REDDIT_API_BASE_URL,
        )
    }

    /// Create with custom auth and API base URLs (for testing)
    pub fn with_base_urls(
        client: Arc<HttpClient>,
        client_id: String,
        client_secret: String,
        auth_base_url: impl Into<String>,
        api_base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            client_id,
            client_secret,
            auth_base_url: auth_base_url.into(),
            api_base_url: api_base_url.into(),
        }
    }

    async fn fetch_token(&self) -> Result<String, SourceError> {
        let url = format!("{}/api/v1/access_token", self.auth_base_url);
        let response: TokenResponse = self
            .client
            .post(&url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body("grant_type=client_credentials")
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to get Reddit token: {}", e)))?
            .json()
            .await
            .map_err(|e| {
                SourceError::Parse(format!("Failed to parse Reddit token response: {}", e))
            })?;
        Ok(response.access_token)
    }

    fn map_post(post: RedditPost) -> SearchResult {
        let url = format!("{}{}", REDDIT_LINK_PREFIX, post.permalink);
        ResultBuilder::new(url, SourceName::Reddit, ResultKind::Web)
            .title(post.title)
            .abstract_text(post.selftext)
            .authors(vec![post.author])
            .published(short_date_from_unix(post.created_utc as i64))
            .extra("subreddit", post.subreddit_name_prefixed)
            .extra("score", post.score)
            .extra("comments", post.num_comments)
            .build()
    }
}

#[async_trait]
impl Source for RedditSource {
    fn id(&self) -> &'static str {
        "reddit"
    }

    fn name(&self) -> SourceName {
        SourceName::Reddit
    }

    fn kind(&self) -> ResultKind {
        ResultKind::Web
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SourceError> {
        let token = self.fetch_token().await?;

        let url = format!(
            "{}/search?q={}&type=link&sort=relevance&limit={}",
            self.api_base_url,
            urlencoding::encode(query),
            REDDIT_MAX_RESULTS
        );

        let response: ListingResponse = self
            .client
            .get(&url)
            .bearer_auth(&token)
            .header("User-Agent", REDDIT_USER_AGENT)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to search Reddit: {}", e)))?
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to parse Reddit response: {}", e)))?;

        Ok(response
            .data
            .children
            .into_iter()
            .map(|child| Self::map_post(child.data))
            .collect())
    }
}
