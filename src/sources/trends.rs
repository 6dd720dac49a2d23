//! Trending-searches fetcher (via SerpAPI's Google Trends engine).

use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::sources::SourceError;
use crate::utils::HttpClient;

const SERPAPI_BASE_URL: &str = "https://serpapi.com";

/// Fetches daily trending searches.
///
/// Unlike the query sources, trend entries are passed through to the
/// response untouched, so this is not a [`Source`](crate::sources::Source).
#[derive(Debug, Clone)]
pub struct TrendFetcher {
    client: Arc<HttpClient>,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct TrendsResponse {
    #[serde(default)]
    daily_trends: Vec<Value>,
}

impl TrendFetcher {
    /// Create a new trend fetcher
    pub fn new(client: Arc<HttpClient>, api_key: String) -> Self {
        Self::with_base_url(client, api_key, SERPAPI_BASE_URL)
    }

    /// Create with a custom SerpAPI base URL (for testing)
    pub fn with_base_url(
        client: Arc<HttpClient>,
        api_key: String,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.into(),
        }
    }

    /// Fetch the current daily trends, verbatim as the upstream returns them.
    pub async fn fetch(&self) -> Result<Vec<Value>, SourceError> {
        let url = format!(
            "{}/search.json?engine=google_trends&api_key={}&data_type=TIMESERIES&geo=US",
            self.base_url, self.api_key
        );

        let response: TrendsResponse = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to fetch trends: {}", e)))?
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to parse trends response: {}", e)))?;

        Ok(response.daily_trends)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_fetch_passes_entries_through_untouched() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search.json")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("engine".into(), "google_trends".into()),
                mockito::Matcher::UrlEncoded("data_type".into(), "TIMESERIES".into()),
                mockito::Matcher::UrlEncoded("geo".into(), "US".into()),
            ]))
            .with_body(
                r#"{"daily_trends":[{"query":"solar eclipse","traffic":"2M+","nested":{"keep":true}}]}"#,
            )
            .create_async()
            .await;

        let fetcher = TrendFetcher::with_base_url(
            Arc::new(HttpClient::new().unwrap()),
            "k".to_string(),
            server.url(),
        );
        let trends = fetcher.fetch().await.unwrap();

        assert_eq!(
            trends,
            vec![json!({"query":"solar eclipse","traffic":"2M+","nested":{"keep":true}})]
        );
    }

    #[tokio::test]
    async fn test_fetch_missing_field_yields_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search.json")
            .match_query(mockito::Matcher::Any)
            .with_body("{}")
            .create_async()
            .await;

        let fetcher = TrendFetcher::with_base_url(
            Arc::new(HttpClient::new().unwrap()),
            "k".to_string(),
            server.url(),
        );
        assert!(fetcher.fetch().await.unwrap().is_empty());
    }
}
