//! Digital Commons Network search source implementation.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::models::{ResultBuilder, ResultKind, SearchResult, SourceName};
use crate::sources::{Source, SourceError};
use crate::utils::HttpClient;

const DIGITAL_COMMONS_BASE_URL: &str = "https://network.bepress.com";

/// Digital Commons Network search source (institutional repository network)
#[derive(Debug, Clone)]
pub struct DigitalCommonsSource {
    client: Arc<HttpClient>,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct DigitalCommonsResponse {
    #[serde(default)]
    results: Vec<DigitalCommonsItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DigitalCommonsItem {
    title: String,
    description: String,
    authors: Vec<String>,
    url: String,
    published_date: String,
    institution: String,
    download_count: u64,
}

impl DigitalCommonsSource {
    /// Create a new Digital Commons source
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self::with_base_url(client, DIGITAL_COMMONS_BASE_URL)
    }

    /// Create with a custom base URL (for testing)
    pub fn with_base_url(client: Arc<HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Source for DigitalCommonsSource {
    fn id(&self) -> &'static str {
        "digital_commons"
    }

    fn name(&self) -> SourceName {
        SourceName::DigitalCommons
    }

    fn kind(&self) -> ResultKind {
        ResultKind::Web
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SourceError> {
        let url = format!(
            "{}/api/search/articles?q={}",
            self.base_url,
            urlencoding::encode(query)
        );

        let response: DigitalCommonsResponse = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to search Digital Commons: {}", e)))?
            .json()
            .await
            .map_err(|e| {
                SourceError::Parse(format!("Failed to parse Digital Commons response: {}", e))
            })?;

        let results = response
            .results
            .into_iter()
            .map(|item| {
                ResultBuilder::new(item.url, SourceName::DigitalCommons, ResultKind::Web)
                    .title(item.title)
                    .abstract_text(item.description)
                    .authors(item.authors)
                    .published(item.published_date)
                    .extra("institution", item.institution)
                    .extra("downloads", item.download_count)
                    .build()
            })
            .collect();

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_search_maps_fields() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/search/articles")
            .match_query(mockito::Matcher::UrlEncoded("q".into(), "ethics".into()))
            .with_body(
                r#"{"results":[{
                    "title":"Ethics of AI",
                    "description":"A thesis.",
                    "authors":["Student A"],
                    "url":"https://repo.example.edu/1",
                    "published_date":"2022-06-01",
                    "institution":"Example University",
                    "download_count":321
                }]}"#,
            )
            .create_async()
            .await;

        let source = DigitalCommonsSource::with_base_url(
            Arc::new(HttpClient::new().unwrap()),
            server.url(),
        );
        let results = source.search("ethics").await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].extra["institution"], "Example University");
        assert_eq!(results[0].extra["downloads"], 321);
        assert_eq!(results[0].kind, ResultKind::Web);
    }
}
