//! JSTOR search source implementation.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::models::{ResultBuilder, ResultKind, SearchResult, SourceName};
use crate::sources::{Source, SourceError};
use crate::utils::HttpClient;

const JSTOR_BASE_URL: &str = "https://www.jstor.org";
const JSTOR_MAX_RESULTS: usize = 10;

/// JSTOR search source (stable-URL journal archive)
#[derive(Debug, Clone)]
pub struct JstorSource {
    client: Arc<HttpClient>,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct JstorResponse {
    #[serde(default)]
    items: Vec<JstorItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct JstorItem {
    title: String,
    #[serde(rename = "abstract")]
    abstract_text: String,
    authors: Vec<JstorAuthor>,
    #[serde(rename = "stableUrl")]
    stable_url: String,
    #[serde(rename = "publicationDate")]
    publication_date: String,
    journal: Option<JstorJournal>,
    publisher: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct JstorAuthor {
    name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct JstorJournal {
    name: String,
}

impl JstorSource {
    /// Create a new JSTOR source
    pub fn new(client: Arc<HttpClient>, api_key: String) -> Self {
        Self::with_base_url(client, api_key, JSTOR_BASE_URL)
    }

    /// Create with a custom base URL (for testing)
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
}

#[async_trait]
impl Source for JstorSource {
    fn id(&self) -> &'static str {
        "jstor"
    }

    fn name(&self) -> SourceName {
        SourceName::Jstor
    }

    fn kind(&self) -> ResultKind {
        ResultKind::Web
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SourceError> {
        let url = format!(
            "{}/api/search-results?Query={}&limit={}&apikey={}",
            self.base_url,
            urlencoding::encode(query),
            JSTOR_MAX_RESULTS,
            self.api_key
        );

        let response: JstorResponse = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to search JSTOR: {}", e)))?
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to parse JSTOR response: {}", e)))?;

        let results = response
            .items
            .into_iter()
            .map(|item| {
                ResultBuilder::new(item.stable_url, SourceName::Jstor, ResultKind::Web)
                    .title(item.title)
                    .abstract_text(item.abstract_text)
                    .authors(item.authors.into_iter().map(|a| a.name).collect())
                    .published(item.publication_date)
                    .extra("journal", item.journal.unwrap_or_default().name)
                    .extra("publisher", item.publisher)
                    .build()
            })
            .collect();

        Ok(results)
    }
}
