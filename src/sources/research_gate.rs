//! ResearchGate search source implementation.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::models::{ResultBuilder, ResultKind, SearchResult, SourceName};
use crate::sources::{Source, SourceError};
use crate::utils::HttpClient;

const RESEARCHGATE_BASE_URL: &str = "https://www.researchgate.net";
/// Publication pages are addressed relative to the site root
const RESEARCHGATE_SITE_URL: &str = "https://www.researchgate.net";

/// ResearchGate search source
#[derive(Debug, Clone)]
pub struct ResearchGateSource {
    client: Arc<HttpClient>,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ResearchGateResponse {
    #[serde(default)]
    items: Vec<ResearchGateItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ResearchGateItem {
    title: String,
    #[serde(rename = "abstract")]
    abstract_text: String,
    authors: Vec<ResearchGateAuthor>,
    path: String,
    #[serde(rename = "publishedDate")]
    published_date: String,
    #[serde(rename = "citationCount")]
    citation_count: u32,
    #[serde(rename = "readCount")]
    read_count: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ResearchGateAuthor {
    name: String,
}

impl ResearchGateSource {
    /// Create a new ResearchGate source
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self::with_base_url(client, RESEARCHGATE_BASE_URL)
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
impl Source for ResearchGateSource {
    fn id(&self) -> &'static str {
        "research_gate"
    }

    fn name(&self) -> SourceName {
        SourceName::ResearchGate
    }

    fn kind(&self) -> ResultKind {
        ResultKind::Research
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SourceError> {
        let url = format!(
            "{}/api/search?q={}&type=publication",
            self.base_url,
            urlencoding::encode(query)
        );

        let response: ResearchGateResponse = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to search ResearchGate: {}", e)))?
            .json()
            .await
            .map_err(|e| {
                SourceError::Parse(format!("Failed to parse ResearchGate response: {}", e))
            })?;

        let results = response
            .items
            .into_iter()
            .map(|item| {
                ResultBuilder::new(
                    format!("{}{}", RESEARCHGATE_SITE_URL, item.path),
                    SourceName::ResearchGate,
                    ResultKind::Research,
                )
                .title(item.title)
                .abstract_text(item.abstract_text)
                .authors(item.authors.into_iter().map(|a| a.name).collect())
                .published(item.published_date)
                .citations(item.citation_count)
                .extra("reads", item.read_count)
                .build()
            })
            .collect();

        Ok(results)
    }
}
