//! Science.gov search source implementation.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::models::{ResultBuilder, ResultKind, SearchResult, SourceName};
use crate::sources::{Source, SourceError};
use crate::utils::HttpClient;

const SCIENCE_GOV_BASE_URL: &str = "https://www.science.gov";

/// Science.gov search source (federal agency research portal)
///
/// Produces `research`-kind results but is registered in the web group:
/// the web selector invokes it alongside the general-web providers. That
/// asymmetry is part of the endpoint's observable contract.
#[derive(Debug, Clone)]
pub struct ScienceGovSource {
    client: Arc<HttpClient>,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ScienceGovResponse {
    #[serde(default)]
    results: Vec<ScienceGovItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ScienceGovItem {
    title: String,
    description: String,
    authors: Vec<String>,
    link: String,
    #[serde(rename = "publicationDate")]
    publication_date: String,
    agency: String,
    #[serde(rename = "contentType")]
    content_type: String,
}

impl ScienceGovSource {
    /// Create a new Science.gov source
    pub fn new(client: Arc<HttpClient>, api_key: String) -> Self {
        Self::with_base_url(client, api_key, SCIENCE_GOV_BASE_URL)
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
impl Source for ScienceGovSource {
    fn id(&self) -> &'static str {
        "science_gov"
    }

    fn name(&self) -> SourceName {
        SourceName::ScienceGov
    }

    fn kind(&self) -> ResultKind {
        ResultKind::Research
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SourceError> {
        let url = format!(
            "{}/api/v1/search?query={}&api_key={}",
            self.base_url,
            urlencoding::encode(query),
            self.api_key
        );

        let response: ScienceGovResponse = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to search Science.gov: {}", e)))?
            .json()
            .await
            .map_err(|e| {
                SourceError::Parse(format!("Failed to parse Science.gov response: {}", e))
            })?;

        let results = response
            .results
            .into_iter()
            .map(|item| {
                ResultBuilder::new(item.link, SourceName::ScienceGov, ResultKind::Research)
                    .title(item.title)
                    .abstract_text(item.description)
                    .authors(item.authors)
                    .published(item.publication_date)
                    .extra("agency", item.agency)
                    .extra("contentType", item.content_type)
                    .build()
            })
            .collect();

        Ok(results)
    }
}
