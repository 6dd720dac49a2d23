//! Library of Congress search source implementation.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::models::{ResultBuilder, ResultKind, SearchResult, SourceName};
use crate::sources::{Source, SourceError};
use crate::utils::HttpClient;

const LOC_BASE_URL: &str = "https://www.loc.gov";
const LOC_MAX_RESULTS: usize = 10;

/// Library of Congress search source
///
/// Unlike the other keyed providers, the `api_key` parameter is only
/// appended when a key is actually configured.
#[derive(Debug, Clone)]
pub struct LibraryOfCongressSource {
    client: Arc<HttpClient>,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct LocResponse {
    #[serde(default)]
    results: Vec<LocItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LocItem {
    title: String,
    description: Vec<String>,
    contributors: Vec<Value>,
    url: String,
    date: String,
    original_format: Vec<String>,
    subject: Vec<String>,
}

impl LibraryOfCongressSource {
    /// Create a new Library of Congress source
    pub fn new(client: Arc<HttpClient>, api_key: String) -> Self {
        Self::with_base_url(client, api_key, LOC_BASE_URL)
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

    fn map_item(item: LocItem) -> SearchResult {
        let authors = item
            .contributors
            .into_iter()
            .filter_map(contributor_name)
            .collect();

        ResultBuilder::new(item.url, SourceName::LibraryOfCongress, ResultKind::Research)
            .title(item.title)
            .abstract_text(item.description.into_iter().next().unwrap_or_default())
            .authors(authors)
            .published(item.date)
            .extra(
                "format",
                item.original_format.into_iter().next().unwrap_or_default(),
            )
            .extra("subjects", item.subject)
            .build()
    }
}

/// Contributors arrive either as bare strings or as `{name: ...}` objects
/// depending on the collection.
fn contributor_name(value: Value) -> Option<String> {
    match value {
        Value::String(name) => Some(name),
        Value::Object(mut fields) => match fields.remove("name") {
            Some(Value::String(name)) => Some(name),
            _ => None,
        },
        _ => None,
    }
}

#[async_trait]
impl Source for LibraryOfCongressSource {
    fn id(&self) -> &'static str {
        "loc"
    }

    fn name(&self) -> SourceName {
        SourceName::LibraryOfCongress
    }

    fn kind(&self) -> ResultKind {
        ResultKind::Research
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SourceError> {
        let mut url = format!(
            "{}/search/?q={}&fo=json&c={}",
            self.base_url,
            urlencoding::encode(query),
            LOC_MAX_RESULTS
        );
        if !self.api_key.is_empty() {
            url.push_str(&format!("&api_key={}", self.api_key));
        }

        let response: LocResponse = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to search LOC: {}", e)))?
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to parse LOC response: {}", e)))?;

        Ok(response.results.into_iter().map(Self::map_item).collect())
    }
}
