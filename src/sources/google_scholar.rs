//! Google Scholar search source implementation (via SerpAPI).

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::models::{ResultBuilder, ResultKind, SearchResult, SourceName};
use crate::sources::{Source, SourceError};
use crate::utils::HttpClient;

const SERPAPI_BASE_URL: &str = "https://serpapi.com";
const SCHOLAR_MAX_RESULTS: usize = 10;

/// Google Scholar search source
///
/// Scholar has no public API; results come through SerpAPI's
/// `google_scholar` engine.
#[derive(Debug, Clone)]
pub struct GoogleScholarSource {
    client: Arc<HttpClient>,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ScholarResponse {
    #[serde(default)]
    organic_results: Vec<ScholarResult>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ScholarResult {
    title: String,
    snippet: Option<String>,
    link: String,
    publication_info: Option<PublicationInfo>,
    inline_links: Option<InlineLinks>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PublicationInfo {
    summary: Option<String>,
    year: Option<Value>,
    venue: Option<String>,
    authors: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct InlineLinks {
    cited_by: Option<CitedBy>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CitedBy {
    total: u32,
}

impl GoogleScholarSource {
    /// Create a new Google Scholar source
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

    fn map_result(result: ScholarResult) -> SearchResult {
        let info = result.publication_info.unwrap_or_default();
        let abstract_text = result
            .snippet
            .or(info.summary)
            .unwrap_or_default();
        let authors = info.authors.into_iter().filter_map(author_name).collect();
        let published = info.year.map(value_to_string).unwrap_or_default();
        let citations = result
            .inline_links
            .and_then(|links| links.cited_by)
            .map(|c| c.total)
            .unwrap_or(0);

        ResultBuilder::new(result.link, SourceName::GoogleScholar, ResultKind::Web)
            .title(result.title)
            .abstract_text(abstract_text)
            .authors(authors)
            .published(published)
            .citations(citations)
            .extra("venue", info.venue.unwrap_or_default())
            .build()
    }
}

/// SerpAPI has served authors both as plain strings and as `{name: ...}`
/// objects; accept either.
fn author_name(value: Value) -> Option<String> {
    match value {
        Value::String(name) => Some(name.trim().to_string()),
        Value::Object(mut fields) => match fields.remove("name") {
            Some(Value::String(name)) => Some(name.trim().to_string()),
            _ => None,
        },
        _ => None,
    }
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl Source for GoogleScholarSource {
    fn id(&self) -> &'static str {
        "google_scholar"
    }

    fn name(&self) -> SourceName {
        SourceName::GoogleScholar
    }

    fn kind(&self) -> ResultKind {
        ResultKind::Web
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SourceError> {
        let url = format!(
            "{}/search.json?engine=google_scholar&q={}&api_key={}&num={}",
            self.base_url,
            urlencoding::encode(query),
            self.api_key,
            SCHOLAR_MAX_RESULTS
        );

        let response: ScholarResponse = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to search Google Scholar: {}", e)))?
            .json()
            .await
            .map_err(|e| {
                SourceError::Parse(format!("Failed to parse Google Scholar response: {}", e))
            })?;

        Ok(response
            .organic_results
            .into_iter()
            .map(Self::map_result)
            .collect())
    }
}
