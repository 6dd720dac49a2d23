//! PubMed search source implementation using the NCBI E-utilities API.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::models::{ResultBuilder, ResultKind, SearchResult, SourceName};
use crate::sources::{Source, SourceError};
use crate::utils::HttpClient;

/// E-utilities base URL (esearch + esummary live under the same root)
const EUTILS_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";
/// Public article URL for a PubMed id
const PUBMED_ARTICLE_URL: &str = "https://pubmed.ncbi.nlm.nih.gov";
const PUBMED_MAX_RESULTS: usize = 10;

/// PubMed search source
///
/// Two chained calls: `esearch.fcgi` resolves the query to an id list,
/// `esummary.fcgi` expands those ids into records. Zero ids from the first
/// call short-circuits to an empty contribution without the second call.
#[derive(Debug, Clone)]
pub struct PubMedSource {
    client: Arc<HttpClient>,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ESearchResponse {
    esearchresult: Option<ESearchResult>,
}

#[derive(Debug, Deserialize)]
struct ESearchResult {
    #[serde(default)]
    idlist: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ESummaryResponse {
    #[serde(default)]
    result: serde_json::Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PubMedRecord {
    uid: String,
    title: String,
    #[serde(rename = "abstract")]
    abstract_text: String,
    authors: Vec<PubMedAuthor>,
    pubdate: String,
    fulljournalname: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PubMedAuthor {
    name: String,
}

impl PubMedSource {
    /// Create a new PubMed source
    pub fn new(client: Arc<HttpClient>, api_key: String) -> Self {
        Self::with_base_url(client, api_key, EUTILS_BASE_URL)
    }

    /// Create with a custom E-utilities base URL (for testing)
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

    async fn fetch_ids(&self, query: &str) -> Result<Vec<String>, SourceError> {
        let url = format!(
            "{}/esearch.fcgi?db=pubmed&term={}&retmax={}&retmode=json&api_key={}",
            self.base_url,
            urlencoding::encode(query),
            PUBMED_MAX_RESULTS,
            self.api_key
        );

        let response: ESearchResponse = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to search PubMed: {}", e)))?
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to parse PubMed search: {}", e)))?;

        Ok(response.esearchresult.map(|r| r.idlist).unwrap_or_default())
    }

    async fn fetch_summaries(&self, ids: &[String]) -> Result<Vec<SearchResult>, SourceError> {
        let url = format!(
            "{}/esummary.fcgi?db=pubmed&id={}&retmode=json&api_key={}",
            self.base_url,
            ids.join(","),
            self.api_key
        );

        let response: ESummaryResponse = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to fetch PubMed summaries: {}", e)))?
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to parse PubMed summaries: {}", e)))?;

        // The summary result object is keyed by uid, with a sibling "uids"
        // index entry that has to be skipped.
        let results = response
            .result
            .into_iter()
            .filter(|(key, _)| key != "uids")
            .filter_map(|(_, value)| serde_json::from_value::<PubMedRecord>(value).ok())
            .filter(|record| !record.uid.is_empty())
            .map(|record| {
                ResultBuilder::new(
                    format!("{}/{}/", PUBMED_ARTICLE_URL, record.uid),
                    SourceName::PubMed,
                    ResultKind::Research,
                )
                .title(record.title)
                .abstract_text(record.abstract_text)
                .authors(record.authors.into_iter().map(|a| a.name).collect())
                .published(record.pubdate)
                .extra("journal", record.fulljournalname)
                .extra("pmid", record.uid)
                .build()
            })
            .collect();

        Ok(results)
    }
}

#[async_trait]
impl Source for PubMedSource {
    fn id(&self) -> &'static str {
        "pubmed"
    }

    fn name(&self) -> SourceName {
        SourceName::PubMed
    }

    fn kind(&self) -> ResultKind {
        ResultKind::Research
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SourceError> {
        let ids = self.fetch_ids(query).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.fetch_summaries(&ids).await
    }
}
