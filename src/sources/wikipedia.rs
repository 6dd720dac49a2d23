//! Wikipedia search source implementation (MediaWiki action API).

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::models::{ResultBuilder, ResultKind, SearchResult, SourceName};
use crate::sources::{Source, SourceError};
use crate::utils::HttpClient;

const WIKIPEDIA_BASE_URL: &str = "https://en.wikipedia.org";
/// Fallback page URL prefix when the API omits `fullurl`
const WIKIPEDIA_PAGE_URL: &str = "https://en.wikipedia.org/wiki";
const WIKIPEDIA_MAX_RESULTS: usize = 10;
const CATEGORY_PREFIX: &str = "Category:";

/// Wikipedia search source
///
/// Two chained calls: a title search resolving page ids, then a content
/// request for intro extracts, canonical URLs and categories of those pages.
#[derive(Debug, Clone)]
pub struct WikipediaSource {
    client: Arc<HttpClient>,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct WikiSearchResponse {
    query: Option<WikiSearchQuery>,
}

#[derive(Debug, Deserialize)]
struct WikiSearchQuery {
    #[serde(default)]
    search: Vec<WikiSearchHit>,
}

#[derive(Debug, Deserialize)]
struct WikiSearchHit {
    pageid: u64,
}

#[derive(Debug, Deserialize)]
struct WikiContentResponse {
    query: Option<WikiContentQuery>,
}

#[derive(Debug, Deserialize)]
struct WikiContentQuery {
    #[serde(default)]
    pages: serde_json::Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WikiPage {
    title: String,
    extract: String,
    fullurl: String,
    categories: Vec<WikiCategory>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WikiCategory {
    title: String,
}

impl WikipediaSource {
    /// Create a new Wikipedia source
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self::with_base_url(client, WIKIPEDIA_BASE_URL)
    }

    /// Create with a custom base URL (for testing)
    pub fn with_base_url(client: Arc<HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn search_page_ids(&self, query: &str) -> Result<Vec<u64>, SourceError> {
        let url = format!(
            "{}/w/api.php?action=query&format=json&list=search&srsearch={}&srlimit={}&origin=*",
            self.base_url,
            urlencoding::encode(query),
            WIKIPEDIA_MAX_RESULTS
        );

        let response: WikiSearchResponse = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to search Wikipedia: {}", e)))?
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to parse Wikipedia search: {}", e)))?;

        Ok(response
            .query
            .map(|q| q.search.into_iter().map(|hit| hit.pageid).collect())
            .unwrap_or_default())
    }

    async fn fetch_pages(&self, page_ids: &[u64]) -> Result<Vec<SearchResult>, SourceError> {
        let ids = page_ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join("|");
        let url = format!(
            "{}/w/api.php?action=query&format=json&pageids={}&prop=extracts%7Cinfo%7Ccategories%7Clinks&exintro=1&explaintext=1&inprop=url&cllimit=5&pllimit=5&origin=*",
            self.base_url,
            urlencoding::encode(&ids)
        );

        let response: WikiContentResponse = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to fetch Wikipedia pages: {}", e)))?
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to parse Wikipedia pages: {}", e)))?;

        let results = response
            .query
            .map(|q| q.pages)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(_, value)| serde_json::from_value::<WikiPage>(value).ok())
            .map(|page| {
                let url = if page.fullurl.is_empty() {
                    format!(
                        "{}/{}",
                        WIKIPEDIA_PAGE_URL,
                        urlencoding::encode(&page.title)
                    )
                } else {
                    page.fullurl
                };
                let categories: Vec<String> = page
                    .categories
                    .into_iter()
                    .map(|c| {
                        c.title
                            .strip_prefix(CATEGORY_PREFIX)
                            .unwrap_or(&c.title)
                            .to_string()
                    })
                    .collect();

                ResultBuilder::new(url, SourceName::Wikipedia, ResultKind::Web)
                    .title(page.title)
                    .abstract_text(page.extract)
                    .extra("categories", categories)
                    .build()
            })
            .collect();

        Ok(results)
    }
}

#[async_trait]
impl Source for WikipediaSource {
    fn id(&self) -> &'static str {
        "wikipedia"
    }

    fn name(&self) -> SourceName {
        SourceName::Wikipedia
    }

    fn kind(&self) -> ResultKind {
        ResultKind::Web
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SourceError> {
        let page_ids = self.search_page_ids(query).await?;
        if page_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.fetch_pages(&page_ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(base_url: String) -> WikipediaSource {
        WikipediaSource::with_base_url(Arc::new(HttpClient::new().unwrap()), base_url)
    }

    #[tokio::test]
    async fn test_two_step_search_strips_category_prefix() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/w/api.php")
            .match_query(mockito::Matcher::UrlEncoded("list".into(), "search".into()))
            .with_body(r#"{"query":{"search":[{"pageid":42},{"pageid":7}]}}"#)
            .create_async()
            .await;
        let content_mock = server
            .mock("GET", "/w/api.php")
            .match_query(mockito::Matcher::UrlEncoded("pageids".into(), "42|7".into()))
            .with_body(
                r#"{"query":{"pages":{
                    "42":{"title":"Turing machine","extract":"An abstract machine.",
                          "fullurl":"https://en.wikipedia.org/wiki/Turing_machine",
                          "categories":[{"title":"Category:Models of computation"}]},
                    "7":{"title":"Lambda calculus","extract":"A formal system."}
                }}}"#,
            )
            .create_async()
            .await;

        let results = source(server.url()).search("computation").await.unwrap();
        content_mock.assert_async().await;
        assert_eq!(results.len(), 2);

        let turing = results.iter().find(|r| r.title == "Turing machine").unwrap();
        assert_eq!(turing.url, "https://en.wikipedia.org/wiki/Turing_machine");
        assert_eq!(
            turing.extra["categories"],
            serde_json::json!(["Models of computation"])
        );
        assert!(turing.authors.is_empty());
        assert_eq!(turing.published, "");
        assert_eq!(turing.kind, ResultKind::Web);

        // Page without fullurl falls back to a constructed link.
        let lambda = results.iter().find(|r| r.title == "Lambda calculus").unwrap();
        assert_eq!(
            lambda.url,
            "https://en.wikipedia.org/wiki/Lambda%20calculus"
        );
    }

    #[tokio::test]
    async fn test_no_hits_skips_content_call() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/w/api.php")
            .match_query(mockito::Matcher::UrlEncoded("list".into(), "search".into()))
            .with_body(r#"{"query":{"search":[]}}"#)
            .create_async()
            .await;
        let content_mock = server
            .mock("GET", "/w/api.php")
            .match_query(mockito::Matcher::UrlEncoded("exintro".into(), "1".into()))
            .expect(0)
            .create_async()
            .await;

        let results = source(server.url()).search("zzz").await.unwrap();
        assert!(results.is_empty());
        content_mock.assert_async().await;
    }
}
