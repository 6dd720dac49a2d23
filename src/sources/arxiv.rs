//! arXiv search source implementation.
//!
//! arXiv answers with an Atom feed; this adapter deliberately treats it as
//! text, splitting on `<entry>` and regex-extracting the handful of tags the
//! result schema needs. Narrow-format scraping, kept behind the same
//! [`Source`] seam as the JSON providers.

use async_trait::async_trait;
use regex::Regex;
use std::sync::Arc;

use crate::models::{ResultBuilder, ResultKind, SearchResult, SourceName};
use crate::sources::{Source, SourceError};
use crate::utils::{short_date, HttpClient};

/// Base URL for the arXiv query API
const ARXIV_API_URL: &str = "http://export.arxiv.org/api/query";
/// Number of relevance-sorted entries requested per search
const ARXIV_MAX_RESULTS: usize = 10;

/// arXiv search source
#[derive(Debug, Clone)]
pub struct ArxivSource {
    client: Arc<HttpClient>,
    base_url: String,
    title_re: Regex,
    summary_re: Regex,
    author_re: Regex,
    name_re: Regex,
    id_re: Regex,
    published_re: Regex,
}

impl ArxivSource {
    /// Create a new arXiv source
    pub fn new(client: Arc<HttpClient>) -> Result<Self, SourceError> {
        Self::with_base_url(client, ARXIV_API_URL)
    }

    /// Create with a custom API base URL (for testing)
    pub fn with_base_url(
        client: Arc<HttpClient>,
        base_url: impl Into<String>,
    ) -> Result<Self, SourceError> {
        Ok(Self {
            client,
            base_url: base_url.into(),
            title_re: Regex::new(r"(?s)<title>(.*?)</title>")?,
            summary_re: Regex::new(r"(?s)<summary>(.*?)</summary>")?,
            author_re: Regex::new(r"(?s)<author>(.*?)</author>")?,
            name_re: Regex::new(r"<name>(.*?)</name>")?,
            id_re: Regex::new(r"<id>(.*?)</id>")?,
            published_re: Regex::new(r"<published>(.*?)</published>")?,
        })
    }

    fn capture<'t>(&self, re: &Regex, entry: &'t str) -> &'t str {
        re.captures(entry)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .unwrap_or("")
    }

    /// Parse the raw Atom body into results.
    ///
    /// The feed's preamble (before the first `<entry>`) also carries a
    /// `<title>` tag, which is why splitting precedes extraction.
    fn parse_feed(&self, body: &str) -> Vec<SearchResult> {
        body.split("<entry>")
            .skip(1)
            .map(|entry| {
                let title = collapse_whitespace(self.capture(&self.title_re, entry));
                let abstract_text = collapse_whitespace(self.capture(&self.summary_re, entry));
                let authors: Vec<String> = self
                    .author_re
                    .captures_iter(entry)
                    .filter_map(|c| c.get(1))
                    .filter_map(|block| {
                        self.name_re
                            .captures(block.as_str())
                            .and_then(|c| c.get(1))
                            .map(|m| m.as_str().trim().to_string())
                    })
                    .collect();
                let url = self.capture(&self.id_re, entry);
                let published = self.capture(&self.published_re, entry);

                ResultBuilder::new(url, SourceName::Arxiv, ResultKind::Research)
                    .title(title)
                    .abstract_text(abstract_text)
                    .authors(authors)
                    .published(short_date(published))
                    .build()
            })
            .collect()
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[async_trait]
impl Source for ArxivSource {
    fn id(&self) -> &'static str {
        "arxiv"
    }

    fn name(&self) -> SourceName {
        SourceName::Arxiv
    }

    fn kind(&self) -> ResultKind {
        ResultKind::Research
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SourceError> {
        let url = format!(
            "{}?search_query=all:{}&start=0&max_results={}&sortBy=relevance&sortOrder=descending",
            self.base_url,
            urlencoding::encode(query),
            ARXIV_MAX_RESULTS
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to fetch arXiv results: {}", e)))?;

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "arXiv API returned status: {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to read response: {}", e)))?;

        Ok(self.parse_feed(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>ArXiv Query: search_query=all:neural networks</title>
  <entry>
    <id>http://arxiv.org/abs/2301.12345v1</id>
    <title>Neural Networks
        for X</title>
    <summary>  We study neural
        networks applied to X.  </summary>
    <published>2023-01-15T10:00:00Z</published>
    <author><name>Ada Lovelace</name></author>
    <author><name>Alan Turing</name></author>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2302.00001v2</id>
    <title>Another Paper</title>
    <summary>Short summary.</summary>
    <published>2023-02-01T00:00:00Z</published>
    <author><name>Grace Hopper</name></author>
  </entry>
</feed>"#;

    fn source() -> ArxivSource {
        ArxivSource::new(Arc::new(HttpClient::new().unwrap())).unwrap()
    }

    #[test]
    fn test_parse_feed() {
        let results = source().parse_feed(FEED);
        assert_eq!(results.len(), 2);

        let first = &results[0];
        assert_eq!(first.title, "Neural Networks for X");
        assert_eq!(first.abstract_text, "We study neural networks applied to X.");
        assert_eq!(first.authors, vec!["Ada Lovelace", "Alan Turing"]);
        assert_eq!(first.url, "http://arxiv.org/abs/2301.12345v1");
        assert_eq!(first.published, "1/15/2023");
        assert_eq!(first.source, SourceName::Arxiv);
        assert_eq!(first.kind, ResultKind::Research);
    }

    #[test]
    fn test_parse_feed_skips_preamble_title() {
        // The feed-level <title> must not become a result.
        let results = source().parse_feed(FEED);
        assert!(results.iter().all(|r| !r.title.contains("ArXiv Query")));
    }

    #[test]
    fn test_parse_feed_empty_body() {
        assert!(source().parse_feed("").is_empty());
        assert!(source().parse_feed("<feed><title>nothing</title></feed>").is_empty());
    }

    #[test]
    fn test_missing_tags_default_empty() {
        let results = source().parse_feed("<feed><entry><id>http://x</id></entry></feed>");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "");
        assert_eq!(results[0].abstract_text, "");
        assert!(results[0].authors.is_empty());
        assert_eq!(results[0].published, "");
    }

    #[tokio::test]
    async fn test_search_against_mock_server() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(mockito::Matcher::UrlEncoded(
                "search_query".into(),
                "all:neural networks".into(),
            ))
            .with_status(200)
            .with_body(FEED)
            .create_async()
            .await;

        let source =
            ArxivSource::with_base_url(Arc::new(HttpClient::new().unwrap()), server.url()).unwrap();
        let results = source.search("neural networks").await.unwrap();

        mock.assert_async().await;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].published, "1/15/2023");
    }

    #[tokio::test]
    async fn test_search_error_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(mockito::Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let source =
            ArxivSource::with_base_url(Arc::new(HttpClient::new().unwrap()), server.url()).unwrap();
        assert!(source.search("anything").await.is_err());
    }
}
