//! Google Books search source implementation.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::models::{ResultBuilder, ResultKind, SearchResult, SourceName};
use crate::sources::{Source, SourceError};
use crate::utils::HttpClient;

const GOOGLE_BOOKS_BASE_URL: &str = "https://www.googleapis.com";
const GOOGLE_BOOKS_MAX_RESULTS: usize = 10;

/// Google Books search source
#[derive(Debug, Clone)]
pub struct GoogleBooksSource {
    client: Arc<HttpClient>,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct BooksResponse {
    #[serde(default)]
    items: Vec<BookItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BookItem {
    #[serde(rename = "volumeInfo")]
    volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VolumeInfo {
    title: String,
    description: String,
    authors: Vec<String>,
    #[serde(rename = "infoLink")]
    info_link: String,
    #[serde(rename = "publishedDate")]
    published_date: String,
    publisher: String,
    categories: Vec<String>,
    #[serde(rename = "pageCount")]
    page_count: Option<u32>,
    #[serde(rename = "previewLink")]
    preview_link: Option<String>,
}

impl GoogleBooksSource {
    /// Create a new Google Books source
    pub fn new(client: Arc<HttpClient>, api_key: String) -> Self {
        Self::with_base_url(client, api_key, GOOGLE_BOOKS_BASE_URL)
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

    fn map_item(item: BookItem) -> SearchResult {
        let info = item.volume_info;
        let mut builder = ResultBuilder::new(info.info_link, SourceName::GoogleBooks, ResultKind::Web)
            .title(info.title)
            .abstract_text(info.description)
            .authors(info.authors)
            .published(info.published_date)
            .extra("publisher", info.publisher)
            .extra("categories", info.categories);
        if let Some(pages) = info.page_count {
            builder = builder.extra("pageCount", pages);
        }
        if let Some(preview) = info.preview_link {
            builder = builder.extra("previewLink", preview);
        }
        builder.build()
    }
}

#[async_trait]
impl Source for GoogleBooksSource {
    fn id(&self) -> &'static str {
        "google_books"
    }

    fn name(&self) -> SourceName {
        SourceName::GoogleBooks
    }

    fn kind(&self) -> ResultKind {
        ResultKind::Web
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SourceError> {
        let url = format!(
            "{}/books/v1/volumes?q={}&key={}&maxResults={}",
            self.base_url,
            urlencoding::encode(query),
            self.api_key,
            GOOGLE_BOOKS_MAX_RESULTS
        );

        let response: BooksResponse = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to search Google Books: {}", e)))?
            .json()
            .await
            .map_err(|e| {
                SourceError::Parse(format!("Failed to parse Google Books response: {}", e))
            })?;

        Ok(response.items.into_iter().map(Self::map_item).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_item() {
        let item: BookItem = serde_json::from_value(json!({
            "volumeInfo": {
                "title": "SICP",
                "description": "Wizard book.",
                "authors": ["Abelson", "Sussman"],
                "infoLink": "https://books.google.com/sicp",
                "publishedDate": "1985",
                "publisher": "MIT Press",
                "categories": ["Computers"],
                "pageCount": 657,
                "previewLink": "https://books.google.com/sicp?preview"
            }
        }))
        .unwrap();

        let mapped = GoogleBooksSource::map_item(item);
        assert_eq!(mapped.title, "SICP");
        assert_eq!(mapped.url, "https://books.google.com/sicp");
        assert_eq!(mapped.extra["publisher"], "MIT Press");
        assert_eq!(mapped.extra["pageCount"], 657);
        assert_eq!(mapped.kind, ResultKind::Web);
    }

    #[test]
    fn test_map_item_optional_extras_omitted() {
        let item: BookItem = serde_json::from_value(json!({"volumeInfo": {"title": "X"}})).unwrap();
        let mapped = GoogleBooksSource::map_item(item);
        assert!(mapped.extra.get("pageCount").is_none());
        assert!(mapped.extra.get("previewLink").is_none());
        // Always-defaulted extras are still present, matching the provider map.
        assert_eq!(mapped.extra["publisher"], "");
    }
}
