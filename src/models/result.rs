//! Unified result model produced by every search source.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Classification of a result, used by the ranker and the display shell's
/// result-type icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Research,
    Web,
}

/// The provider a result came from.
///
/// Serializes to the human-readable display name the shell renders, e.g.
/// `"arXiv"` or `"Digital Commons Network"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceName {
    #[serde(rename = "arXiv")]
    Arxiv,
    #[serde(rename = "PubMed")]
    PubMed,
    #[serde(rename = "Library of Congress")]
    LibraryOfCongress,
    #[serde(rename = "ResearchGate")]
    ResearchGate,
    #[serde(rename = "Wikipedia")]
    Wikipedia,
    #[serde(rename = "Google Scholar")]
    GoogleScholar,
    #[serde(rename = "Google Books")]
    GoogleBooks,
    #[serde(rename = "Digital Commons Network")]
    DigitalCommons,
    #[serde(rename = "Reddit")]
    Reddit,
    #[serde(rename = "Science.gov")]
    ScienceGov,
    #[serde(rename = "JSTOR")]
    Jstor,
}

impl SourceName {
    /// Returns the display name of the source
    pub fn name(&self) -> &'static str {
        match self {
            SourceName::Arxiv => "arXiv",
            SourceName::PubMed => "PubMed",
            SourceName::LibraryOfCongress => "Library of Congress",
            SourceName::ResearchGate => "ResearchGate",
            SourceName::Wikipedia => "Wikipedia",
            SourceName::GoogleScholar => "Google Scholar",
            SourceName::GoogleBooks => "Google Books",
            SourceName::DigitalCommons => "Digital Commons Network",
            SourceName::Reddit => "Reddit",
            SourceName::ScienceGov => "Science.gov",
            SourceName::Jstor => "JSTOR",
        }
    }

    /// Returns the source identifier (for logging and registry lookup)
    pub fn id(&self) -> &'static str {
        match self {
            SourceName::Arxiv => "arxiv",
            SourceName::PubMed => "pubmed",
            SourceName::LibraryOfCongress => "loc",
            SourceName::ResearchGate => "research_gate",
            SourceName::Wikipedia => "wikipedia",
            SourceName::GoogleScholar => "google_scholar",
            SourceName::GoogleBooks => "google_books",
            SourceName::DigitalCommons => "digital_commons",
            SourceName::Reddit => "reddit",
            SourceName::ScienceGov => "science_gov",
            SourceName::Jstor => "jstor",
        }
    }
}

impl std::fmt::Display for SourceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A search result from any source, normalized into the one schema the
/// pipeline and the display shell agree on.
///
/// Lives for a single request: built by a source, passed through dedup and
/// ranking, serialized, then discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Result title (may be empty if the provider omits it)
    pub title: String,

    /// Description, summary or snippet text
    #[serde(rename = "abstract")]
    pub abstract_text: String,

    /// Author names, in provider order
    pub authors: Vec<String>,

    /// Canonical URL; the deduplication key
    pub url: String,

    /// Publication date, provider-specific format, never parsed downstream
    pub published: String,

    /// Provider the result came from
    pub source: SourceName,

    /// Research/web classification
    #[serde(rename = "type")]
    pub kind: ResultKind,

    /// Citation count, where the provider reports one; feeds the ranker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citations: Option<u32>,

    /// Provider-specific extras (journal, subreddit, score, categories, ...)
    /// carried through to the shell unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SearchResult {
    /// Create a result with required fields; everything else defaults empty
    pub fn new(url: impl Into<String>, source: SourceName, kind: ResultKind) -> Self {
        Self {
            title: String::new(),
            abstract_text: String::new(),
            authors: Vec::new(),
            url: url.into(),
            published: String::new(),
            source,
            kind,
            citations: None,
            extra: Map::new(),
        }
    }
}

/// Builder for constructing [`SearchResult`] values in source adapters.
#[derive(Debug, Clone)]
pub struct ResultBuilder {
    result: SearchResult,
}

impl ResultBuilder {
    /// Create a new builder with required fields
    pub fn new(url: impl Into<String>, source: SourceName, kind: ResultKind) -> Self {
        Self {
            result: SearchResult::new(url, source, kind),
        }
    }

    /// Set title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.result.title = title.into();
        self
    }

    /// Set abstract
    pub fn abstract_text(mut self, abstract_text: impl Into<String>) -> Self {
        self.result.abstract_text = abstract_text.into();
        self
    }

    /// Set authors
    pub fn authors(mut self, authors: Vec<String>) -> Self {
        self.result.authors = authors;
        self
    }

    /// Set publication date
    pub fn published(mut self, published: impl Into<String>) -> Self {
        self.result.published = published.into();
        self
    }

    /// Set citation count
    pub fn citations(mut self, count: u32) -> Self {
        self.result.citations = Some(count);
        self
    }

    /// Add a provider-specific extra field
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.result.extra.insert(key.into(), value.into());
        self
    }

    /// Build the SearchResult
    pub fn build(self) -> SearchResult {
        self.result
    }
}
