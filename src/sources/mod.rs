//! Search source adapters with a trait-based plugin architecture.
//!
//! This module defines the [`Source`] trait every provider adapter
//! implements, plus the fixed [`SourceRegistry`] the fan-out coordinator
//! selects adapters from. Each adapter translates one provider's response
//! schema into the common [`SearchResult`] shape; provider failures surface
//! as [`SourceError`] and are downgraded to an empty contribution at the
//! fan-out boundary, never propagated to the caller.

mod arxiv;
mod digital_commons;
mod google_books;
mod google_scholar;
mod jstor;
mod loc;
mod registry;
mod research_gate;
mod reddit;
mod science_gov;
mod trends;
mod wikipedia;
mod pubmed;

pub mod mock;

pub use arxiv::ArxivSource;
pub use digital_commons::DigitalCommonsSource;
pub use google_books::GoogleBooksSource;
pub use google_scholar::GoogleScholarSource;
pub use jstor::JstorSource;
pub use loc::LibraryOfCongressSource;
pub use mock::MockSource;
pub use pubmed::PubMedSource;
pub use reddit::RedditSource;
pub use registry::SourceRegistry;
pub use research_gate::ResearchGateSource;
pub use science_gov::ScienceGovSource;
pub use trends::TrendFetcher;
pub use wikipedia::WikipediaSource;

use crate::models::{ResultKind, SearchResult, SourceName};
use async_trait::async_trait;

/// The Source trait defines the interface for all search provider adapters.
///
/// # Implementing a New Source
///
/// 1. Create a struct holding the shared `HttpClient` and any credential
/// 2. Implement `id`, `name`, `kind` and `search`
/// 3. Register it in [`SourceRegistry::new`] in the group (research/web)
///    whose selector should invoke it — registration order is significant,
///    because URL collisions in dedup are resolved last-writer-wins across
///    the concatenated contributions
#[async_trait]
pub trait Source: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source (used in logs, e.g. "arxiv")
    fn id(&self) -> &'static str;

    /// Provider name stamped on every result this source produces
    fn name(&self) -> SourceName;

    /// Classification stamped on every result this source produces
    fn kind(&self) -> ResultKind;

    /// Search the provider for results matching the query.
    ///
    /// Errors are reported, not swallowed, so the coordinator can log which
    /// provider contributed nothing and why.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SourceError>;
}

/// Errors that can occur when interacting with a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success status or provider-reported error
    #[error("API error: {0}")]
    Api(String),

    /// Malformed or unexpected payload
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}

impl From<regex::Error> for SourceError {
    fn from(err: regex::Error) -> Self {
        SourceError::Parse(format!("Regex: {}", err))
    }
}
