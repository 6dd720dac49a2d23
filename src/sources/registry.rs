//! Registry for the search source plugins.

use std::sync::Arc;

use crate::config::Config;
use crate::models::SearchMode;
use crate::utils::HttpClient;

use super::{
    arxiv::ArxivSource, digital_commons::DigitalCommonsSource, google_books::GoogleBooksSource,
    google_scholar::GoogleScholarSource, jstor::JstorSource, loc::LibraryOfCongressSource,
    pubmed::PubMedSource, reddit::RedditSource, research_gate::ResearchGateSource,
    science_gov::ScienceGovSource, wikipedia::WikipediaSource, Source, SourceError,
};

/// Registry holding the configured source adapters in their two groups.
///
/// The groups are Vecs, not maps: order matters. When the same URL appears
/// from two sources, deduplication keeps the value from the later group
/// position, so the research-then-web concatenation for `all` queries is
/// part of the observable behavior.
#[derive(Debug)]
pub struct SourceRegistry {
    research: Vec<Arc<dyn Source>>,
    web: Vec<Arc<dyn Source>>,
}

impl SourceRegistry {
    /// Create the registry with all eleven sources wired to their
    /// production endpoints.
    pub fn new(config: &Config, client: Arc<HttpClient>) -> Result<Self, SourceError> {
        let keys = &config.api_keys;

        let research: Vec<Arc<dyn Source>> = vec![
            Arc::new(ArxivSource::new(client.clone())?),
            Arc::new(PubMedSource::new(client.clone(), keys.ncbi.clone())),
            Arc::new(LibraryOfCongressSource::new(
                client.clone(),
                keys.library_of_congress.clone(),
            )),
            Arc::new(ResearchGateSource::new(client.clone())),
        ];

        let web: Vec<Arc<dyn Source>> = vec![
            Arc::new(WikipediaSource::new(client.clone())),
            Arc::new(GoogleScholarSource::new(
                client.clone(),
                keys.serpapi.clone(),
            )),
            Arc::new(GoogleBooksSource::new(
                client.clone(),
                keys.google_books.clone(),
            )),
            Arc::new(DigitalCommonsSource::new(client.clone())),
            Arc::new(RedditSource::new(
                client.clone(),
                keys.reddit_client_id.clone(),
                keys.reddit_client_secret.clone(),
            )),
            Arc::new(ScienceGovSource::new(
                client.clone(),
                keys.science_gov.clone(),
            )),
            Arc::new(JstorSource::new(client, keys.jstor.clone())),
        ];

        Ok(Self { research, web })
    }

    /// Build a registry from explicit groups (for testing).
    pub fn from_groups(research: Vec<Arc<dyn Source>>, web: Vec<Arc<dyn Source>>) -> Self {
        Self { research, web }
    }

    /// Academic sources, in invocation order.
    pub fn research(&self) -> &[Arc<dyn Source>] {
        &self.research
    }

    /// General-web sources, in invocation order.
    pub fn web(&self) -> &[Arc<dyn Source>] {
        &self.web
    }

    /// Sources a search mode fans out to, research group first.
    pub fn select(&self, mode: SearchMode) -> Vec<Arc<dyn Source>> {
        match mode {
            SearchMode::Research => self.research.to_vec(),
            SearchMode::Web => self.web.to_vec(),
            SearchMode::All => self
                .research
                .iter()
                .chain(self.web.iter())
                .cloned()
                .collect(),
            // Trends never reach the registry; the handler routes them to
            // the trend fetcher before source selection.
            SearchMode::Trends => Vec::new(),
        }
    }
}
