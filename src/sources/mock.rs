//! Mock source for testing purposes.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::models::{ResultBuilder, ResultKind, SearchResult, SourceName};
use crate::sources::{Source, SourceError};

/// A mock source for testing that returns predefined results.
#[derive(Debug)]
pub struct MockSource {
    id: &'static str,
    name: SourceName,
    kind: ResultKind,
    results: Mutex<Vec<SearchResult>>,
    fail: Mutex<bool>,
}

impl MockSource {
    /// Create a new mock source reporting the given identity.
    pub fn new(id: &'static str, name: SourceName, kind: ResultKind) -> Self {
        Self {
            id,
            name,
            kind,
            results: Mutex::new(Vec::new()),
            fail: Mutex::new(false),
        }
    }

    /// Set the results to return from `search`.
    pub fn set_results(&self, results: Vec<SearchResult>) {
        *self.results.lock().unwrap() = results;
    }

    /// Make every subsequent `search` call fail.
    pub fn set_failing(&self, failing: bool) {
        *self.fail.lock().unwrap() = failing;
    }
}

#[async_trait]
impl Source for MockSource {
    fn id(&self) -> &'static str {
        self.id
    }

    fn name(&self) -> SourceName {
        self.name
    }

    fn kind(&self) -> ResultKind {
        self.kind
    }

    async fn search(&self, _query: &str) -> Result<Vec<SearchResult>, SourceError> {
        if *self.fail.lock().unwrap() {
            return Err(SourceError::Api("mock failure".to_string()));
        }
        Ok(self.results.lock().unwrap().clone())
    }
}

/// Helper to build a result for tests.
pub fn make_result(url: &str, title: &str, name: SourceName, kind: ResultKind) -> SearchResult {
    ResultBuilder::new(url.to_string(), name, kind)
        .title(title.to_string())
        .build()
}
