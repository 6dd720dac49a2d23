//! Concurrent source fan-out.

use futures_util::future::join_all;
use std::sync::Arc;

use crate::models::SearchResult;
use crate::sources::Source;

/// Query every source concurrently and concatenate the contributions.
///
/// Output order is the order of `sources`, regardless of which provider
/// answered first. A failing source contributes nothing; its error is
/// logged and the remaining contributions are kept.
pub async fn fan_out(sources: &[Arc<dyn Source>], query: &str) -> Vec<SearchResult> {
    let futures = sources.iter().map(|source| {
        let source = source.clone();
        async move {
            match source.search(query).await {
                Ok(results) => {
                    tracing::debug!(source = source.id(), count = results.len(), "source responded");
                    results
                }
                Err(e) => {
                    tracing::warn!(source = source.id(), error = %e, "source failed, skipping");
                    Vec::new()
                }
            }
        }
    });

    join_all(futures).await.into_iter().flatten().collect()
}
