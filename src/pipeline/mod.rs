//! The search pipeline: concurrent fan-out, URL dedup, relevance ranking.
//!
//! A query flows through three stages. [`fanout`] invokes the selected
//! sources concurrently and concatenates their contributions in
//! registration order. [`dedup`] collapses URL collisions. [`rank`] sorts
//! what remains by a heuristic relevance score against the query.

mod dedup;
mod fanout;
mod rank;

pub use dedup::dedup_by_url;
pub use fanout::fan_out;
pub use rank::{rank, relevance_score};

use std::sync::Arc;

use crate::models::{SearchMode, SearchResult};
use crate::sources::SourceRegistry;

/// Run the full pipeline for a query in the given mode.
pub async fn run(
    registry: &Arc<SourceRegistry>,
    mode: SearchMode,
    query: &str,
) -> Vec<SearchResult> {
    let sources = registry.select(mode);
    let combined = fan_out(&sources, query).await;
    let mut unique = dedup_by_url(combined);
    rank(&mut unique, query);
    unique
}
