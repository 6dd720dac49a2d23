//! Heuristic relevance ranking.

use std::cmp::Ordering;

use crate::models::{ResultKind, SearchResult, SourceName};

const TITLE_MATCH_WEIGHT: f64 = 3.0;
const ABSTRACT_MATCH_WEIGHT: f64 = 2.0;
const RESEARCH_KIND_WEIGHT: f64 = 2.0;
const WIKIPEDIA_WEIGHT: f64 = 1.5;
const AUTHORED_WEIGHT: f64 = 0.5;
const CITATION_DIVISOR: f64 = 100.0;
const CITATION_CAP: f64 = 2.0;

/// Score a single result against the query.
///
/// Substring matching is case-insensitive on the result side and the
/// query side. The citation term scales linearly and saturates, so a
/// hundred citations count as much as a million past the cap.
pub fn relevance_score(result: &SearchResult, query_lower: &str) -> f64 {
    let mut score = 0.0;

    if result.title.to_lowercase().contains(query_lower) {
        score += TITLE_MATCH_WEIGHT;
    }
    if result.abstract_text.to_lowercase().contains(query_lower) {
        score += ABSTRACT_MATCH_WEIGHT;
    }
    if result.kind == ResultKind::Research {
        score += RESEARCH_KIND_WEIGHT;
    }
    if result.source == SourceName::Wikipedia {
        score += WIKIPEDIA_WEIGHT;
    }
    match result.citations {
        Some(citations) if citations > 0 => {
            score += (citations as f64 / CITATION_DIVISOR).min(CITATION_CAP);
        }
        _ => {}
    }
    if !result.authors.is_empty() {
        score += AUTHORED_WEIGHT;
    }

    score
}

/// Sort results by descending relevance score.
///
/// The sort is stable: equal scores keep their post-dedup order, which is
/// the source registration order.
pub fn rank(results: &mut [SearchResult], query: &str) {
    let query_lower = query.to_lowercase();
    results.sort_by(|a, b| {
        relevance_score(b, &query_lower)
            .partial_cmp(&relevance_score(a, &query_lower))
            .unwrap_or(Ordering::Equal)
    });
}
