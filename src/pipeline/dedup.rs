//! URL-keyed deduplication.

use std::collections::HashMap;

use crate::models::SearchResult;

/// Collapse results sharing a URL down to one entry each.
///
/// Insertion-map semantics: the surviving entry sits at the position where
/// its URL first appeared, but carries the value of the last occurrence.
/// With the fan-out emitting research sources before web sources, a URL
/// found by both keeps the research slot and the web payload.
pub fn dedup_by_url(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<Option<SearchResult>> = Vec::with_capacity(results.len());

    for result in results {
        match index.get(&result.url) {
            Some(&pos) => unique[pos] = Some(result),
            None => {
                index.insert(result.url.clone(), unique.len());
                unique.push(Some(result));
            }
        }
    }

    unique.into_iter().flatten().collect()
}
