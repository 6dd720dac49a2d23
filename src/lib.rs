//! # Exus Search
//!
//! A meta-search service that aggregates academic and general-web research
//! sources behind a single HTTP endpoint. One query fans out to eleven
//! providers concurrently; the contributions are normalized to a common
//! result schema, deduplicated by URL and ranked by a relevance heuristic.
//!
//! ## Architecture
//!
//! - [`models`]: Request and result data structures
//! - [`sources`]: Provider adapters with a trait-based plugin architecture
//! - [`pipeline`]: Fan-out, deduplication and ranking stages
//! - [`server`]: axum router and request dispatch
//! - [`utils`]: Shared HTTP client and date helpers
//! - [`config`]: Configuration management

pub mod config;
pub mod models;
pub mod pipeline;
pub mod server;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use models::{SearchRequest, SearchResult};
pub use sources::{Source, SourceRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
