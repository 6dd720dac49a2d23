//! Core data models shared across the pipeline.

mod request;
mod result;

pub use request::{SearchMode, SearchRequest};
pub use result::{ResultBuilder, ResultKind, SearchResult, SourceName};
