//! Inbound request model.

use serde::{Deserialize, Serialize};

/// Which subset of sources a request fans out to, or the trends variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    All,
    Research,
    Web,
    Trends,
}

/// The single request body the endpoint accepts.
///
/// Both fields are optional on the wire: a missing `type` means [`SearchMode::All`],
/// a missing `query` means the empty string. When `type` is `trends` the
/// query is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,

    #[serde(rename = "type", default)]
    pub mode: SearchMode,
}
