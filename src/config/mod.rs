//! Configuration management.
//!
//! All process-wide state lives here: provider credentials and server
//! settings, read once at startup and passed explicitly to the components
//! that need them. Source adapters never touch the environment themselves.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// API keys for the external search providers
    #[serde(default)]
    pub api_keys: ApiKeys,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind the listener to
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Optional static bearer credential shared with the display shell.
    /// Unset means no check is performed (the original deployment delegated
    /// this to its hosting platform).
    #[serde(default)]
    pub bearer_token: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            bearer_token: std::env::var("EXUS_BEARER_TOKEN").ok(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8787".to_string()
}

/// API keys for external providers.
///
/// An absent environment variable yields an empty string; adapters still
/// attempt their calls with an empty credential and let the provider reject
/// or degrade, rather than short-circuiting locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKeys {
    /// SerpAPI key (Google Scholar search and Google Trends)
    #[serde(default)]
    pub serpapi: String,

    /// Google Books API key
    #[serde(default)]
    pub google_books: String,

    /// Library of Congress API key (optional even provider-side)
    #[serde(default)]
    pub library_of_congress: String,

    /// NCBI E-utilities key (PubMed)
    #[serde(default)]
    pub ncbi: String,

    /// Science.gov API key
    #[serde(default)]
    pub science_gov: String,

    /// Reddit OAuth client id
    #[serde(default)]
    pub reddit_client_id: String,

    /// Reddit OAuth client secret
    #[serde(default)]
    pub reddit_client_secret: String,

    /// JSTOR API key
    #[serde(default)]
    pub jstor: String,
}

impl Default for ApiKeys {
    fn default() -> Self {
        Self {
            serpapi: env_or_empty("SERPAPI_KEY"),
            google_books: env_or_empty("GOOGLE_BOOKS_KEY"),
            library_of_congress: env_or_empty("LOC_API_KEY"),
            ncbi: env_or_empty("NCBI_API_KEY"),
            science_gov: env_or_empty("SCIENCEGOV_API_KEY"),
            reddit_client_id: env_or_empty("REDDIT_CLIENT_ID"),
            reddit_client_secret: env_or_empty("REDDIT_CLIENT_SECRET"),
            jstor: env_or_empty("JSTOR_API_KEY"),
        }
    }
}

fn env_or_empty(name: &str) -> String {
    std::env::var(name).unwrap_or_default()
}

/// Load configuration from a file, layered under environment overrides
pub fn load_config(path: &PathBuf) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path.as_path()))
        .add_source(config::Environment::with_prefix("EXUS").separator("__"))
        .build()?;

    settings.try_deserialize()
}

/// Get the default configuration (from env vars or defaults)
pub fn get_config() -> Config {
    Config::default()
}
