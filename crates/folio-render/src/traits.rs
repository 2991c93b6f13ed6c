//! Trait definitions for content sources.

use async_trait::async_trait;

/// Errors raised while fetching a document (transport failures).
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Invalid base URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Where content documents are fetched from.
///
/// Paths are relative resource paths such as `data/hero.json`.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Short description for logs (a directory or base URL).
    fn describe(&self) -> String;

    /// Fetch the raw body of one document.
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, FetchError>;
}
