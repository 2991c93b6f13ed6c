//! Content source implementations.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::Url;

use crate::traits::{ContentSource, FetchError};

/// Reads documents from a local site directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl ContentSource for DirSource {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    async fn fetch(&self, path: &str) -> Result<Vec<u8>, FetchError> {
        let full_path = self.root.join(path);

        tokio::fs::read(&full_path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => FetchError::NotFound(full_path.display().to_string()),
            _ => FetchError::Transport(format!("{}: {}", full_path.display(), e)),
        })
    }
}

/// Fetches documents over HTTP, relative to a base URL.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base: Url,
}

impl HttpSource {
    /// Create a source rooted at `base_url`. A trailing slash is implied so
    /// that `https://host/site` resolves `data/hero.json` under `/site/`.
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        let base = Url::parse(&normalized).map_err(|e| FetchError::InvalidUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            client: reqwest::Client::new(),
            base,
        })
    }

    /// Absolute URL of a resource path.
    pub fn url_for(&self, path: &str) -> Result<Url, FetchError> {
        self.base.join(path).map_err(|e| FetchError::InvalidUrl {
            url: format!("{}{}", self.base, path),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl ContentSource for HttpSource {
    fn describe(&self) -> String {
        self.base.to_string()
    }

    async fn fetch(&self, path: &str) -> Result<Vec<u8>, FetchError> {
        let url = self.url_for(path)?;

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(body.to_vec())
    }
}

/// Serves documents from memory. Paths without a body answer `NotFound`;
/// paths registered with [`MemorySource::fail`] answer a transport error.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<String, Vec<u8>>,
    failures: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a raw body for `path`.
    pub fn insert(&mut self, path: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.documents.insert(path.into(), body.into());
    }

    /// Builder form of [`MemorySource::insert`].
    pub fn with(mut self, path: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.insert(path, body);
        self
    }

    /// Make `path` fail with a transport error.
    pub fn fail(mut self, path: impl Into<String>, message: impl Into<String>) -> Self {
        self.failures.insert(path.into(), message.into());
        self
    }
}

#[async_trait]
impl ContentSource for MemorySource {
    fn describe(&self) -> String {
        format!("memory ({} documents)", self.documents.len())
    }

    async fn fetch(&self, path: &str) -> Result<Vec<u8>, FetchError> {
        if let Some(message) = self.failures.get(path) {
            return Err(FetchError::Transport(message.clone()));
        }

        self.documents
            .get(path)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(path.to_string()))
    }
}
