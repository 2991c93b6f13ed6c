//! Configuration file (`folio.toml`).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteSettings,
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub build: BuildSettings,
}

#[derive(Debug, Deserialize)]
pub struct SiteSettings {
    #[serde(default = "default_site_dir")]
    pub dir: String,
    #[serde(default = "default_page")]
    pub page: String,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            dir: default_site_dir(),
            page: default_page(),
            output: default_output(),
            title: default_title(),
        }
    }
}

/// Where section documents are fetched from. The site directory when unset.
#[derive(Debug, Deserialize, Default)]
pub struct SourceSettings {
    pub base_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BuildSettings {
    #[serde(default = "default_true")]
    pub minify: bool,
    #[serde(default = "default_true")]
    pub behaviors: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            minify: true,
            behaviors: true,
        }
    }
}

fn default_site_dir() -> String {
    "site".to_string()
}
fn default_page() -> String {
    "index.html".to_string()
}
fn default_output() -> String {
    "dist".to_string()
}
fn default_title() -> String {
    "Portfolio".to_string()
}
fn default_true() -> bool {
    true
}

impl ConfigFile {
    /// Load configuration from `path` if it exists.
    /// Returns an error if the config file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
            let config = Self::parse(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
            tracing::info!("Loaded config from {}", path.display());
            return Ok(config);
        }
        Ok(Self::default())
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn site_dir(&self) -> PathBuf {
        PathBuf::from(&self.site.dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = tempdir().unwrap();

        let config = ConfigFile::load(&temp.path().join("folio.toml")).unwrap();

        assert_eq!(config.site.dir, "site");
        assert_eq!(config.site.page, "index.html");
        assert_eq!(config.site.output, "dist");
        assert!(config.source.base_url.is_none());
        assert!(config.build.minify);
        assert!(config.build.behaviors);
    }

    #[test]
    fn partial_tables_keep_defaults() {
        let config = ConfigFile::parse(
            r#"
[site]
output = "public"

[source]
base_url = "https://example.com/"

[build]
behaviors = false
"#,
        )
        .unwrap();

        assert_eq!(config.site.dir, "site");
        assert_eq!(config.site.output, "public");
        assert_eq!(config.source.base_url.as_deref(), Some("https://example.com/"));
        assert!(config.build.minify);
        assert!(!config.build.behaviors);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("folio.toml");
        fs::write(&path, "[site\ndir = ").unwrap();

        assert!(ConfigFile::load(&path).is_err());
    }
}
