//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use walkdir::WalkDir;

use folio_render::{App, ContentSource, DirSource, HostDocument, HttpSource};

use crate::assets::{AssetPipeline, BEHAVIORS_SCRIPT_PATH};

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Site directory holding the host page, `data/` and static assets
    pub site_dir: PathBuf,

    /// Host page file name, relative to the site directory
    pub page: String,

    /// Output directory
    pub output_dir: PathBuf,

    /// Fetch documents from this base URL instead of the site directory
    pub base_url: Option<String>,

    /// Minify CSS output
    pub minify: bool,

    /// Emit and link the UI behaviors script
    pub behaviors: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            site_dir: PathBuf::from("site"),
            page: "index.html".to_string(),
            output_dir: PathBuf::from("dist"),
            base_url: None,
            minify: true,
            behaviors: true,
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated
    pub pages: usize,

    /// Sections that rendered into the page
    pub sections_rendered: usize,

    /// Sections whose loader failed
    pub sections_failed: usize,

    /// Static files copied from the site directory
    pub files_copied: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read site: {0}")]
    ReadError(String),

    #[error("Invalid content source: {0}")]
    SourceError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Content source for this build.
    pub fn content_source(config: &BuildConfig) -> Result<Arc<dyn ContentSource>, BuildError> {
        match &config.base_url {
            Some(url) => {
                let source =
                    HttpSource::new(url).map_err(|e| BuildError::SourceError(e.to_string()))?;
                Ok(Arc::new(source))
            }
            None => Ok(Arc::new(DirSource::new(&config.site_dir))),
        }
    }

    /// Build the static site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        if !self.config.site_dir.exists() {
            return Err(BuildError::ReadError(format!(
                "Site directory not found: {}",
                self.config.site_dir.display()
            )));
        }

        // Ensure output directory exists
        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        // Render the host page
        let page_path = self.config.site_dir.join(&self.config.page);
        let html = fs::read_to_string(&page_path)
            .map_err(|e| BuildError::ReadError(format!("{}: {}", page_path.display(), e)))?;

        let app = App::new(Self::content_source(&self.config)?);
        let rendered = app.run(HostDocument::parse(html)).await;
        let (mut document, report) = rendered.into_parts();

        for outcome in report.failures() {
            if let Err(e) = &outcome.result {
                tracing::warn!("Section {} left unrendered: {}", outcome.section, e);
            }
        }

        if self.config.behaviors && !document.html().contains(BEHAVIORS_SCRIPT_PATH) {
            document.insert_before_body_end(&format!(
                "<script src=\"{}\" defer></script>\n",
                BEHAVIORS_SCRIPT_PATH
            ));
        }

        let output_page = self.config.output_dir.join(&self.config.page);
        if let Some(parent) = output_page.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }
        fs::write(&output_page, document.html())
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        // Copy the rest of the site in parallel
        let files = self.discover_files()?;
        let copied: Vec<Result<(), BuildError>> = files
            .par_iter()
            .map(|relative| self.copy_file(relative))
            .collect();
        for result in copied {
            result?;
        }

        // Generate assets
        self.generate_assets()?;

        let duration = start.elapsed();

        Ok(BuildResult {
            pages: 1,
            sections_rendered: report.rendered(),
            sections_failed: report.failed(),
            files_copied: files.len(),
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Discover every static file of the site, relative to the site directory.
    fn discover_files(&self) -> Result<Vec<PathBuf>, BuildError> {
        let site_dir = &self.config.site_dir;
        let output_dir = self.config.output_dir.canonicalize().ok();
        let mut files = Vec::new();

        for entry in WalkDir::new(site_dir)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| {
                // Never copy the output into itself
                output_dir.as_deref().map_or(true, |out| {
                    e.path().canonicalize().map(|p| p != out).unwrap_or(true)
                })
            })
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(site_dir).unwrap_or(path).to_path_buf();
            if relative == Path::new(&self.config.page) {
                continue;
            }

            files.push(relative);
        }

        files.sort();
        Ok(files)
    }

    /// Copy one static file, minifying stylesheets when enabled.
    fn copy_file(&self, relative: &Path) -> Result<(), BuildError> {
        let source = self.config.site_dir.join(relative);
        let target = self.config.output_dir.join(relative);

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }

        let is_css = relative.extension().and_then(|e| e.to_str()) == Some("css");
        if self.config.minify && is_css {
            let css = fs::read_to_string(&source)
                .map_err(|e| BuildError::ReadError(format!("{}: {}", source.display(), e)))?;
            let css = match AssetPipeline::minify_css(&css) {
                Ok(minified) => minified,
                Err(e) => {
                    tracing::warn!("Keeping {} unminified: {}", relative.display(), e);
                    css
                }
            };
            fs::write(&target, css).map_err(|e| BuildError::WriteError(e.to_string()))?;
        } else {
            fs::copy(&source, &target).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }

        Ok(())
    }

    /// Generate static assets.
    fn generate_assets(&self) -> Result<(), BuildError> {
        if !self.config.behaviors {
            return Ok(());
        }

        let script_path = self.config.output_dir.join(BEHAVIORS_SCRIPT_PATH);
        if let Some(parent) = script_path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }
        fs::write(&script_path, AssetPipeline::generate_js())
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const HOST: &str = r#"<!DOCTYPE html>
<html>
<head><title>Loading</title><link rel="stylesheet" href="css/style.css"></head>
<body>
<span id="nav-brand">Brand</span><ul id="nav-menu"></ul>
<p id="footer-text"></p>
</body>
</html>"#;

    fn write_site(root: &Path) -> PathBuf {
        let site = root.join("site");
        fs::create_dir_all(site.join("data")).unwrap();
        fs::create_dir_all(site.join("css")).unwrap();
        fs::write(site.join("index.html"), HOST).unwrap();
        fs::write(
            site.join("data/navigation.json"),
            r##"{"brand": {"name": "JD"}, "menuItems": [{"href": "#work", "text": "Work"}]}"##,
        )
        .unwrap();
        fs::write(
            site.join("css/style.css"),
            "body {\n  color: red;\n}\n",
        )
        .unwrap();
        site
    }

    #[tokio::test]
    async fn builds_rendered_page() {
        let temp = tempdir().unwrap();
        let site = write_site(temp.path());
        let out = temp.path().join("dist");

        let result = StaticBuilder::new(BuildConfig {
            site_dir: site,
            output_dir: out.clone(),
            ..Default::default()
        })
        .build()
        .await
        .unwrap();

        assert_eq!(result.pages, 1);
        assert_eq!(result.sections_rendered, 1);
        assert_eq!(result.sections_failed, 9);

        let html = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(html.contains(r#"<span id="nav-brand">JD</span>"#));
        assert!(html.contains(r##"<a href="#work" class="nav-link">Work</a>"##));
        assert!(html.contains(r#"<script src="assets/folio.js" defer></script>"#));
        assert!(out.join("assets/folio.js").exists());
    }

    #[tokio::test]
    async fn copies_and_minifies_static_files() {
        let temp = tempdir().unwrap();
        let site = write_site(temp.path());
        let out = temp.path().join("dist");

        let result = StaticBuilder::new(BuildConfig {
            site_dir: site,
            output_dir: out.clone(),
            ..Default::default()
        })
        .build()
        .await
        .unwrap();

        assert_eq!(result.files_copied, 2);
        assert!(out.join("data/navigation.json").exists());
        let css = fs::read_to_string(out.join("css/style.css")).unwrap();
        assert!(!css.contains('\n'));
        assert!(css.contains("color"));
    }

    #[tokio::test]
    async fn skips_behaviors_when_disabled() {
        let temp = tempdir().unwrap();
        let site = write_site(temp.path());
        let out = temp.path().join("dist");

        StaticBuilder::new(BuildConfig {
            site_dir: site,
            output_dir: out.clone(),
            behaviors: false,
            minify: false,
            ..Default::default()
        })
        .build()
        .await
        .unwrap();

        let html = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(!html.contains(BEHAVIORS_SCRIPT_PATH));
        assert!(!out.join(BEHAVIORS_SCRIPT_PATH).exists());
        assert_eq!(
            fs::read_to_string(out.join("css/style.css")).unwrap(),
            "body {\n  color: red;\n}\n"
        );
    }

    #[tokio::test]
    async fn errors_on_missing_site() {
        let temp = tempdir().unwrap();

        let result = StaticBuilder::new(BuildConfig {
            site_dir: temp.path().join("nope"),
            output_dir: temp.path().join("dist"),
            ..Default::default()
        })
        .build()
        .await;

        assert!(matches!(result, Err(BuildError::ReadError(_))));
    }

    #[test]
    fn rejects_invalid_base_url() {
        let config = BuildConfig {
            base_url: Some("::not a url".to_string()),
            ..Default::default()
        };

        assert!(matches!(
            StaticBuilder::content_source(&config),
            Err(BuildError::SourceError(_))
        ));
    }
}
