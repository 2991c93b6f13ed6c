//! Static site build command.

use std::path::PathBuf;

use anyhow::Result;
use folio_static::{BuildConfig, StaticBuilder};

use crate::config::ConfigFile;

/// Run the build command.
pub async fn run(file_config: &ConfigFile, output: Option<PathBuf>, minify: Option<bool>) -> Result<()> {
    tracing::info!("Building static site...");

    let config = BuildConfig {
        site_dir: file_config.site_dir(),
        page: file_config.site.page.clone(),
        output_dir: output.unwrap_or_else(|| PathBuf::from(&file_config.site.output)),
        base_url: file_config.source.base_url.clone(),
        minify: minify.unwrap_or(file_config.build.minify),
        behaviors: file_config.build.behaviors,
    };

    let result = StaticBuilder::new(config).build().await?;

    tracing::info!(
        "Built {} page with {} sections ({} failed) and {} files in {}ms",
        result.pages,
        result.sections_rendered,
        result.sections_failed,
        result.files_copied,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
