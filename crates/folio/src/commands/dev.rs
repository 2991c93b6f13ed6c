//! Development server command.

use anyhow::Result;
use folio_server::{DevServer, DevServerConfig};

use crate::config::ConfigFile;

/// Run the dev server.
pub async fn run(file_config: &ConfigFile, port: u16, open: bool) -> Result<()> {
    tracing::info!("Starting development server on port {}", port);

    let config = DevServerConfig {
        site_dir: file_config.site_dir(),
        page: file_config.site.page.clone(),
        base_url: file_config.source.base_url.clone(),
        behaviors: file_config.build.behaviors,
        port,
        open,
        ..Default::default()
    };

    DevServer::new(config).start().await?;

    Ok(())
}
