//! Development server command.

use std::path::Path;

use anyhow::Result;
use guide_server::{DevServer, DevServerConfig};

use crate::config::load_config;

/// Run the dev server.
pub async fn run(config_path: &Path, port: u16, open: bool) -> Result<()> {
    tracing::info!("Starting development server on port {}", port);

    let file_config = load_config(config_path)?;

    let config = DevServerConfig {
        static_dir: file_config.static_dir(),
        config_file: Some(config_path.to_path_buf()),
        chrome: file_config.chrome(),
        port,
        open,
        ..Default::default()
    };

    DevServer::new(config).start().await?;

    Ok(())
}
