//! Preview a built site.

use std::path::{Path, PathBuf};

use anyhow::Result;
use guide_server::PreviewServer;

use crate::config::load_config;

/// Run the serve command.
pub async fn run(config_path: &Path, port: u16, dir: Option<PathBuf>) -> Result<()> {
    let dir = match dir {
        Some(dir) => dir,
        None => load_config(config_path)?.output_dir(),
    };

    PreviewServer::new(dir, "127.0.0.1", port, true)?
        .start()
        .await?;

    Ok(())
}
