//! Static site build command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use guide_static::StaticBuilder;

use crate::config::load_config;

/// Run the build command.
pub async fn run(
    config_path: &Path,
    output: Option<PathBuf>,
    minify: Option<bool>,
    strict_links: bool,
) -> Result<()> {
    tracing::info!("Building static site...");

    let file_config = load_config(config_path)?;
    let config = file_config.build_config(output, minify, strict_links);

    let result = StaticBuilder::new(config).build().await?;

    tracing::info!(
        "Built {} pages and copied {} files in {}ms",
        result.pages,
        result.copied_files,
        result.duration_ms
    );

    if !result.broken_links.is_empty() {
        tracing::warn!(
            "{} link(s) do not resolve; add the missing pages to the static directory",
            result.broken_links.len()
        );
    }

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
