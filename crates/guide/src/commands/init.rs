//! Initialize a site directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing guide...");

    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());

    let root = config_path.parent().unwrap_or(Path::new(""));
    let static_dir = root.join("static");
    if !static_dir.exists() {
        fs::create_dir_all(&static_dir).context("Failed to create static directory")?;
        tracing::info!("Created {}", static_dir.display());
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Put pages for /tips, /technologies, /topics, /authors and /about under static/.");
    tracing::info!("Run 'guide dev' to start the development server.");

    Ok(())
}

pub const DEFAULT_CONFIG: &str = r#"# IntelliJ IDEA Guide configuration

[site]
title = "IntelliJ IDEA Guide"

# Absolute URL the site is deployed at (used in sitemap.xml)
site_url = "https://www.jetbrains.com/idea/guide"

footer = "IntelliJ IDEA Guide. Content is community-driven."

styles = [
  "https://cdn.jsdelivr.net/npm/bulma@0.9.4/css/bulma.min.css",
  "https://use.fontawesome.com/releases/v5.15.4/css/all.css",
]

[build]
output = "dist"

# Pages and files built elsewhere, copied into the output as-is
static_dir = "static"

minify = true

# Warn about links that do not resolve in the output
check_links = true

# Fail the build instead of warning
strict_links = false

# The navbar renders its built-in links (Tips, Technologies, Topics, Authors,
# About). Entries listed here are accepted but not rendered yet.
# [[navbar.start]]
# label = "Tips"
# href = "/tips"
"#;
