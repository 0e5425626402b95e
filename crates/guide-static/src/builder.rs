//! Static site builder.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::assets::AssetPipeline;
use crate::links::{check_links, BrokenLink};
use crate::render::{route_to_output_path, SiteRenderer};
use crate::templates::{HomepageLayout, SiteChrome};

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Output directory
    pub output_dir: PathBuf,

    /// Pre-built pages and files copied verbatim into the output
    pub static_dir: Option<PathBuf>,

    /// Minify CSS output
    pub minify: bool,

    /// Absolute site URL used in the sitemap (e.g. "https://example.com/guide")
    pub site_url: String,

    /// Navbar, stylesheets and footer shared by every page
    pub chrome: SiteChrome,

    /// Report links that do not resolve in the output tree
    pub check_links: bool,

    /// Fail the build on unresolved links
    pub strict_links: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("dist"),
            static_dir: None,
            minify: true,
            site_url: String::new(),
            chrome: SiteChrome::default(),
            check_links: true,
            strict_links: false,
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages rendered
    pub pages: usize,

    /// Number of files copied from the static directory
    pub copied_files: usize,

    /// Links that did not resolve (empty when the check is disabled)
    pub broken_links: Vec<BrokenLink>,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read input: {0}")]
    ReadError(String),

    #[error("Failed to render {route}: {message}")]
    RenderError { route: String, message: String },

    #[error("Failed to write output: {0}")]
    WriteError(String),

    #[error("{0} broken link(s) found")]
    BrokenLinks(usize),
}

/// A rendered page ready to be written.
struct RenderedPage {
    route: String,
    html: String,
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

    /// Build the static site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();
        let out = &self.config.output_dir;

        fs::create_dir_all(out).map_err(|e| BuildError::WriteError(e.to_string()))?;

        let copied_files = self.copy_static()?;

        let layout = HomepageLayout::new(self.config.chrome.clone()).map_err(|e| {
            BuildError::RenderError {
                route: "*".to_string(),
                message: e.to_string(),
            }
        })?;
        let renderer = SiteRenderer::new(Box::new(layout));

        let rendered = self.render_pages(&renderer)?;
        for page in &rendered {
            self.write_page(page)?;
        }

        self.generate_assets()?;
        self.generate_sitemap(&rendered)?;

        let broken_links = if self.config.check_links {
            let broken = check_links(out).map_err(|e| BuildError::ReadError(e.to_string()))?;
            for link in &broken {
                tracing::warn!(
                    "Unresolved link {} in {}",
                    link.target,
                    link.page.display()
                );
            }
            if self.config.strict_links && !broken.is_empty() {
                return Err(BuildError::BrokenLinks(broken.len()));
            }
            broken
        } else {
            Vec::new()
        };

        Ok(BuildResult {
            pages: rendered.len(),
            copied_files,
            broken_links,
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: out.clone(),
        })
    }

    /// Render every registered page in parallel.
    fn render_pages(&self, renderer: &SiteRenderer) -> Result<Vec<RenderedPage>, BuildError> {
        renderer
            .pages()
            .par_iter()
            .map(|page| {
                let route = page.route().to_string();
                let html = renderer
                    .render_page(page.as_ref())
                    .map_err(|e| BuildError::RenderError {
                        route: route.clone(),
                        message: e.to_string(),
                    })?;
                Ok(RenderedPage { route, html })
            })
            .collect()
    }

    fn write_page(&self, page: &RenderedPage) -> Result<(), BuildError> {
        let path = route_to_output_path(&self.config.output_dir, &page.route);

        if let Some(static_dir) = &self.config.static_dir {
            let shadowed = route_to_output_path(static_dir, &page.route);
            if shadowed.is_file() {
                tracing::warn!(
                    "Page {} replaces static file {}",
                    page.route,
                    shadowed.display()
                );
            }
        }

        tracing::debug!("Writing {} to {}", page.route, path.display());
        write_file(&path, &page.html)
    }

    /// Copy the static directory into the output tree.
    fn copy_static(&self) -> Result<usize, BuildError> {
        let Some(static_dir) = &self.config.static_dir else {
            return Ok(0);
        };

        if !static_dir.is_dir() {
            tracing::warn!(
                "Static directory {} does not exist; nothing copied",
                static_dir.display()
            );
            return Ok(0);
        }

        let mut count = 0;
        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let relative = entry
                .path()
                .strip_prefix(static_dir)
                .unwrap_or(entry.path());
            let target = self.config.output_dir.join(relative);

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
            }
            fs::copy(entry.path(), &target).map_err(|e| {
                BuildError::ReadError(format!("{}: {}", entry.path().display(), e))
            })?;
            count += 1;
        }

        tracing::info!("Copied {} files from {}", count, static_dir.display());
        Ok(count)
    }

    /// Generate static assets.
    fn generate_assets(&self) -> Result<(), BuildError> {
        let assets_dir = self.config.output_dir.join("assets");

        for asset in AssetPipeline::bundle(self.config.minify) {
            write_file(&assets_dir.join(asset.name), &asset.body)?;
        }

        Ok(())
    }

    /// Generate sitemap.xml and robots.txt covering rendered routes and
    /// copied pages.
    fn generate_sitemap(&self, pages: &[RenderedPage]) -> Result<(), BuildError> {
        let mut routes: Vec<String> = pages.iter().map(|p| p.route.clone()).collect();
        routes.extend(self.static_routes());
        routes.sort();
        routes.dedup();

        let base = self.config.site_url.trim_end_matches('/');
        let urls: Vec<String> = routes
            .iter()
            .map(|route| {
                let loc = format!("{}{}", base, route);
                format!("  <url>\n    <loc>{}</loc>\n  </url>", escape_xml(&loc))
            })
            .collect();

        let sitemap = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}
</urlset>"#,
            urls.join("\n")
        );

        write_file(&self.config.output_dir.join("sitemap.xml"), &sitemap)?;

        let robots = format!("User-agent: *\nAllow: /\nSitemap: {}/sitemap.xml", base);
        write_file(&self.config.output_dir.join("robots.txt"), &robots)
    }

    /// Routes of `index.html` pages copied from the static directory.
    fn static_routes(&self) -> Vec<String> {
        let Some(static_dir) = &self.config.static_dir else {
            return Vec::new();
        };

        WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() == "index.html")
            .filter_map(|e| {
                let dir = e.path().parent()?.strip_prefix(static_dir).ok()?;
                let segments: Vec<String> = dir
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect();
                Some(format!("/{}", segments.join("/")))
            })
            .collect()
    }
}

/// Escape text for an XML element body.
fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

fn write_file(path: &Path, contents: &str) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
    }
    fs::write(path, contents)
        .map_err(|e| BuildError::WriteError(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn config(out: &Path) -> BuildConfig {
        BuildConfig {
            output_dir: out.to_path_buf(),
            site_url: "https://example.com/guide".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn builds_home_page_and_assets() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        let result = StaticBuilder::new(config(&out)).build().await.unwrap();

        assert_eq!(result.pages, 1);
        assert!(out.join("index.html").exists());
        assert!(out.join("assets/main.css").exists());
        assert!(out.join("assets/main.js").exists());
        assert!(out.join("assets/intellij-idea-beam.svg").exists());

        let html = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(html.contains("<title>Home Page - IntelliJ IDEA Guide</title>"));
    }

    #[tokio::test]
    async fn reports_navigation_targets_built_elsewhere() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        let result = StaticBuilder::new(config(&out)).build().await.unwrap();

        let targets: Vec<_> = result.broken_links.iter().map(|l| l.target.as_str()).collect();
        assert_eq!(
            targets,
            vec!["/about", "/authors", "/technologies", "/tips", "/topics"]
        );
    }

    #[tokio::test]
    async fn static_pages_resolve_links() {
        let temp = tempdir().unwrap();
        let static_dir = temp.path().join("static");
        let out = temp.path().join("dist");

        for route in ["tips", "technologies", "topics", "authors", "about"] {
            fs::create_dir_all(static_dir.join(route)).unwrap();
            fs::write(static_dir.join(route).join("index.html"), "<p>page</p>").unwrap();
        }

        let result = StaticBuilder::new(BuildConfig {
            static_dir: Some(static_dir),
            strict_links: true,
            ..config(&out)
        })
        .build()
        .await
        .unwrap();

        assert_eq!(result.copied_files, 5);
        assert!(result.broken_links.is_empty());

        let sitemap = fs::read_to_string(out.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>https://example.com/guide/</loc>"));
        assert!(sitemap.contains("<loc>https://example.com/guide/topics</loc>"));
    }

    #[tokio::test]
    async fn strict_links_fail_the_build() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        let result = StaticBuilder::new(BuildConfig {
            strict_links: true,
            ..config(&out)
        })
        .build()
        .await;

        assert!(matches!(result, Err(BuildError::BrokenLinks(5))));
    }

    #[tokio::test]
    async fn skips_link_check_when_disabled() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        let result = StaticBuilder::new(BuildConfig {
            check_links: false,
            strict_links: true,
            ..config(&out)
        })
        .build()
        .await
        .unwrap();

        assert!(result.broken_links.is_empty());
    }

    #[tokio::test]
    async fn writes_robots_txt() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        StaticBuilder::new(config(&out)).build().await.unwrap();

        let robots = fs::read_to_string(out.join("robots.txt")).unwrap();
        assert!(robots.ends_with("Sitemap: https://example.com/guide/sitemap.xml"));
    }

    #[tokio::test]
    async fn sitemap_escapes_special_characters() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");
        let static_dir = temp.path().join("static");
        fs::create_dir_all(static_dir.join("tips&tricks")).unwrap();
        fs::write(static_dir.join("tips&tricks/index.html"), "<p>Tips</p>").unwrap();

        let mut cfg = config(&out);
        cfg.static_dir = Some(static_dir);
        cfg.check_links = false;
        StaticBuilder::new(cfg).build().await.unwrap();

        let sitemap = fs::read_to_string(out.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>https://example.com/guide/tips&amp;tricks</loc>"));
        assert!(!sitemap.contains("tips&tricks"));
    }

    #[test]
    fn escape_xml_leaves_plain_text_borrowed() {
        assert!(matches!(escape_xml("/topics"), Cow::Borrowed("/topics")));
        assert_eq!(escape_xml("a<b>&'\""), "a&lt;b&gt;&amp;&apos;&quot;");
    }

    #[tokio::test]
    async fn missing_static_directory_copies_nothing() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        let mut cfg = config(&out);
        cfg.static_dir = Some(temp.path().join("nowhere"));
        cfg.check_links = false;
        let result = StaticBuilder::new(cfg).build().await.unwrap();

        assert_eq!(result.copied_files, 0);
        assert!(out.join("index.html").is_file());
    }

    #[tokio::test]
    async fn rebuild_is_byte_identical() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");
        let builder = StaticBuilder::new(config(&out));

        builder.build().await.unwrap();
        let first = fs::read_to_string(out.join("index.html")).unwrap();
        builder.build().await.unwrap();
        let second = fs::read_to_string(out.join("index.html")).unwrap();

        assert_eq!(first, second);
    }
}
