//! Site configuration file (guide.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use guide_components::{NavbarItems, NavbarStartProps, PAGE_TITLE};
use guide_static::{BuildConfig, SiteChrome};

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ConfigFile {
    pub site: SiteSettings,
    pub build: BuildSettings,
    pub navbar: NavbarSettings,

    /// Directory holding the config file; relative paths resolve against it
    #[serde(skip)]
    pub root: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Brand text in the navbar
    pub title: String,
    /// Absolute URL the site is deployed at
    pub site_url: String,
    /// Footer text
    pub footer: String,
    /// Stylesheet URLs loaded before the site stylesheet
    pub styles: Vec<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        let chrome = SiteChrome::default();
        Self {
            title: PAGE_TITLE.to_string(),
            site_url: String::new(),
            footer: chrome.footer,
            styles: chrome.styles,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    pub output: String,
    pub static_dir: String,
    pub minify: bool,
    pub check_links: bool,
    pub strict_links: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            output: "dist".to_string(),
            static_dir: "static".to_string(),
            minify: true,
            check_links: true,
            strict_links: false,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct NavbarSettings {
    /// Items offered to the navbar start component
    pub start: NavbarItems,
}

impl ConfigFile {
    /// Static directory, resolved against the config file's directory.
    pub fn static_dir(&self) -> PathBuf {
        self.root.join(&self.build.static_dir)
    }

    /// Output directory, resolved against the config file's directory.
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.build.output)
    }

    /// Navbar, stylesheets and footer shared by every page.
    pub fn chrome(&self) -> SiteChrome {
        SiteChrome {
            site_title: self.site.title.clone(),
            styles: self.site.styles.clone(),
            footer: self.site.footer.clone(),
            navbar: NavbarStartProps {
                items: self.navbar.start.clone(),
            },
            head_extra: vec![],
        }
    }

    /// Builder configuration, with command-line overrides applied. An
    /// `output` given on the command line is taken as-is.
    pub fn build_config(
        &self,
        output: Option<PathBuf>,
        minify: Option<bool>,
        strict_links: bool,
    ) -> BuildConfig {
        BuildConfig {
            output_dir: output.unwrap_or_else(|| self.output_dir()),
            static_dir: Some(self.static_dir()),
            minify: minify.unwrap_or(self.build.minify),
            site_url: self.site.site_url.clone(),
            chrome: self.chrome(),
            check_links: self.build.check_links || strict_links,
            strict_links: self.build.strict_links || strict_links,
        }
    }
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    let root = path.parent().map(Path::to_path_buf).unwrap_or_default();

    if !path.exists() {
        tracing::debug!("No {}, using defaults", path.display());
        return Ok(ConfigFile {
            root,
            ..Default::default()
        });
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mut config: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    config.root = root;

    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_uses_defaults() {
        let temp = tempdir().unwrap();

        let config = load_config(&temp.path().join("guide.toml")).unwrap();

        assert_eq!(config.site.title, "IntelliJ IDEA Guide");
        assert_eq!(config.build.output, "dist");
        assert!(config.build.minify);
        assert!(config.navbar.start.is_empty());
    }

    #[test]
    fn parses_partial_config() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("guide.toml");
        fs::write(
            &path,
            r#"
[site]
site_url = "https://example.com/idea/guide"

[build]
minify = false

[[navbar.start]]
label = "Tips"
href = "/tips"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();

        assert_eq!(config.site.site_url, "https://example.com/idea/guide");
        assert_eq!(config.site.title, "IntelliJ IDEA Guide");
        assert!(!config.build.minify);
        assert_eq!(config.navbar.start.len(), 1);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("guide.toml");
        fs::write(&path, "[build]\nminify = \"yes\"").unwrap();

        assert!(load_config(&path).is_err());
    }

    #[test]
    fn command_line_overrides_build_settings() {
        let config = ConfigFile::default();

        let build = config.build_config(Some(PathBuf::from("out")), Some(false), true);

        assert_eq!(build.output_dir, PathBuf::from("out"));
        assert!(!build.minify);
        assert!(build.check_links);
        assert!(build.strict_links);
        assert_eq!(build.static_dir, Some(PathBuf::from("static")));
    }

    #[tokio::test]
    async fn resolves_paths_next_to_config_in_subdirectory() {
        let temp = tempdir().unwrap();
        let site = temp.path().join("site");
        fs::create_dir_all(&site).unwrap();
        let path = site.join("guide.toml");

        crate::commands::init::run(&path, false).await.unwrap();
        let config = load_config(&path).unwrap();
        let build = config.build_config(None, None, false);

        assert_eq!(build.static_dir, Some(site.join("static")));
        assert!(site.join("static").is_dir());
        assert_eq!(build.output_dir, site.join("dist"));
    }

    #[test]
    fn bare_config_name_resolves_against_working_directory() {
        let config = load_config(Path::new("missing-guide.toml")).unwrap();

        assert_eq!(config.static_dir(), PathBuf::from("static"));
        assert_eq!(config.output_dir(), PathBuf::from("dist"));
    }

    #[test]
    fn default_config_template_parses() {
        let config: ConfigFile = toml::from_str(crate::commands::init::DEFAULT_CONFIG).unwrap();

        assert_eq!(config.site.title, "IntelliJ IDEA Guide");
        assert!(config.navbar.start.is_empty());
    }
}
