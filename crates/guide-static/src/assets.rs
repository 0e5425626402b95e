//! Asset pipeline for the site stylesheet, script and hero splash.

/// A generated asset and its path under the `assets/` directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// File name relative to `assets/`
    pub name: &'static str,
    /// MIME type served by the dev server
    pub content_type: &'static str,
    /// File contents
    pub body: String,
}

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the site CSS.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }

    /// Generate the site JavaScript.
    pub fn generate_js() -> String {
        DEFAULT_JS.to_string()
    }

    /// The hero background image.
    pub fn splash_svg() -> String {
        SPLASH_SVG.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }

    /// Every asset the site ships. CSS is minified when `minify` is set;
    /// a minifier failure keeps the source stylesheet.
    pub fn bundle(minify: bool) -> Vec<Asset> {
        let css = Self::generate_css();
        let css = if minify {
            match Self::minify_css(&css) {
                Ok(minified) => minified,
                Err(e) => {
                    tracing::warn!("Keeping unminified CSS: {}", e);
                    css
                }
            }
        } else {
            css
        };

        vec![
            Asset {
                name: "main.css",
                content_type: "text/css",
                body: css,
            },
            Asset {
                name: "main.js",
                content_type: "application/javascript",
                body: Self::generate_js(),
            },
            Asset {
                name: "intellij-idea-beam.svg",
                content_type: "image/svg+xml",
                body: Self::splash_svg(),
            },
        ]
    }
}

// Complements Bulma, which is loaded from the configured stylesheets.
const DEFAULT_CSS: &str = r#"/* IntelliJ IDEA Guide */

:root {
  --guide-accent: #fe2857;
  --guide-dark: #1e1e1e;
}

body {
  display: flex;
  flex-direction: column;
  min-height: 100vh;
}

.site-content {
  flex: 1;
}

.navbar.is-guide {
  background: var(--guide-dark);
}

.navbar.is-guide .navbar-item,
.navbar.is-guide .navbar-link {
  color: #ffffff;
}

.bulmaio-menu-label {
  margin-left: 0.25rem;
}

.bio-dropdown-main {
  cursor: default;
}

.bio-dropdown-description {
  font-size: 0.85rem;
  color: #7a7a7a;
}

.hero.is-medium .title {
  font-size: 3rem;
}

.card {
  height: 100%;
}

.card a:hover h1 {
  color: var(--guide-accent);
}

.footer {
  padding: 2rem 1.5rem;
}
"#;

const DEFAULT_JS: &str = r#"// IntelliJ IDEA Guide - Runtime JavaScript
(function() {
  'use strict';

  // Mobile navbar toggle
  document.querySelectorAll('.navbar-burger').forEach(burger => {
    burger.addEventListener('click', () => {
      const target = document.getElementById(burger.dataset.target);
      burger.classList.toggle('is-active');
      if (target) {
        target.classList.toggle('is-active');
      }
    });
  });

  // Highlight current section
  const currentPath = window.location.pathname;
  document.querySelectorAll('.navbar-start a.navbar-item').forEach(link => {
    const href = link.getAttribute('href');
    if (href && href !== '/' && currentPath.startsWith(href)) {
      link.classList.add('is-active');
    }
  });
})();
"#;

const SPLASH_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 1600 600" preserveAspectRatio="xMidYMid slice">
  <defs>
    <linearGradient id="beam" x1="0" y1="0" x2="1" y2="1">
      <stop offset="0" stop-color="#087cfa"/>
      <stop offset="0.5" stop-color="#fe2857"/>
      <stop offset="1" stop-color="#fc801d"/>
    </linearGradient>
  </defs>
  <rect width="1600" height="600" fill="#000000"/>
  <polygon points="700,0 1600,0 1600,600 1050,600" fill="url(#beam)" opacity="0.85"/>
  <polygon points="950,0 1600,0 1600,360" fill="#ffffff" opacity="0.08"/>
</svg>
"##;
