//! Renders registered pages through a layout host.

use std::path::{Path, PathBuf};

use guide_components::{registered_pages, LayoutError, LayoutHost, Page};

/// Pages bound to the layout host that wraps them.
pub struct SiteRenderer {
    layout: Box<dyn LayoutHost>,
    pages: Vec<Box<dyn Page>>,
}

impl SiteRenderer {
    /// Renderer over every registered page.
    pub fn new(layout: Box<dyn LayoutHost>) -> Self {
        Self::with_pages(layout, registered_pages())
    }

    /// Renderer over an explicit page set.
    pub fn with_pages(layout: Box<dyn LayoutHost>, pages: Vec<Box<dyn Page>>) -> Self {
        Self { layout, pages }
    }

    /// Routes of every page, in registration order.
    pub fn routes(&self) -> Vec<&str> {
        self.pages.iter().map(|p| p.route()).collect()
    }

    /// Pages known to this renderer.
    pub fn pages(&self) -> &[Box<dyn Page>] {
        &self.pages
    }

    /// Render one page into a full document.
    pub fn render_page(&self, page: &dyn Page) -> Result<String, LayoutError> {
        let output = page.render();
        self.layout.render(&output.props, &output.slots)
    }

    /// Render the page mounted at `route`, if any.
    pub fn render(&self, route: &str) -> Option<Result<String, LayoutError>> {
        let route = normalize_route(route);
        self.pages
            .iter()
            .find(|p| normalize_route(p.route()) == route)
            .map(|page| {
                tracing::debug!("Rendering {} with {} layout", route, self.layout.name());
                self.render_page(page.as_ref())
            })
    }
}

/// Strip a trailing slash and `index.html` so `/topics/` matches `/topics`.
fn normalize_route(route: &str) -> &str {
    let route = route.strip_suffix("index.html").unwrap_or(route);
    match route.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

/// File that serves `route` under `output_dir`: `/` maps to `index.html`,
/// `/x` maps to `x/index.html`.
pub fn route_to_output_path(output_dir: &Path, route: &str) -> PathBuf {
    let relative = normalize_route(route).trim_start_matches('/');
    if relative.is_empty() {
        output_dir.join("index.html")
    } else {
        output_dir.join(relative).join("index.html")
    }
}
