//! Page modules and the registry of pages the site ships.

use crate::home::HomePage;
use crate::layout::{LayoutProps, Slots};

/// What a page hands to the layout host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOutput {
    /// Page metadata
    pub props: LayoutProps,
    /// Slot content
    pub slots: Slots,
}

/// A page module mounted at a fixed route.
pub trait Page: Send + Sync {
    /// Route the page is served at, e.g. `/`.
    fn route(&self) -> &str;

    /// Produce the page's metadata and slot content.
    fn render(&self) -> PageOutput;
}

/// Every page module the site ships, in route order.
pub fn registered_pages() -> Vec<Box<dyn Page>> {
    vec![Box::new(HomePage)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_home_page_at_root() {
        let pages = registered_pages();

        let routes: Vec<_> = pages.iter().map(|p| p.route()).collect();

        assert_eq!(routes, vec!["/"]);
    }
}
