//! Page metadata, named slots and the layout host seam.

use serde::Serialize;

use crate::markup::Fragment;

/// Title, description and image used for social link previews.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TwitterCardPage {
    /// Card title
    pub title: String,
    /// Card description
    pub description: String,
    /// Preview image URI; empty when the page has none
    pub image: String,
}

/// Metadata a page passes to the layout host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LayoutProps {
    /// Document title
    pub title: String,
    /// Social card metadata
    pub twitter_card_page: TwitterCardPage,
}

/// Named regions of the page shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Hero,
    Main,
}

impl Slot {
    /// Slot name as used by templates.
    pub fn name(self) -> &'static str {
        match self {
            Slot::Hero => "hero",
            Slot::Main => "main",
        }
    }
}

/// Content for every slot of the page shell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slots {
    pub hero: Fragment,
    pub main: Fragment,
}

impl Slots {
    /// Fragment supplied for `slot`.
    pub fn get(&self, slot: Slot) -> &Fragment {
        match slot {
            Slot::Hero => &self.hero,
            Slot::Main => &self.main,
        }
    }

    /// Slots in placement order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &Fragment)> {
        [Slot::Hero, Slot::Main]
            .into_iter()
            .map(move |slot| (slot, self.get(slot)))
    }
}

/// Errors raised while composing the page shell.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("Template error: {0}")]
    Template(String),
}

/// Renders a full page (head, navigation, footer) around a page's slots.
pub trait LayoutHost: Send + Sync {
    /// Layout identifier (e.g., "homepage")
    fn name(&self) -> &'static str;

    /// Compose the complete HTML document.
    fn render(&self, props: &LayoutProps, slots: &Slots) -> Result<String, LayoutError>;
}
