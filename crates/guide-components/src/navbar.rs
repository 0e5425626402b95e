//! Primary navigation rendered at the start of the site navbar.
//!
//! [`NavbarStart`] takes a configurable item list but renders a fixed set of
//! links. Supplied items are ignored; a warning is logged when any are given
//! so the mismatch does not go unnoticed.

use serde::{Deserialize, Serialize};

use crate::markup::{Element, Node};

/// Route targets of the primary navigation, in render order.
pub const NAV_TARGETS: [&str; 5] = ["/tips", "/technologies", "/topics", "/authors", "/about"];

/// A single navbar link as supplied by configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavbarMenuItem {
    /// Display label
    pub label: String,
    /// Target route
    pub href: String,
    /// Font Awesome icon classes
    #[serde(default)]
    pub icon: Option<String>,
    /// Bulma color suffix (e.g. "success")
    #[serde(default)]
    pub color: Option<String>,
}

/// A labeled dropdown grouping several links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavbarSubMenu {
    /// Dropdown label
    pub label: String,
    /// Dropdown entries
    pub items: Vec<NavbarMenuItem>,
}

/// Either a flat list of links or a list of dropdowns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NavbarItems {
    SubMenus(Vec<NavbarSubMenu>),
    MenuItems(Vec<NavbarMenuItem>),
}

impl NavbarItems {
    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        match self {
            NavbarItems::MenuItems(items) => items.len(),
            NavbarItems::SubMenus(menus) => menus.len(),
        }
    }

    /// Whether no entries were supplied.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for NavbarItems {
    fn default() -> Self {
        NavbarItems::MenuItems(Vec::new())
    }
}

/// Props accepted by [`NavbarStart`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavbarStartProps {
    #[serde(default)]
    pub items: NavbarItems,
}

/// A top-level navbar link.
struct NavLink {
    label: &'static str,
    to: &'static str,
    icon: &'static str,
    color: &'static str,
}

const PRIMARY_LINKS: [NavLink; 4] = [
    NavLink {
        label: "Tips",
        to: "/tips",
        icon: "fas fa-play-circle",
        color: "success",
    },
    NavLink {
        label: "Technologies",
        to: "/technologies",
        icon: "fas fa-project-diagram",
        color: "danger",
    },
    NavLink {
        label: "Topics",
        to: "/topics",
        icon: "fas fa-project-diagram",
        color: "primary",
    },
    NavLink {
        label: "Authors",
        to: "/authors",
        icon: "fas fa-users",
        color: "info",
    },
];

/// The navbar's leading link group.
#[derive(Debug, Clone, Copy, Default)]
pub struct NavbarStart;

impl NavbarStart {
    /// Render the navigation. `props.items` does not affect the output.
    pub fn render(props: &NavbarStartProps) -> Node {
        if !props.items.is_empty() {
            tracing::warn!(
                "navbar start ignores {} configured item(s); rendering the built-in links",
                props.items.len()
            );
        }

        Element::new("div")
            .class("navbar-start")
            .children(PRIMARY_LINKS.iter().map(primary_link))
            .child(more_dropdown())
            .into()
    }
}

fn icon(icon: &str, color: &str) -> Element {
    Element::new("span")
        .class(format!("icon has-text-{}", color))
        .child(Element::new("i").class(icon))
}

fn primary_link(link: &NavLink) -> Element {
    Element::new("a")
        .class("navbar-item bd-navbar-item-documentation")
        .href(link.to)
        .child(icon(link.icon, link.color))
        .child(
            Element::new("span")
                .class("bulmaio-menu-label")
                .text(link.label),
        )
}

fn more_dropdown() -> Element {
    let about = Element::new("a").class("navbar-item").href("/about").child(
        Element::new("span")
            .child(icon("fas fa-rocket", "success"))
            .child(Element::new("strong").text("About the Guide"))
            .child(Element::new("br"))
            .child(
                Element::new("span")
                    .class("bio-dropdown-description")
                    .text("Community-driven compendium of PyCharm learning resources"),
            ),
    );

    Element::new("div")
        .class("navbar-item has-dropdown is-hoverable")
        .child(
            Element::new("span")
                .class("navbar-link bio-dropdown-main")
                .text("More"),
        )
        .child(
            Element::new("div")
                .id("moreDropdown")
                .class("navbar-dropdown")
                .child(about),
        )
}
