//! Page and navigation components for the IntelliJ IDEA Guide.
//!
//! Components produce an owned markup tree. Pages hand their metadata and
//! named slots to a [`LayoutHost`], which wraps them in the shared page shell.

pub mod home;
pub mod layout;
pub mod markup;
pub mod navbar;
pub mod page;

pub use home::{HomePage, PAGE_TITLE, SPLASH_ASSET, SUBTITLE};
pub use layout::{LayoutError, LayoutHost, LayoutProps, Slot, Slots, TwitterCardPage};
pub use markup::{Element, Fragment, Node};
pub use navbar::{
    NavbarItems, NavbarMenuItem, NavbarStart, NavbarStartProps, NavbarSubMenu, NAV_TARGETS,
};
pub use page::{registered_pages, Page, PageOutput};
