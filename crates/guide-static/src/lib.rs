//! Static site builder for the IntelliJ IDEA Guide.
//!
//! Wraps registered pages in the homepage layout, writes them with their
//! assets, and checks that every internal link resolves in the output tree.

pub mod assets;
pub mod builder;
pub mod links;
pub mod render;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, StaticBuilder};
pub use links::{check_links, BrokenLink};
pub use render::{route_to_output_path, SiteRenderer};
pub use templates::{HomepageLayout, SiteChrome, TemplateEngine};
