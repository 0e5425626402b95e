//! Development server with live reload for the IntelliJ IDEA Guide.
//!
//! Renders registered pages on every request, serves the static directory,
//! and pushes reload notifications over a WebSocket when watched files change.
//! [`PreviewServer`] serves a finished build.

pub mod preview;
pub mod reload;
pub mod server;
pub mod watcher;

pub use preview::{static_router, PreviewServer};
pub use reload::{ReloadHub, ReloadMessage};
pub use server::{DevServer, DevServerConfig, ServerError};
pub use watcher::{FileWatcher, WatchEvent};
