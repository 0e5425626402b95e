//! Serving a built site, and the listener plumbing shared with the dev server.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use axum::{
    handler::HandlerWithoutStateExt,
    http::StatusCode,
    response::{Html, IntoResponse},
    Router,
};
use tower_http::services::ServeDir;

use crate::server::ServerError;

/// Parse `host:port` into a socket address.
pub fn socket_addr(host: &str, port: u16) -> Result<SocketAddr, ServerError> {
    let addr = format!("{}:{}", host, port);
    addr.parse().map_err(|_| ServerError::InvalidAddress(addr))
}

/// Router serving files under `dir`. Directories resolve to their
/// `index.html`; anything else missing gets a 404 page.
pub fn static_router(dir: &Path) -> Router {
    let files = ServeDir::new(dir).not_found_service(not_found.into_service());
    Router::new().fallback_service(files)
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Html("<!DOCTYPE html><html><body><h1>404</h1><p>Page not found.</p></body></html>"),
    )
}

/// Bind `addr`, optionally open a browser on it, then serve `app` until the
/// process is stopped.
pub(crate) async fn serve(addr: SocketAddr, app: Router, open_browser: bool) -> Result<(), ServerError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

    if open_browser {
        let url = format!("http://{}", addr);
        if let Err(e) = open::that(&url) {
            tracing::debug!("Could not open browser: {}", e);
        }
    }

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::ServeError(e.to_string()))
}

/// Static server for a finished build.
#[derive(Debug, Clone)]
pub struct PreviewServer {
    dir: PathBuf,
    addr: SocketAddr,
    open: bool,
}

impl PreviewServer {
    pub fn new(dir: PathBuf, host: &str, port: u16, open: bool) -> Result<Self, ServerError> {
        Ok(Self {
            dir,
            addr: socket_addr(host, port)?,
            open,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn router(&self) -> Router {
        static_router(&self.dir)
    }

    /// Serve the build directory. Fails before binding when it does not exist.
    pub async fn start(self) -> Result<(), ServerError> {
        if !self.dir.is_dir() {
            return Err(ServerError::MissingDirectory(self.dir));
        }

        tracing::info!("Serving {} at http://{}", self.dir.display(), self.addr);

        serve(self.addr, self.router(), self.open).await
    }
}
