//! Development server implementation.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};

use guide_static::assets::{Asset, AssetPipeline};
use guide_static::{HomepageLayout, SiteChrome, SiteRenderer};

use crate::preview::{serve, socket_addr, static_router};
use crate::reload::{next_message, reload_client_script, ReloadHub, ReloadMessage};
use crate::watcher::{FileWatcher, WatchEvent};

const RELOAD_PATH: &str = "/__reload";
const RELOAD_SCRIPT_PATH: &str = "/__reload.js";

/// Configuration for the development server.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Pre-built pages and files served after registered routes
    pub static_dir: PathBuf,

    /// Site configuration; changes to it ask for a restart instead of a reload
    pub config_file: Option<PathBuf>,

    /// Extra paths whose changes trigger a reload
    pub watch_paths: Vec<PathBuf>,

    /// Navbar, stylesheets and footer shared by every page
    pub chrome: SiteChrome,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from("static"),
            config_file: Some(PathBuf::from("guide.toml")),
            watch_paths: vec![],
            chrome: SiteChrome::default(),
            port: 7777,
            host: "127.0.0.1".to_string(),
            open: true,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("Server error: {0}")]
    ServeError(String),

    #[error("Directory not found: {0}. Run 'guide build' first.")]
    MissingDirectory(PathBuf),

    #[error("File watch error: {0}")]
    WatchError(String),

    #[error("Render error: {0}")]
    RenderError(String),
}

/// Shared server state.
struct ServerState {
    renderer: SiteRenderer,
    assets: Vec<Asset>,
    hub: ReloadHub,
}

/// Development server.
pub struct DevServer {
    config: DevServerConfig,
}

impl DevServer {
    /// Create a new development server.
    pub fn new(config: DevServerConfig) -> Self {
        Self { config }
    }

    /// Address the server binds to.
    pub fn addr(&self) -> Result<SocketAddr, ServerError> {
        socket_addr(&self.config.host, self.config.port)
    }

    /// Start the development server.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr = self.addr()?;

        let state = Arc::new(self.state()?);

        if !self.config.static_dir.is_dir() {
            tracing::warn!(
                "Static directory {} does not exist; only rendered pages will be served",
                self.config.static_dir.display()
            );
        }

        let mut watch_paths = vec![self.config.static_dir.clone()];
        watch_paths.extend(self.config.config_file.iter().cloned());
        watch_paths.extend(self.config.watch_paths.iter().cloned());

        let (watcher, mut rx) = FileWatcher::new(&watch_paths, self.config.config_file.as_deref())
            .map_err(|e| ServerError::WatchError(e.to_string()))?;

        let hub = state.hub.clone();
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                handle_watch_event(&hub, event);
            }
            // Keep watcher alive
            drop(watcher);
        });

        let app = self.router(state);

        tracing::info!("Starting dev server at http://{}", addr);

        serve(addr, app, self.config.open).await
    }

    fn state(&self) -> Result<ServerState, ServerError> {
        let mut chrome = self.config.chrome.clone();
        chrome
            .head_extra
            .push(format!(r#"<script src="{}"></script>"#, RELOAD_SCRIPT_PATH));

        let layout =
            HomepageLayout::new(chrome).map_err(|e| ServerError::RenderError(e.to_string()))?;

        Ok(ServerState {
            renderer: SiteRenderer::new(Box::new(layout)),
            assets: AssetPipeline::bundle(false),
            hub: ReloadHub::new(),
        })
    }

    fn router(&self, state: Arc<ServerState>) -> Router {
        let mut app = Router::new()
            .route(RELOAD_PATH, get(ws_handler))
            .route(RELOAD_SCRIPT_PATH, get(reload_script_handler))
            .route("/assets/{name}", get(asset_handler));

        for route in state.renderer.routes() {
            app = app.route(route, get(page_handler));
        }

        app.with_state(state)
            .fallback_service(static_router(&self.config.static_dir))
    }
}

/// Turn a file change into a browser notification.
fn handle_watch_event(hub: &ReloadHub, event: WatchEvent) {
    let msg = match event {
        WatchEvent::ConfigModified(path) => {
            tracing::warn!(
                "{} changed; restart the dev server to apply configuration",
                path.display()
            );
            ReloadMessage::RestartRequired {
                path: path.display().to_string(),
            }
        }
        WatchEvent::Created(path) | WatchEvent::Deleted(path) | WatchEvent::Modified(path) => {
            tracing::info!("Changed: {}", path.display());
            ReloadMessage::Reload {
                path: path.display().to_string(),
            }
        }
    };

    hub.broadcast(msg);
}

/// Render the page registered for the request path.
async fn page_handler(State(state): State<Arc<ServerState>>, uri: Uri) -> Response {
    match state.renderer.render(uri.path()) {
        Some(Ok(html)) => Html(html).into_response(),
        Some(Err(e)) => {
            tracing::error!("Failed to render {}: {}", uri.path(), e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Serve a generated asset from memory.
async fn asset_handler(
    State(state): State<Arc<ServerState>>,
    Path(name): Path<String>,
) -> Response {
    match state.assets.iter().find(|a| a.name == name) {
        Some(asset) => ([("content-type", asset.content_type)], asset.body.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Handler for the reload WebSocket endpoint.
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let rx = state.hub.subscribe();
    ws.on_upgrade(move |socket| handle_ws(socket, rx))
}

/// Forward reload messages to one connected browser.
async fn handle_ws(
    mut socket: WebSocket,
    mut rx: tokio::sync::broadcast::Receiver<ReloadMessage>,
) {
    if !send_message(&mut socket, &ReloadMessage::Connected).await {
        return;
    }

    while let Some(msg) = next_message(&mut rx).await {
        if !send_message(&mut socket, &msg).await {
            break;
        }
    }
}

async fn send_message(socket: &mut WebSocket, msg: &ReloadMessage) -> bool {
    let Ok(json) = serde_json::to_string(msg) else {
        return false;
    };
    socket.send(Message::Text(json.into())).await.is_ok()
}

/// Handler for the reload client script.
async fn reload_script_handler() -> impl IntoResponse {
    (
        [("content-type", "application/javascript")],
        reload_client_script(RELOAD_PATH),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use std::fs;
    use tempfile::tempdir;
    use tower::ServiceExt;

    #[test]
    fn creates_server_with_default_config() {
        let server = DevServer::new(DevServerConfig::default());

        assert_eq!(server.config.port, 7777);
        assert_eq!(server.addr().unwrap().to_string(), "127.0.0.1:7777");
    }

    #[test]
    fn rejects_invalid_host() {
        let server = DevServer::new(DevServerConfig {
            host: "not a host".to_string(),
            ..Default::default()
        });

        assert!(matches!(server.addr(), Err(ServerError::InvalidAddress(_))));
    }

    #[test]
    fn injects_reload_script_into_pages() {
        let server = DevServer::new(DevServerConfig::default());
        let state = server.state().unwrap();

        let html = state.renderer.render("/").unwrap().unwrap();

        assert!(html.contains(r#"<script src="/__reload.js"></script>"#));
    }

    #[test]
    fn serves_unminified_assets() {
        let server = DevServer::new(DevServerConfig::default());
        let state = server.state().unwrap();

        let css = state.assets.iter().find(|a| a.name == "main.css").unwrap();

        assert_eq!(css.body, AssetPipeline::generate_css());
    }

    #[tokio::test]
    async fn file_changes_reload_and_config_changes_ask_for_restart() {
        let hub = ReloadHub::new();
        let mut rx = hub.subscribe();

        handle_watch_event(&hub, WatchEvent::Modified(PathBuf::from("static/tips/index.html")));
        handle_watch_event(&hub, WatchEvent::ConfigModified(PathBuf::from("site.toml")));

        assert_eq!(
            rx.recv().await.unwrap(),
            ReloadMessage::Reload {
                path: "static/tips/index.html".to_string()
            }
        );
        assert_eq!(
            rx.recv().await.unwrap(),
            ReloadMessage::RestartRequired {
                path: "site.toml".to_string()
            }
        );
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, content_type, String::from_utf8_lossy(&body).into_owned())
    }

    fn site_with_about_page() -> (tempfile::TempDir, DevServer) {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("about")).unwrap();
        fs::write(temp.path().join("about/index.html"), "<h1>About</h1>").unwrap();

        let server = DevServer::new(DevServerConfig {
            static_dir: temp.path().to_path_buf(),
            open: false,
            ..Default::default()
        });
        (temp, server)
    }

    #[tokio::test]
    async fn router_renders_home_page() {
        let (_temp, server) = site_with_about_page();
        let app = server.router(Arc::new(server.state().unwrap()));

        let (status, _, body) = get(app, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<title>Home Page - IntelliJ IDEA Guide</title>"));
        assert!(body.contains(r#"<script src="/__reload.js"></script>"#));
    }

    #[tokio::test]
    async fn router_serves_generated_assets() {
        let (_temp, server) = site_with_about_page();
        let state = Arc::new(server.state().unwrap());

        let (status, content_type, body) = get(server.router(state.clone()), "/assets/main.css").await;
        assert_eq!(status, StatusCode::OK);
        assert!(content_type.unwrap().starts_with("text/css"));
        assert_eq!(body, AssetPipeline::generate_css());

        let (status, _, _) = get(server.router(state), "/assets/nope.css").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn router_falls_back_to_static_directory() {
        let (_temp, server) = site_with_about_page();
        let state = Arc::new(server.state().unwrap());

        let (status, _, body) = get(server.router(state.clone()), "/about/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<h1>About</h1>");

        let (status, _, _) = get(server.router(state), "/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn router_serves_reload_script() {
        let (_temp, server) = site_with_about_page();
        let app = server.router(Arc::new(server.state().unwrap()));

        let (status, content_type, body) = get(app, "/__reload.js").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/javascript"));
        assert!(body.contains("'/__reload'"));
    }
}
