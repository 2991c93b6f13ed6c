//! Development server implementation.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use tower_http::services::ServeDir;

use folio_render::{App, ContentSource, DirSource, HostDocument, HttpSource};
use folio_static::{AssetPipeline, BEHAVIORS_SCRIPT_PATH};

use crate::watcher::{FileWatcher, WatchEvent};
use crate::websocket::{hmr_client_script, HmrHub, HmrMessage};

/// Path of the live reload WebSocket endpoint.
const HMR_PATH: &str = "/__hmr";

/// Configuration for the development server.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Site directory holding the host page, `data/` and static assets
    pub site_dir: PathBuf,

    /// Host page file name, relative to the site directory
    pub page: String,

    /// Fetch documents from this base URL instead of the site directory
    pub base_url: Option<String>,

    /// Serve and link the UI behaviors script
    pub behaviors: bool,

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
            site_dir: PathBuf::from("site"),
            page: "index.html".to_string(),
            base_url: None,
            behaviors: true,
            port: 7777,
            host: "127.0.0.1".to_string(),
            open: true,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("File watch error: {0}")]
    WatchError(String),

    #[error("Invalid content source: {0}")]
    SourceError(String),

    #[error("Failed to render page: {0}")]
    RenderError(String),
}

/// Shared server state.
struct ServerState {
    config: DevServerConfig,
    hmr: HmrHub,
    app: App,
}

impl ServerState {
    fn new(config: DevServerConfig) -> Result<Self, ServerError> {
        let source: Arc<dyn ContentSource> = match &config.base_url {
            Some(url) => Arc::new(
                HttpSource::new(url).map_err(|e| ServerError::SourceError(e.to_string()))?,
            ),
            None => Arc::new(DirSource::new(&config.site_dir)),
        };

        Ok(Self {
            config,
            hmr: HmrHub::new(),
            app: App::new(source),
        })
    }

    /// Render the host page with freshly fetched documents.
    async fn render_page(&self) -> Result<String, ServerError> {
        let page_path = self.config.site_dir.join(&self.config.page);
        let html = tokio::fs::read_to_string(&page_path)
            .await
            .map_err(|e| ServerError::RenderError(format!("{}: {}", page_path.display(), e)))?;

        let rendered = self.app.run(HostDocument::parse(html)).await;
        let (mut document, report) = rendered.into_parts();

        tracing::debug!(
            "Rendered {} sections ({} failed) in {:?}",
            report.rendered(),
            report.failed(),
            report.duration
        );

        if self.config.behaviors && !document.html().contains(BEHAVIORS_SCRIPT_PATH) {
            document.insert_before_body_end(&format!(
                "<script src=\"/{}\" defer></script>\n",
                BEHAVIORS_SCRIPT_PATH
            ));
        }
        document.insert_before_body_end(&format!("<script src=\"{}.js\"></script>\n", HMR_PATH));

        Ok(document.into_html())
    }
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

    /// Start the development server.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|e| ServerError::InvalidAddress(format!("{}", e)))?;

        let state = Arc::new(ServerState::new(self.config.clone())?);

        // Set up file watcher
        let watch_paths = vec![self.config.site_dir.clone()];

        let (watcher, mut rx) = FileWatcher::new(&watch_paths, &self.config.page)
            .map_err(|e| ServerError::WatchError(e.to_string()))?;

        let hmr = state.hmr.clone();
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                handle_watch_event(&hmr, event);
            }
            // Keep watcher alive
            drop(watcher);
        });

        let app = router(state, &self.config);

        tracing::info!("Starting dev server at http://{}", addr);

        if self.config.open {
            let url = format!("http://{}", addr);
            if let Err(e) = open::that(&url) {
                tracing::warn!("Failed to open browser: {}", e);
            }
        }

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}

fn router(state: Arc<ServerState>, config: &DevServerConfig) -> Router {
    let mut router = Router::new()
        .route("/", get(index_handler))
        .route(&format!("/{}", config.page), get(index_handler))
        .route(HMR_PATH, get(ws_handler))
        .route(&format!("{}.js", HMR_PATH), get(hmr_script_handler));

    if config.behaviors {
        router = router.route(
            &format!("/{}", BEHAVIORS_SCRIPT_PATH),
            get(behaviors_script_handler),
        );
    }

    router
        .fallback_service(ServeDir::new(&config.site_dir))
        .with_state(state)
}

/// Forward one file change to connected clients.
fn handle_watch_event(hmr: &HmrHub, event: WatchEvent) {
    match event {
        WatchEvent::DataModified(section, path) => {
            tracing::info!("Document modified: {}", path.display());
            hmr.send(HmrMessage::SectionChanged {
                section: section.name().to_string(),
            });
        }

        WatchEvent::PageModified(path) => {
            tracing::info!("Host page modified: {}", path.display());
            hmr.send(HmrMessage::Reload);
        }

        WatchEvent::Created(_) | WatchEvent::Deleted(_) | WatchEvent::Modified(_) => {
            hmr.send(HmrMessage::Reload);
        }
    }
}

/// Handler for the host page.
async fn index_handler(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    match state.render_page().await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("{}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Handler for the live reload WebSocket endpoint.
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

/// Handle a WebSocket connection.
async fn handle_ws(mut socket: WebSocket, state: Arc<ServerState>) {
    let mut rx = state.hmr.subscribe();

    if send_message(&mut socket, &HmrMessage::Connected).await.is_err() {
        return;
    }

    // Forward reload messages to the client
    while let Ok(msg) = rx.recv().await {
        if send_message(&mut socket, &msg).await.is_err() {
            break;
        }
    }
}

async fn send_message(socket: &mut WebSocket, msg: &HmrMessage) -> Result<(), axum::Error> {
    let json = serde_json::to_string(msg).map_err(axum::Error::new)?;
    socket.send(Message::Text(json.into())).await
}

/// Handler for the live reload client script.
async fn hmr_script_handler() -> impl IntoResponse {
    (
        [("content-type", "application/javascript")],
        hmr_client_script(HMR_PATH),
    )
}

/// Handler for the UI behaviors script.
async fn behaviors_script_handler() -> impl IntoResponse {
    (
        [("content-type", "application/javascript")],
        AssetPipeline::generate_js(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const HOST: &str = r#"<html><head><title>Loading</title></head>
<body><span id="nav-brand">Brand</span><ul id="nav-menu"></ul></body></html>"#;

    fn site() -> (tempfile::TempDir, DevServerConfig) {
        let temp = tempdir().unwrap();
        let site = temp.path().join("site");
        fs::create_dir_all(site.join("data")).unwrap();
        fs::write(site.join("index.html"), HOST).unwrap();
        fs::write(
            site.join("data/navigation.json"),
            r##"{"brand": {"name": "JD"}, "menuItems": []}"##,
        )
        .unwrap();
        fs::write(site.join("data/site-config.json"), r#"{"title": "Jane"}"#).unwrap();

        let config = DevServerConfig {
            site_dir: site,
            open: false,
            ..Default::default()
        };
        (temp, config)
    }

    #[test]
    fn creates_server_with_default_config() {
        let server = DevServer::new(DevServerConfig::default());
        assert_eq!(server.config.port, 7777);
        assert_eq!(server.config.page, "index.html");
    }

    #[tokio::test]
    async fn renders_page_with_scripts() {
        let (_temp, config) = site();
        let state = ServerState::new(config).unwrap();

        let html = state.render_page().await.unwrap();

        assert!(html.contains("<title>Jane</title>"));
        assert!(html.contains(r#"<span id="nav-brand">JD</span>"#));
        assert!(html.contains(r#"<script src="/assets/folio.js" defer></script>"#));
        assert!(html.contains(r#"<script src="/__hmr.js"></script>"#));
    }

    #[tokio::test]
    async fn rerenders_after_document_change() {
        let (_temp, config) = site();
        let data = config.site_dir.join("data/site-config.json");
        let state = ServerState::new(config).unwrap();

        state.render_page().await.unwrap();
        fs::write(&data, r#"{"title": "Updated"}"#).unwrap();
        let html = state.render_page().await.unwrap();

        assert!(html.contains("<title>Updated</title>"));
    }

    #[tokio::test]
    async fn missing_page_is_a_render_error() {
        let (_temp, mut config) = site();
        config.page = "missing.html".to_string();
        let state = ServerState::new(config).unwrap();

        assert!(matches!(
            state.render_page().await,
            Err(ServerError::RenderError(_))
        ));
    }

    #[test]
    fn rejects_invalid_base_url() {
        let config = DevServerConfig {
            base_url: Some("::not a url".to_string()),
            ..Default::default()
        };

        assert!(matches!(
            ServerState::new(config),
            Err(ServerError::SourceError(_))
        ));
    }

    #[test]
    fn data_changes_name_the_section() {
        let hub = HmrHub::new();
        let mut rx = hub.subscribe();

        handle_watch_event(
            &hub,
            WatchEvent::DataModified(folio_content::Section::Hero, PathBuf::from("data/hero.json")),
        );
        handle_watch_event(&hub, WatchEvent::PageModified(PathBuf::from("index.html")));

        assert_eq!(
            rx.try_recv().unwrap(),
            HmrMessage::SectionChanged {
                section: "hero".to_string()
            }
        );
        assert_eq!(rx.try_recv().unwrap(), HmrMessage::Reload);
    }
}
