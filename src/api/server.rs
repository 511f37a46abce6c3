//! Gridmap API Server implementation
//!
//! HTTP REST API server using Axum. The stateless endpoints shape grids and
//! map records sent in the request body; the `/api/v1/sheets` endpoints work
//! against one workbook held in memory for the lifetime of the server.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers;
use crate::sheet::{MemoryWorkbook, Workbook};

/// API Server configuration
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Workbook to serve from `/api/v1/sheets`; an empty one when unset
    pub workbook: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workbook: None,
        }
    }
}

impl ApiConfig {
    fn addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

/// Shared application state
pub struct AppState {
    pub version: String,
    pub book: MemoryWorkbook,
}

impl AppState {
    pub fn new(book: Workbook) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            book: MemoryWorkbook::new(book),
        }
    }
}

/// Build the router with all endpoints and middleware
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/version", get(handlers::version))
        // Stateless
        .route("/api/v1/shape", post(handlers::shape))
        .route("/api/v1/records", post(handlers::records))
        .route("/api/v1/column", post(handlers::column))
        .route("/api/v1/color", post(handlers::color))
        .route("/api/v1/sheet-id", post(handlers::sheet_id))
        .route("/api/v1/map", post(handlers::map))
        // Served workbook
        .route("/api/v1/sheets", get(handlers::list_sheets))
        .route("/api/v1/sheets/:name/read", post(handlers::read_sheet))
        .route("/api/v1/sheets/:name/append", post(handlers::append_sheet))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Run the API server
pub async fn run_api_server(config: ApiConfig) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "gridmap_server=info,royalbit_gridmap=info,tower_http=info".into()
            }),
        )
        .init();

    let book = match &config.workbook {
        Some(path) => {
            let book = Workbook::load(path)?;
            info!(path = %path.display(), sheets = book.sheets.len(), "serving workbook");
            book
        }
        None => Workbook::default(),
    };

    let app = router(Arc::new(AppState::new(book)));
    let addr = config.addr()?;
    info!("Gridmap API Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gridmap API Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server...");
}
