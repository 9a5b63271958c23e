//! # rustful-server
//!
//! Upload a CSV, pick a date column, a value column and a model, and get a
//! forecast back: as an HTML page with an SVG chart at `/`, or as JSON
//! under `/api/v1`.

pub mod chart;
pub mod config;
pub mod error;
pub mod health;
pub mod page;
pub mod routes;
pub mod upload;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ErrorResponse};

/// Room for the multipart framing and text fields on top of the file itself
pub const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Application state shared across handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
}

/// Build the router with middleware.
pub fn create_router(config: ServerConfig) -> Router {
    let body_limit = config.max_upload_bytes.saturating_add(FORM_OVERHEAD_BYTES);
    let state = AppState {
        config: Arc::new(config),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::index).post(routes::submit))
        // Health endpoints (Kubernetes-compatible)
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .route("/health", get(health::liveness))
        // API endpoints
        .route("/api/v1/columns", post(routes::columns))
        .route("/api/v1/forecast", post(routes::forecast))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind `config.socket_addr()` and serve until the process stops.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let app = create_router(config);

    tracing::info!("rustful-server v{} listening on {}", env!("CARGO_PKG_VERSION"), addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
