//! Consulta de Prazos web service.
//!
//! Serves the order lookup form and a JSON endpoint over the production
//! forecast spreadsheet.

use anyhow::Result;
use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header, Method},
    response::Json,
    routing::{get, post},
    serve, Router,
};
use prazos_utils::{init_logging, AppConfig, OrderLookup, PrazosError};
use serde_json::json;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

mod error;
mod handlers;
mod markup;
mod metrics;
mod middleware;
mod page;
mod routes;

use handlers::{index, submit};
use metrics::Metrics;
use middleware::*;
use page::PageRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(PrazosError::from(e))),
    };

    init_logging(&config.logging)?;
    if let Some(err) = config_error {
        warn!(error = %err, code = err.error_code(), "Failed to load configuration, using defaults");
    }
    info!(
        mode = config.app.mode.as_str(),
        source = %config.lookup.source_path.display(),
        "Starting Consulta de Prazos"
    );

    let ip: IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::new(ip, config.server.port);
    let app = create_app(config)?;

    let listener = TcpListener::bind(&addr).await?;
    info!("Consulta de Prazos listening on {}", addr);

    serve(listener, app).await?;

    Ok(())
}

fn create_app(config: AppConfig) -> Result<Router> {
    let max_request_size = config.server.max_request_size;
    let state = AppState {
        lookup: OrderLookup::new(config.lookup.source_path.clone(), config.forecast.clone()),
        pages: Arc::new(PageRenderer::new()?),
        metrics: Metrics::new()?,
        config: Arc::new(config),
    };

    let app = Router::new()
        .route("/", get(index))
        .route("/consultar", post(submit))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .nest("/api/v1", routes::create_api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([Method::GET, Method::POST])
                        .allow_headers([header::CONTENT_TYPE]),
                )
                .layer(DefaultBodyLimit::max(max_request_size))
                .layer(axum::middleware::from_fn(request_id_middleware)),
        )
        .with_state(state);

    Ok(app)
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub lookup: OrderLookup,
    pub pages: Arc<PageRenderer>,
    pub metrics: Metrics,
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "source_present": state.lookup.source_path().is_file(),
        "service": "consulta-prazos",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "mode": state.config.app.mode.as_str(),
    }))
}

async fn metrics_handler(State(state): State<AppState>) -> String {
    state.metrics.encode()
}
