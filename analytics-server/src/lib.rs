//! # Student Analytics Server Library
//!
//! Router, handlers and shared state of the analytics HTTP service.
//! This library is used by both the binary and integration tests.
//!
//! ## Endpoints
//!
//! | Method | Path | Returns |
//! |--------|------|---------|
//! | POST | `/api/charts/{line,bar,double-bar,pie}` | chart envelope |
//! | POST | `/api/analysis/{grades,courses,prediction,scholarship}` | analysis |
//! | POST | `/api/analysis/{grades,courses,prediction}/chart` | analysis + chart |
//! | GET | `/health/live`, `/health/ready`, `/health` | probes |
//! | GET | `/metrics` | Prometheus text |

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::sync::Arc;

use analytics_charts::ChartEngine;
use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

pub mod config;
pub mod error;
pub mod health;
pub mod metrics;
pub mod models;
pub mod routes;
pub mod validation;

pub use config::ServerConfig;
pub use error::ApiError;
pub use validation::ValidationError;

use models::Dimensions;
use validation::{validate_dimensions, MAX_BODY_BYTES};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ServerConfig>,
    metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// State without a metrics recorder.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
            metrics: None,
        }
    }

    /// Attach the Prometheus handle served at `/metrics`.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get a reference to the optional Prometheus handle.
    #[must_use]
    pub fn metrics(&self) -> Option<&PrometheusHandle> {
        self.metrics.as_ref()
    }

    /// Chart engine for the requested size, falling back to the configured
    /// defaults for missing dimensions.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the resolved size is out of range.
    pub fn engine(&self, size: Dimensions) -> Result<ChartEngine, ValidationError> {
        let (default_width, default_height) = self.config.default_size();
        let width = size.width.unwrap_or(default_width);
        let height = size.height.unwrap_or(default_height);
        validate_dimensions(width, height)?;
        Ok(ChartEngine::new(width, height))
    }
}

/// Build a CORS layer that only allows localhost origins.
fn build_cors_layer(port: u16) -> CorsLayer {
    let localhost_origins = [
        format!("http://localhost:{port}"),
        format!("http://127.0.0.1:{port}"),
        // common dev servers
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(),
        "http://127.0.0.1:3000".to_string(),
        "http://127.0.0.1:5173".to_string(),
    ];

    let origins: Vec<HeaderValue> = localhost_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

/// Prometheus metrics endpoint.
#[tracing::instrument(name = "metrics", skip(handle))]
async fn metrics_handler(State(handle): State<PrometheusHandle>) -> String {
    handle.render()
}

/// Build the application router.
///
/// `/metrics` is only mounted when the state carries a Prometheus handle.
pub fn build_router(state: AppState) -> Router {
    let chart_routes = Router::new()
        .route("/line", post(routes::charts::line_chart))
        .route("/bar", post(routes::charts::bar_chart))
        .route("/double-bar", post(routes::charts::double_bar_chart))
        .route("/pie", post(routes::charts::pie_chart));

    let analysis_routes = Router::new()
        .route("/grades", post(routes::analysis::grades))
        .route("/grades/chart", post(routes::analysis::grades_chart))
        .route("/courses", post(routes::analysis::courses))
        .route("/courses/chart", post(routes::analysis::courses_chart))
        .route("/prediction", post(routes::analysis::prediction))
        .route(
            "/prediction/chart",
            post(routes::analysis::prediction_chart),
        )
        .route("/scholarship", post(routes::analysis::scholarship));

    let mut app = Router::new()
        // Health check endpoints (Kubernetes probes)
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .route("/health", get(health::readiness))
        .nest("/api/charts", chart_routes)
        .nest("/api/analysis", analysis_routes);

    if let Some(handle) = state.metrics.clone() {
        let metrics_router = Router::new()
            .route("/metrics", get(metrics_handler))
            .with_state(handle);
        app = app.merge(metrics_router);
    }

    let port = state.config.port;
    app.layer(
        ServiceBuilder::new()
            // Request ID for tracing correlation
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            // Structured request tracing with timing
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_request(DefaultOnRequest::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(build_cors_layer(port))
            .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
    )
    .with_state(state)
}

/// Analytics server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
