//! Prometheus metrics for analytics-server.
//!
//! Provides metrics collection and a Prometheus-compatible `/metrics` endpoint.

use analytics_charts::ChartKind;
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

// Metric names as constants for consistency
const CHARTS_RENDERED_TOTAL: &str = "analytics_charts_rendered_total";
const CHART_RENDER_DURATION: &str = "analytics_chart_render_duration_seconds";
const VALIDATION_FAILURES_TOTAL: &str = "analytics_validation_failures_total";
const ANALYSIS_REQUESTS_TOTAL: &str = "analytics_analysis_requests_total";

/// Initialize metrics and return the Prometheus handle.
///
/// # Errors
///
/// Returns an error if the Prometheus recorder cannot be installed
/// (e.g., if another recorder is already installed).
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Record a rendered chart and how long rasterizing took.
pub fn record_chart_rendered(kind: ChartKind, duration_secs: f64) {
    counter!(CHARTS_RENDERED_TOTAL, "kind" => kind.as_str()).increment(1);
    histogram!(CHART_RENDER_DURATION, "kind" => kind.as_str()).record(duration_secs);
}

/// Record a rejected request.
///
/// # Arguments
///
/// * `field` - Field that failed (width, data, body, ...)
pub fn record_validation_failure(field: &str) {
    counter!(
        VALIDATION_FAILURES_TOTAL,
        "field" => field.to_string()
    )
    .increment(1);
}

/// Record an analysis request.
///
/// # Arguments
///
/// * `operation` - grades, courses, prediction or scholarship
pub fn record_analysis_request(operation: &'static str) {
    counter!(ANALYSIS_REQUESTS_TOTAL, "operation" => operation).increment(1);
}
