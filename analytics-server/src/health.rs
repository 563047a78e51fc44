//! Health check endpoints for Kubernetes probes.
//!
//! Provides liveness and readiness probes for container orchestration:
//! - `/health/live` - Liveness probe (restart if fails)
//! - `/health/ready` - Readiness probe (remove from LB if fails)
//! - `/health` - Same as readiness

use analytics_charts::Palette;
use analytics_core::Scene;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::AppState;

/// Health status response.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    /// Overall status: "healthy" or "unhealthy"
    pub status: &'static str,
    /// Server version
    pub version: &'static str,
    /// Individual component checks
    pub checks: HealthChecks,
}

/// Individual health checks.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    /// A blank image can be rasterized and encoded
    pub chart_engine: bool,
    /// Prometheus recorder installed (informational)
    pub metrics: bool,
}

/// Liveness probe - is the server running?
///
/// Returns 200 OK if the process is alive.
#[tracing::instrument(name = "liveness_probe")]
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// Readiness probe - can the server render charts?
///
/// Encodes a 1x1 image; a missing recorder does not make the server unready.
#[tracing::instrument(name = "readiness_probe", skip(state))]
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    let probe = Scene::new(1, 1, Palette::default().white);
    let engine_ok = match analytics_charts::rasterize(&probe) {
        Ok(_) => true,
        Err(e) => {
            tracing::error!(error = %e, "Chart engine probe failed");
            false
        }
    };

    let status = HealthStatus {
        status: if engine_ok { "healthy" } else { "unhealthy" },
        version: env!("CARGO_PKG_VERSION"),
        checks: HealthChecks {
            chart_engine: engine_ok,
            metrics: state.metrics().is_some(),
        },
    };

    let code = if engine_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (code, Json(status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;

    #[test]
    fn test_health_status_serialization() {
        let status = HealthStatus {
            status: "healthy",
            version: "0.1.0",
            checks: HealthChecks {
                chart_engine: true,
                metrics: false,
            },
        };

        let json = serde_json::to_value(&status).expect("should serialize");
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["version"], "0.1.0");
        assert_eq!(json["checks"]["chart_engine"], true);
        assert_eq!(json["checks"]["metrics"], false);
    }

    #[tokio::test]
    async fn test_readiness_without_recorder() {
        let state = AppState::new(ServerConfig::default());
        let (code, Json(status)) = readiness(State(state)).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(status.status, "healthy");
        assert!(!status.checks.metrics);
    }
}
