//! API error type and its JSON envelope.

use analytics_charts::RenderError;
use analytics_core::CoreError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::metrics;
use crate::validation::ValidationError;

/// Errors returned by request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request values outside accepted limits.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Analysis input could not be parsed or analyzed.
    #[error(transparent)]
    Input(#[from] CoreError),

    /// Request body is not valid JSON for the endpoint.
    #[error("Invalid request body: {0}")]
    Body(#[from] JsonRejection),

    /// Drawing or encoding failed.
    #[error("Chart generation failed: {0}")]
    Render(#[from] RenderError),

    /// The blocking render task panicked or was cancelled.
    #[error("Chart generation failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Input(_) | Self::Body(_) => StatusCode::BAD_REQUEST,
            Self::Render(_) | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn metric_field(&self) -> Option<&'static str> {
        match self {
            Self::Validation(e) => Some(e.field()),
            Self::Input(_) => Some("input"),
            Self::Body(_) => Some("body"),
            Self::Render(_) | Self::Task(_) => None,
        }
    }
}

/// Error envelope returned to clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Always `false`.
    pub success: bool,
    /// Human-readable message.
    pub error: String,
    /// Always `"error"`.
    pub chart_type: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Some(field) = self.metric_field() {
            metrics::record_validation_failure(field);
            tracing::warn!(error = %self, field, "Rejected request");
        } else {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorBody {
            success: false,
            error: self.to_string(),
            chart_type: "error",
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::from(ValidationError::WidthOutOfRange(10)).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(CoreError::TwaOutOfRange(7.0)).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(RenderError::Encode("boom".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_body_shape() {
        let body = ErrorBody {
            success: false,
            error: "bad".to_string(),
            chart_type: "error",
        };
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({ "success": false, "error": "bad", "chartType": "error" })
        );
    }

    #[test]
    fn test_validation_message_passes_through() {
        let err = ApiError::from(ValidationError::HeightOutOfRange(900));
        assert!(err.to_string().starts_with("height 900"));
    }
}
