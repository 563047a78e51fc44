//! `POST /api/charts/*` - render caller-supplied series.

use analytics_charts::{BarAnchor, ChartKind, ComparisonStyle};
use analytics_core::grading::is_inverted_band;
use analytics_core::PairedSeries;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use super::render_chart;
use crate::error::ApiError;
use crate::models::{ChartRequest, ChartResponse, DoubleBarRequest};
use crate::AppState;

/// Line chart in series order.
#[tracing::instrument(name = "line_chart", skip_all)]
pub async fn line_chart(
    State(state): State<AppState>,
    payload: Result<Json<ChartRequest>, JsonRejection>,
) -> Result<Json<ChartResponse>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;
    let engine = state.engine(request.size)?;
    let points = request.data.len();

    let chart = render_chart(ChartKind::Line, engine, points, move |engine| {
        engine.generate_line_chart(
            &request.data,
            &request.title,
            &request.x_label,
            &request.y_label,
        )
    })
    .await?;
    Ok(Json(chart))
}

/// Bar chart; `anchorAtZero: false` starts the scale at the smallest value.
#[tracing::instrument(name = "bar_chart", skip_all)]
pub async fn bar_chart(
    State(state): State<AppState>,
    payload: Result<Json<ChartRequest>, JsonRejection>,
) -> Result<Json<ChartResponse>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;
    let anchor = if request.anchor_at_zero.unwrap_or(true) {
        BarAnchor::Zero
    } else {
        BarAnchor::Minimum
    };
    let engine = state.engine(request.size)?.with_bar_anchor(anchor);
    let points = request.data.len();

    let chart = render_chart(ChartKind::Bar, engine, points, move |engine| {
        engine.generate_bar_chart(
            &request.data,
            &request.title,
            &request.x_label,
            &request.y_label,
        )
    })
    .await?;
    Ok(Json(chart))
}

/// Side-by-side comparison of two series over their shared labels.
#[tracing::instrument(name = "double_bar_chart", skip_all)]
pub async fn double_bar_chart(
    State(state): State<AppState>,
    payload: Result<Json<DoubleBarRequest>, JsonRejection>,
) -> Result<Json<ChartResponse>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;
    let engine = state.engine(request.size)?;
    let points = PairedSeries::intersect(&request.primary, &request.baseline).len();
    let style = comparison_style(&request);

    let chart = render_chart(ChartKind::DoubleBar, engine, points, move |engine| {
        engine.generate_double_bar_chart_with(
            &request.primary,
            &request.baseline,
            &request.title,
            &request.x_label,
            &request.y_label,
            &style,
        )
    })
    .await?;
    Ok(Json(chart))
}

/// Pie chart of shares of the series total.
#[tracing::instrument(name = "pie_chart", skip_all)]
pub async fn pie_chart(
    State(state): State<AppState>,
    payload: Result<Json<ChartRequest>, JsonRejection>,
) -> Result<Json<ChartResponse>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;
    let engine = state.engine(request.size)?;
    let points = request.data.len();

    let chart = render_chart(ChartKind::Pie, engine, points, move |engine| {
        engine.generate_pie_chart(&request.data, &request.title)
    })
    .await?;
    Ok(Json(chart))
}

/// Legend names and scale direction; an absent `lowerIsBetter` is inferred
/// from whether every value looks like a transmuted grade.
fn comparison_style(request: &DoubleBarRequest) -> ComparisonStyle {
    let defaults = ComparisonStyle::default();
    let lower_is_better = request.lower_is_better.unwrap_or_else(|| {
        let values: Vec<f64> = request
            .primary
            .values()
            .chain(request.baseline.values())
            .collect();
        is_inverted_band(&values)
    });
    ComparisonStyle {
        primary_name: request
            .primary_name
            .clone()
            .unwrap_or(defaults.primary_name),
        baseline_name: request
            .baseline_name
            .clone()
            .unwrap_or(defaults.baseline_name),
        lower_is_better,
    }
}
