//! API route handlers.

pub mod analysis;
pub mod charts;

use std::time::Instant;

use analytics_charts::{ChartEngine, ChartKind, RenderResult};

use crate::error::ApiError;
use crate::metrics;
use crate::models::ChartResponse;

/// Run `draw` on the blocking pool and wrap the image in a [`ChartResponse`].
///
/// Rasterizing is CPU-bound, so it never runs on the async workers.
pub(crate) async fn render_chart<F>(
    kind: ChartKind,
    engine: ChartEngine,
    data_points: usize,
    draw: F,
) -> Result<ChartResponse, ApiError>
where
    F: FnOnce(&ChartEngine) -> RenderResult<String> + Send + 'static,
{
    let (width, height) = (engine.width(), engine.height());
    let start = Instant::now();
    let image_data = tokio::task::spawn_blocking(move || draw(&engine)).await??;
    let elapsed = start.elapsed();

    metrics::record_chart_rendered(kind, elapsed.as_secs_f64());
    tracing::debug!(
        kind = kind.as_str(),
        data_points,
        width,
        height,
        ?elapsed,
        "Chart rendered"
    );

    Ok(ChartResponse {
        success: true,
        chart_type: kind,
        image_data,
        data_points,
        width,
        height,
    })
}
