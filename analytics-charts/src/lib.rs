//! # Student Analytics Charts
//!
//! Raster chart engine: line, bar, comparison and pie charts rendered to
//! base64-encoded PNG.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────┐   ┌──────────────┐   ┌────────┐   ┌──────────────┐
//! │  Series  │──▶│   Renderer   │──▶│ Canvas │──▶│   Encoder    │
//! │ (labels, │   │ (line / bar  │   │ (RGB,  │   │ (PNG, base64)│
//! │  values) │   │ / pie → Scene│   │ paint) │   │              │
//! └──────────┘   └──────────────┘   └────────┘   └──────────────┘
//! ```
//!
//! Every call allocates its own canvas; the engine holds no mutable state
//! and can be shared freely across threads.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod canvas;
pub mod chart;
pub mod encode;
pub mod error;
pub mod layout;
pub mod palette;
pub mod render;

pub use canvas::Canvas;
pub use chart::ChartKind;
pub use error::{RenderError, RenderResult};
pub use layout::Layout;
pub use palette::Palette;
pub use render::bar::BarAnchor;
pub use render::double_bar::ComparisonStyle;
pub use render::{ChartLabels, ChartSize};

use std::time::Instant;

use analytics_core::{Role, Scene, Series};

/// Default canvas width.
pub const DEFAULT_WIDTH: u32 = 800;
/// Default canvas height.
pub const DEFAULT_HEIGHT: u32 = 600;

/// Renders charts of a fixed size to base64 PNG.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartEngine {
    size: ChartSize,
    palette: Palette,
    bar_anchor: BarAnchor,
}

impl Default for ChartEngine {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl ChartEngine {
    /// Create an engine producing `width` x `height` images.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: ChartSize::new(width, height),
            palette: Palette::default(),
            bar_anchor: BarAnchor::default(),
        }
    }

    /// Set where bar chart scales start.
    #[must_use]
    pub fn with_bar_anchor(mut self, anchor: BarAnchor) -> Self {
        self.bar_anchor = anchor;
        self
    }

    /// Image width.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.size.width
    }

    /// Image height.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Palette charts are drawn with.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Bar chart anchoring.
    #[must_use]
    pub fn bar_anchor(&self) -> BarAnchor {
        self.bar_anchor
    }

    /// Lay out a line chart without rasterizing it.
    #[must_use]
    pub fn line_scene(&self, series: &Series, labels: &ChartLabels) -> Scene {
        render::line::render(series, labels, self.size, &self.palette)
    }

    /// Lay out a bar chart without rasterizing it.
    #[must_use]
    pub fn bar_scene(&self, series: &Series, labels: &ChartLabels) -> Scene {
        render::bar::render(series, labels, self.size, &self.palette, self.bar_anchor)
    }

    /// Lay out a comparison chart without rasterizing it.
    #[must_use]
    pub fn double_bar_scene(
        &self,
        primary: &Series,
        baseline: &Series,
        labels: &ChartLabels,
        style: &ComparisonStyle,
    ) -> Scene {
        render::double_bar::render(primary, baseline, labels, self.size, &self.palette, style)
    }

    /// Lay out a pie chart without rasterizing it.
    #[must_use]
    pub fn pie_scene(&self, series: &Series, title: &str) -> Scene {
        render::pie::render(series, title, self.size, &self.palette)
    }

    /// Render a line chart.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing or encoding fails.
    pub fn generate_line_chart(
        &self,
        series: &Series,
        title: &str,
        x_label: &str,
        y_label: &str,
    ) -> RenderResult<String> {
        let scene = self.line_scene(series, &ChartLabels::new(title, x_label, y_label));
        finish(ChartKind::Line, &scene)
    }

    /// Render a bar chart.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing or encoding fails.
    pub fn generate_bar_chart(
        &self,
        series: &Series,
        title: &str,
        x_label: &str,
        y_label: &str,
    ) -> RenderResult<String> {
        let scene = self.bar_scene(series, &ChartLabels::new(title, x_label, y_label));
        finish(ChartKind::Bar, &scene)
    }

    /// Render a comparison chart with the default series names.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing or encoding fails.
    pub fn generate_double_bar_chart(
        &self,
        primary: &Series,
        baseline: &Series,
        title: &str,
        x_label: &str,
        y_label: &str,
    ) -> RenderResult<String> {
        self.generate_double_bar_chart_with(
            primary,
            baseline,
            title,
            x_label,
            y_label,
            &ComparisonStyle::default(),
        )
    }

    /// Render a comparison chart.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing or encoding fails.
    pub fn generate_double_bar_chart_with(
        &self,
        primary: &Series,
        baseline: &Series,
        title: &str,
        x_label: &str,
        y_label: &str,
        style: &ComparisonStyle,
    ) -> RenderResult<String> {
        let labels = ChartLabels::new(title, x_label, y_label);
        let scene = self.double_bar_scene(primary, baseline, &labels, style);
        finish(ChartKind::DoubleBar, &scene)
    }

    /// Render a pie chart.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing or encoding fails.
    pub fn generate_pie_chart(&self, series: &Series, title: &str) -> RenderResult<String> {
        let scene = self.pie_scene(series, title);
        finish(ChartKind::Pie, &scene)
    }
}

/// Paint `scene` on a fresh canvas and encode it as base64 PNG.
///
/// # Errors
///
/// Returns an error if the canvas cannot be created, drawn or encoded.
pub fn rasterize(scene: &Scene) -> RenderResult<String> {
    let mut canvas = Canvas::create(scene.width(), scene.height())?;
    canvas.paint(scene)?;
    encode::encode(canvas)
}

fn finish(kind: ChartKind, scene: &Scene) -> RenderResult<String> {
    let start = Instant::now();
    let image = rasterize(scene)?;
    tracing::debug!(
        kind = kind.as_str(),
        marks = scene.mark_count(),
        message = scene.message(),
        bytes = image.len(),
        elapsed = ?start.elapsed(),
        "Rendered chart"
    );
    Ok(image)
}

/// Number of data marks in a scene (markers, bars or slices).
#[must_use]
pub fn data_mark_count(scene: &Scene) -> usize {
    scene.count(Role::Marker) + scene.count(Role::Bar) + scene.count(Role::Slice)
}

/// Chart engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
