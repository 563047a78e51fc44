//! Line chart: one marker per value joined by straight segments.

use analytics_core::{Mark, Role, Scene, Series, Style};

use super::{
    axis_titles, blank, category_label, frame, grid, message, title, value_label, ChartLabels,
    ChartSize,
};
use crate::layout::{Layout, STANDARD_MARGIN};
use crate::palette::Palette;

/// Marker radius in pixels.
pub const MARKER_RADIUS: f64 = 4.0;

/// Render `series` as a line chart.
#[must_use]
pub fn render(series: &Series, labels: &ChartLabels, size: ChartSize, palette: &Palette) -> Scene {
    let mut scene = blank(size, palette);
    title(&mut scene, &labels.title, palette);

    let Some((min, max)) = series.bounds() else {
        let layout = Layout::compute(size.width, size.height, STANDARD_MARGIN, 0.0, 1.0);
        frame(&mut scene, &layout, palette);
        message::render(&mut scene, message::NO_DATA, palette);
        return scene;
    };

    let layout = Layout::compute(size.width, size.height, STANDARD_MARGIN, min, max);
    grid(&mut scene, &layout, palette);
    axis_titles(&mut scene, labels, palette);
    frame(&mut scene, &layout, palette);

    let n = series.len();
    let points: Vec<_> = series
        .iter()
        .enumerate()
        .map(|(i, entry)| layout.point(i, n, entry.value))
        .collect();

    for (entry, point) in series.iter().zip(&points) {
        scene.push(Mark::Circle {
            center: *point,
            radius: MARKER_RADIUS,
            style: Style::filled(palette.blue),
            role: Role::Marker,
        });
        value_label(&mut scene, entry.value, point.x, point.y, palette);
        category_label(&mut scene, &entry.label, point.x, &layout, palette);
    }

    for pair in points.windows(2) {
        scene.push(Mark::Line {
            from: pair[0],
            to: pair[1],
            color: palette.blue,
            role: Role::Segment,
        });
    }

    scene
}
