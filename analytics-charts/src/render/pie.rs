//! Pie chart with a percentage legend.

use analytics_core::{Mark, Point, Role, Scene, Series, Style};

use super::{blank, legend_entry, message, title, ChartSize};
use crate::layout::format_value;
use crate::palette::Palette;

/// A full turn in degrees.
pub const FULL_TURN: f64 = 360.0;

/// Render `series` as a pie chart. Slices start at 3 o'clock and run
/// clockwise in insertion order.
#[must_use]
pub fn render(series: &Series, chart_title: &str, size: ChartSize, palette: &Palette) -> Scene {
    let mut scene = blank(size, palette);
    title(&mut scene, chart_title, palette);

    if series.is_empty() {
        message::render(&mut scene, message::NO_DATA, palette);
        return scene;
    }
    if series.values().any(|v| v < 0.0) {
        message::render(&mut scene, message::NEGATIVE_PIE_VALUE, palette);
        return scene;
    }
    let total = series.total();
    if total <= 0.0 {
        message::render(&mut scene, message::NO_VALID_PIE_DATA, palette);
        return scene;
    }

    let center = Point::new(size.w() / 2.0, size.h() / 2.0 + 20.0);
    let radius = size.w().min(size.h()) / 3.0;

    let last = series.len() - 1;
    let mut start = 0.0;
    for (i, entry) in series.iter().enumerate() {
        // the last slice closes the circle exactly
        let end = if i == last {
            FULL_TURN
        } else {
            start + entry.value / total * FULL_TURN
        };
        let color = palette.categorical(i);

        scene.push(Mark::Wedge {
            center,
            radius,
            start_deg: start,
            sweep_deg: end - start,
            style: Style::filled(color),
            role: Role::Slice,
        });
        scene.push(Mark::Wedge {
            center,
            radius,
            start_deg: start,
            sweep_deg: end - start,
            style: Style::stroked(palette.black),
            role: Role::SliceOutline,
        });
        start = end;
    }

    let legend_x = size.w() - 200.0;
    for (i, entry) in series.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let y = 100.0 + i as f64 * 25.0;
        let pct = format_value(entry.value / total * 100.0);
        legend_entry(
            &mut scene,
            legend_x,
            y,
            palette.categorical(i),
            format!("{} ({pct}%)", entry.label),
            palette,
        );
    }

    scene
}

/// Sweep of every slice in paint order.
#[must_use]
pub fn sweeps(scene: &Scene) -> Vec<f64> {
    scene
        .marks_with(Role::Slice)
        .filter_map(|m| match m {
            Mark::Wedge { sweep_deg, .. } => Some(*sweep_deg),
            _ => None,
        })
        .collect()
}
