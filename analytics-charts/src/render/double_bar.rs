//! Comparison chart: a primary and a baseline bar side by side for every
//! category the two series share.

use analytics_core::{Anchor, Mark, PairedSeries, Point, Rect, Role, Scene, Series, Style};

use super::bar::bar_height;
use super::{
    axis_titles, blank, category_label, frame, grid, legend_entry, message, push_text, title,
    value_label, ChartLabels, ChartSize, LABEL_SIZE,
};
use crate::layout::{Layout, COMPARISON_MARGIN};
use crate::palette::Palette;

/// Share of a slot taken by each of the two bars.
const BAR_FRACTION: f64 = 0.35;
/// Gap before, between and after the bars, as a share of the slot.
const GAP_FRACTION: f64 = 0.1;
/// Note shown on inverted scales.
pub const LOWER_IS_BETTER: &str = "Lower is better";

/// Series names and scale direction of a comparison chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonStyle {
    /// Legend caption of the first series.
    pub primary_name: String,
    /// Legend caption of the second series.
    pub baseline_name: String,
    /// Smaller values are better (e.g. transmuted grades).
    pub lower_is_better: bool,
}

impl Default for ComparisonStyle {
    fn default() -> Self {
        Self {
            primary_name: "Student".to_string(),
            baseline_name: "Class Average".to_string(),
            lower_is_better: false,
        }
    }
}

impl ComparisonStyle {
    /// Padded `(floor, ceil)` of the value scale for data spanning `min..=max`.
    ///
    /// Both scales pad by 20% of the range and never drop below zero. The
    /// lower-is-better scale pads at least 0.25 so close grades stay apart;
    /// otherwise a flat range pads by 1.
    #[must_use]
    pub fn scale(&self, min: f64, max: f64) -> (f64, f64) {
        let range = max - min;
        let pad = if self.lower_is_better {
            (range * 0.2).max(0.25)
        } else if range > 0.0 {
            range * 0.2
        } else {
            1.0
        };
        ((min - pad).max(0.0), max + pad)
    }
}

/// Render `primary` against `baseline` on their shared labels.
#[must_use]
pub fn render(
    primary: &Series,
    baseline: &Series,
    labels: &ChartLabels,
    size: ChartSize,
    palette: &Palette,
    style: &ComparisonStyle,
) -> Scene {
    let mut scene = blank(size, palette);
    title(&mut scene, &labels.title, palette);

    let paired = PairedSeries::intersect(primary, baseline);
    let Some((min, max)) = paired.bounds() else {
        let layout = Layout::compute(size.width, size.height, COMPARISON_MARGIN, 0.0, 1.0);
        frame(&mut scene, &layout, palette);
        let text = if primary.is_empty() || baseline.is_empty() {
            message::NO_DATA
        } else {
            message::SERIES_MISMATCH
        };
        message::render(&mut scene, text, palette);
        return scene;
    };

    let (floor, ceil) = style.scale(min, max);
    let layout = Layout::compute(size.width, size.height, COMPARISON_MARGIN, floor, ceil);
    grid(&mut scene, &layout, palette);
    axis_titles(&mut scene, labels, palette);
    frame(&mut scene, &layout, palette);

    let n = paired.len();
    for (i, entry) in paired.iter().enumerate() {
        let (slot_x, slot_w) = layout.slot(i, n);
        let bar_w = slot_w * BAR_FRACTION;
        let gap = slot_w * GAP_FRACTION;
        let primary_x = slot_x + gap;
        let baseline_x = primary_x + bar_w + gap;

        for (x, value, color) in [
            (primary_x, entry.primary, palette.blue),
            (baseline_x, entry.baseline, palette.orange),
        ] {
            let top = layout.bottom() - bar_height(&layout, value);
            scene.push(Mark::Rect {
                rect: Rect::new(x, top, x + bar_w, layout.bottom()),
                style: Style::outlined(color, palette.black),
                role: Role::Bar,
            });
            value_label(&mut scene, value, x + bar_w / 2.0, top, palette);
        }

        category_label(&mut scene, &entry.label, slot_x + slot_w / 2.0, &layout, palette);
    }

    legend(&mut scene, size, palette, style);
    scene
}

fn legend(scene: &mut Scene, size: ChartSize, palette: &Palette, style: &ComparisonStyle) {
    let x = size.w() - 250.0;
    legend_entry(scene, x, 35.0, palette.blue, style.primary_name.clone(), palette);
    legend_entry(
        scene,
        x,
        55.0,
        palette.orange,
        style.baseline_name.clone(),
        palette,
    );
    if style.lower_is_better {
        push_text(
            scene,
            LOWER_IS_BETTER,
            Point::new(x, 85.0),
            LABEL_SIZE,
            Anchor::Start,
            palette.gray,
            Role::Note,
        );
    }
}
