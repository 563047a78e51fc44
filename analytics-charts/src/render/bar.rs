//! Bar chart: one vertical bar per category.

use analytics_core::{Mark, Rect, Role, Scene, Series, Style};

use super::{
    axis_titles, blank, category_label, frame, grid, message, title, value_label, ChartLabels,
    ChartSize,
};
use crate::layout::{Layout, STANDARD_MARGIN};
use crate::palette::Palette;

/// Share of a slot taken by the bar; the rest is split evenly on both sides.
const BAR_FRACTION: f64 = 0.7;

/// Where the value scale of a bar chart starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BarAnchor {
    /// Scale starts at zero, or lower when values are negative.
    #[default]
    Zero,
    /// Scale starts at the smallest value; the smallest bar is empty.
    Minimum,
}

impl BarAnchor {
    /// `(floor, ceil)` of the value scale for data spanning `min..=max`.
    ///
    /// The range is never empty. When the Zero anchor meets all-zero data
    /// it lifts the ceiling, so the bars stay empty. Otherwise equal values
    /// lower the floor by one and draw full-height bars, negative ones
    /// included.
    #[must_use]
    pub fn scale(self, min: f64, max: f64) -> (f64, f64) {
        match self {
            Self::Zero => {
                let floor = min.min(0.0);
                if max > floor {
                    (floor, max)
                } else if floor < 0.0 {
                    (max - 1.0, max)
                } else {
                    (floor, floor + 1.0)
                }
            }
            Self::Minimum => {
                let floor = if max > min { min } else { max - 1.0 };
                (floor, max)
            }
        }
    }
}

/// Render `series` as a bar chart.
#[must_use]
pub fn render(
    series: &Series,
    labels: &ChartLabels,
    size: ChartSize,
    palette: &Palette,
    anchor: BarAnchor,
) -> Scene {
    let mut scene = blank(size, palette);
    title(&mut scene, &labels.title, palette);

    let Some((min, max)) = series.bounds() else {
        let layout = Layout::compute(size.width, size.height, STANDARD_MARGIN, 0.0, 1.0);
        frame(&mut scene, &layout, palette);
        message::render(&mut scene, message::NO_DATA, palette);
        return scene;
    };

    let (floor, ceil) = anchor.scale(min, max);
    let layout = Layout::compute(size.width, size.height, STANDARD_MARGIN, floor, ceil);
    grid(&mut scene, &layout, palette);
    axis_titles(&mut scene, labels, palette);
    frame(&mut scene, &layout, palette);

    let n = series.len();
    for (i, entry) in series.iter().enumerate() {
        let (slot_x, slot_w) = layout.slot(i, n);
        let x0 = slot_x + slot_w * (1.0 - BAR_FRACTION) / 2.0;
        let x1 = x0 + slot_w * BAR_FRACTION;
        let top = layout.bottom() - bar_height(&layout, entry.value);
        let center = (x0 + x1) / 2.0;

        scene.push(Mark::Rect {
            rect: Rect::new(x0, top, x1, layout.bottom()),
            style: Style::outlined(palette.categorical(i), palette.black),
            role: Role::Bar,
        });
        value_label(&mut scene, entry.value, center, top, palette);
        category_label(&mut scene, &entry.label, center, &layout, palette);
    }

    scene
}

/// Bar height for `value` on the layout's scale, within `[0, plot_height]`.
pub(crate) fn bar_height(layout: &Layout, value: f64) -> f64 {
    let height = (value - layout.min()) / layout.range() * layout.plot_height();
    height.clamp(0.0, layout.plot_height())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heights(scene: &Scene) -> Vec<f64> {
        scene
            .marks_with(Role::Bar)
            .filter_map(|m| match m {
                Mark::Rect { rect, .. } => Some(rect.height()),
                _ => None,
            })
            .collect()
    }

    fn grades() -> Series {
        Series::new()
            .with("Math", 90.0)
            .with("Physics", 75.0)
            .with("Chem", 60.0)
    }

    #[test]
    fn test_zero_anchor_scale() {
        assert_eq!(BarAnchor::Zero.scale(60.0, 90.0), (0.0, 90.0));
        assert_eq!(BarAnchor::Zero.scale(-10.0, 5.0), (-10.0, 5.0));
        assert_eq!(BarAnchor::Zero.scale(0.0, 0.0), (0.0, 1.0));
        assert_eq!(BarAnchor::Zero.scale(-5.0, -5.0), (-6.0, -5.0));
    }

    #[test]
    fn test_minimum_anchor_scale() {
        assert_eq!(BarAnchor::Minimum.scale(60.0, 90.0), (60.0, 90.0));
        assert_eq!(BarAnchor::Minimum.scale(5.0, 5.0), (4.0, 5.0));
    }

    #[test]
    fn test_bars_in_insertion_order() {
        let scene = render(
            &grades(),
            &ChartLabels::new("Grades", "Course", "Grade"),
            ChartSize::new(800, 600),
            &Palette::default(),
            BarAnchor::Zero,
        );
        let captions: Vec<_> = scene.texts(Role::CategoryLabel).collect();
        assert_eq!(captions, vec!["Math", "Physics", "Chem"]);

        let h = heights(&scene);
        assert_eq!(h.len(), 3);
        assert!((h[0] - 440.0).abs() < 1e-9);
        assert!(h[0] > h[1] && h[1] > h[2]);
    }

    #[test]
    fn test_minimum_anchor_tallest_bar_fills_plot() {
        let scene = render(
            &grades(),
            &ChartLabels::default(),
            ChartSize::new(800, 600),
            &Palette::default(),
            BarAnchor::Minimum,
        );
        let h = heights(&scene);
        assert!((h[0] - 440.0).abs() < 1e-9);
        assert!(h[2].abs() < 1e-9);
    }

    #[test]
    fn test_equal_values_draw_equal_nonzero_bars() {
        let series = Series::new().with("a", 5.0).with("b", 5.0);
        for anchor in [BarAnchor::Zero, BarAnchor::Minimum] {
            let scene = render(
                &series,
                &ChartLabels::default(),
                ChartSize::new(800, 600),
                &Palette::default(),
                anchor,
            );
            let h = heights(&scene);
            assert!((h[0] - h[1]).abs() < 1e-9);
            assert!(h[0] > 0.0);
        }
    }

    #[test]
    fn test_equal_negative_values_draw_full_height_bars() {
        let series = Series::new().with("a", -5.0).with("b", -5.0);
        let scene = render(
            &series,
            &ChartLabels::default(),
            ChartSize::new(800, 600),
            &Palette::default(),
            BarAnchor::Zero,
        );
        let h = heights(&scene);
        assert_eq!(h.len(), 2);
        assert!((h[0] - 440.0).abs() < 1e-9);
        assert!((h[1] - 440.0).abs() < 1e-9);
        assert_eq!(scene.texts(Role::ValueLabel).next(), Some("-5"));
    }

    #[test]
    fn test_bar_colors_cycle() {
        let palette = Palette::default();
        let series: Series = (0..6).map(|i| (format!("c{i}"), f64::from(i))).collect();
        let scene = render(
            &series,
            &ChartLabels::default(),
            ChartSize::new(800, 600),
            &palette,
            BarAnchor::Zero,
        );
        let fills: Vec<_> = scene
            .marks_with(Role::Bar)
            .filter_map(|m| match m {
                Mark::Rect { style, .. } => style.fill,
                _ => None,
            })
            .collect();
        assert_eq!(fills[0], palette.blue);
        assert_eq!(fills[5], palette.blue);
        assert_eq!(fills[1], palette.green);
    }

    #[test]
    fn test_empty_series_shows_message() {
        let scene = render(
            &Series::new(),
            &ChartLabels::default(),
            ChartSize::new(800, 600),
            &Palette::default(),
            BarAnchor::Zero,
        );
        assert_eq!(scene.message(), Some(message::NO_DATA));
        assert_eq!(scene.count(Role::Bar), 0);
    }
}
