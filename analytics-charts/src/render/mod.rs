//! Chart renderers.
//!
//! Each renderer turns chart data into a [`Scene`] of primitive marks; nothing
//! here touches pixels. Empty or inconsistent data produces a scene carrying
//! a [`Role::Message`] mark instead of an error.

pub mod bar;
pub mod double_bar;
pub mod line;
pub mod message;
pub mod pie;

use analytics_core::{Anchor, Color, Mark, Point, Role, Scene, Style};

use crate::layout::{format_value, Layout};
use crate::palette::Palette;

/// Font size of the chart title.
pub const TITLE_SIZE: f64 = 18.0;
/// Font size of axis captions.
pub const AXIS_TITLE_SIZE: f64 = 14.0;
/// Font size of tick, value, category and legend labels.
pub const LABEL_SIZE: f64 = 12.0;
/// Font size of empty-state messages.
pub const MESSAGE_SIZE: f64 = 16.0;

/// Distance from the x-axis to category labels.
const CATEGORY_LABEL_OFFSET: f64 = 15.0;
/// Distance from a data mark to its value label.
const VALUE_LABEL_OFFSET: f64 = 10.0;
/// Distance from the plot's left edge to the grid value labels.
const TICK_LABEL_OFFSET: f64 = 40.0;

/// Canvas dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSize {
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

impl ChartSize {
    /// Create a size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn w(self) -> f64 {
        f64::from(self.width)
    }

    fn h(self) -> f64 {
        f64::from(self.height)
    }
}

/// Title and axis captions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartLabels {
    /// Chart title.
    pub title: String,
    /// X-axis caption.
    pub x_label: String,
    /// Y-axis caption.
    pub y_label: String,
}

impl ChartLabels {
    /// Create labels.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
        }
    }

    /// Title only, no axis captions.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Start a scene cleared to the palette background.
fn blank(size: ChartSize, palette: &Palette) -> Scene {
    Scene::new(size.width, size.height, palette.white)
}

fn push_text(
    scene: &mut Scene,
    text: impl Into<String>,
    at: Point,
    size: f64,
    anchor: Anchor,
    color: Color,
    role: Role,
) {
    let text = text.into();
    if text.is_empty() {
        return;
    }
    scene.push(Mark::Text {
        text,
        at,
        size,
        anchor,
        color,
        role,
    });
}

/// Chart title, centered at the top.
fn title(scene: &mut Scene, text: &str, palette: &Palette) {
    let at = Point::new(f64::from(scene.width()) / 2.0, 20.0);
    push_text(
        scene,
        text,
        at,
        TITLE_SIZE,
        Anchor::Middle,
        palette.black,
        Role::Title,
    );
}

/// X caption centered under the chart, y caption at the left edge.
fn axis_titles(scene: &mut Scene, labels: &ChartLabels, palette: &Palette) {
    let (w, h) = (f64::from(scene.width()), f64::from(scene.height()));
    push_text(
        scene,
        labels.x_label.as_str(),
        Point::new(w / 2.0, h - 30.0),
        AXIS_TITLE_SIZE,
        Anchor::Middle,
        palette.black,
        Role::AxisTitle,
    );
    push_text(
        scene,
        labels.y_label.as_str(),
        Point::new(20.0, h / 2.0),
        AXIS_TITLE_SIZE,
        Anchor::Start,
        palette.black,
        Role::AxisTitle,
    );
}

fn frame(scene: &mut Scene, layout: &Layout, palette: &Palette) {
    scene.push(Mark::Rect {
        rect: layout.plot_rect(),
        style: Style::stroked(palette.black),
        role: Role::Frame,
    });
}

/// Light grid beneath the data, with value labels left of the plot.
fn grid(scene: &mut Scene, layout: &Layout, palette: &Palette) {
    for (y, value) in layout.grid_rows() {
        scene.push(Mark::Line {
            from: Point::new(layout.left(), y),
            to: Point::new(layout.right(), y),
            color: palette.light_gray,
            role: Role::Grid,
        });
        push_text(
            scene,
            format_value(value),
            Point::new(layout.left() - TICK_LABEL_OFFSET, y),
            LABEL_SIZE,
            Anchor::Middle,
            palette.black,
            Role::TickLabel,
        );
    }
    for x in layout.grid_columns() {
        scene.push(Mark::Line {
            from: Point::new(x, layout.top()),
            to: Point::new(x, layout.bottom()),
            color: palette.light_gray,
            role: Role::Grid,
        });
    }
}

/// Numeric label just above `top`.
fn value_label(scene: &mut Scene, value: f64, x: f64, top: f64, palette: &Palette) {
    push_text(
        scene,
        format_value(value),
        Point::new(x, top - VALUE_LABEL_OFFSET),
        LABEL_SIZE,
        Anchor::Middle,
        palette.black,
        Role::ValueLabel,
    );
}

/// Category caption centered under the x-axis.
fn category_label(scene: &mut Scene, label: &str, x: f64, layout: &Layout, palette: &Palette) {
    push_text(
        scene,
        label,
        Point::new(x, layout.bottom() + CATEGORY_LABEL_OFFSET),
        LABEL_SIZE,
        Anchor::Middle,
        palette.black,
        Role::CategoryLabel,
    );
}

/// Filled legend swatch with its caption to the right.
fn legend_entry(
    scene: &mut Scene,
    x: f64,
    y: f64,
    color: Color,
    caption: String,
    palette: &Palette,
) {
    const SWATCH: f64 = 15.0;
    scene.push(Mark::Rect {
        rect: analytics_core::Rect::new(x, y, x + SWATCH, y + SWATCH),
        style: Style::filled(color),
        role: Role::Swatch,
    });
    push_text(
        scene,
        caption,
        Point::new(x + SWATCH + 5.0, y + SWATCH / 2.0),
        LABEL_SIZE,
        Anchor::Start,
        palette.black,
        Role::LegendLabel,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::STANDARD_MARGIN;

    #[test]
    fn test_grid_has_six_rows_and_five_columns() {
        let palette = Palette::default();
        let mut scene = blank(ChartSize::new(800, 600), &palette);
        let layout = Layout::compute(800, 600, STANDARD_MARGIN, 0.0, 100.0);
        grid(&mut scene, &layout, &palette);

        assert_eq!(scene.count(Role::Grid), 11);
        let ticks: Vec<_> = scene.texts(Role::TickLabel).collect();
        assert_eq!(ticks, vec!["100", "80", "60", "40", "20", "0"]);
    }

    #[test]
    fn test_title_is_black_and_centered() {
        let palette = Palette::default();
        let mut scene = blank(ChartSize::new(800, 600), &palette);
        title(&mut scene, "Grades", &palette);

        let marks: Vec<_> = scene.marks_with(Role::Title).collect();
        assert_eq!(marks.len(), 1);
        match marks[0] {
            Mark::Text { text, at, color, .. } => {
                assert_eq!(text, "Grades");
                assert!((at.x - 400.0).abs() < 1e-9);
                assert_eq!(*color, palette.black);
            }
            other => panic!("expected title text, got {other:?}"),
        };
    }

    #[test]
    fn test_empty_captions_are_skipped() {
        let palette = Palette::default();
        let mut scene = blank(ChartSize::new(800, 600), &palette);
        axis_titles(&mut scene, &ChartLabels::titled("Only a title"), &palette);
        assert!(scene.is_empty());
    }
}
