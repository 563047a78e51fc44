//! Plot-area geometry and value scales.
//!
//! Pixel space has its origin at the top-left corner with y growing downward,
//! so the value scale is inverted: `min` maps to the plot's bottom edge and
//! `max` to its top edge.

use analytics_core::grading::round_to;
use analytics_core::{Point, Rect};

/// Margin around the plot area for line, bar and pie charts.
pub const STANDARD_MARGIN: f64 = 80.0;

/// Margin around the plot area for comparison charts (room for the legend).
pub const COMPARISON_MARGIN: f64 = 100.0;

/// Horizontal grid divisions (six lines).
pub const GRID_ROWS: usize = 5;

/// Vertical grid divisions (five lines).
pub const GRID_COLUMNS: usize = 4;

/// Plot rectangle plus a linear value scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    width: f64,
    height: f64,
    margin: f64,
    min: f64,
    max: f64,
}

impl Layout {
    /// Lay out a `width` x `height` canvas inset by `margin`, scaling values
    /// from `min` to `max`.
    ///
    /// An empty range (`max == min`) is widened to `[min, min + 1]`. A
    /// pre-inverted range (`min > max`) is kept, which flips the axis so
    /// `min` is drawn at the top.
    #[must_use]
    pub fn compute(width: u32, height: u32, margin: f64, min: f64, max: f64) -> Self {
        #[allow(clippy::float_cmp)]
        let max = if max == min { min + 1.0 } else { max };
        Self {
            width: f64::from(width),
            height: f64::from(height),
            margin,
            min,
            max,
        }
    }

    /// Margin in pixels.
    #[must_use]
    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Left edge of the plot area.
    #[must_use]
    pub fn left(&self) -> f64 {
        self.margin
    }

    /// Right edge of the plot area.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.width - self.margin
    }

    /// Top edge of the plot area.
    #[must_use]
    pub fn top(&self) -> f64 {
        self.margin
    }

    /// Bottom edge of the plot area (the x-axis).
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.height - self.margin
    }

    /// Plot area width.
    #[must_use]
    pub fn plot_width(&self) -> f64 {
        self.right() - self.left()
    }

    /// Plot area height.
    #[must_use]
    pub fn plot_height(&self) -> f64 {
        self.bottom() - self.top()
    }

    /// The plot rectangle.
    #[must_use]
    pub fn plot_rect(&self) -> Rect {
        Rect::new(self.left(), self.top(), self.right(), self.bottom())
    }

    /// Value at the bottom of the scale.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Value at the top of the scale.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// `max - min`, never zero; negative for a pre-inverted scale.
    #[must_use]
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Vertical pixel position of `value`.
    #[must_use]
    pub fn y_for(&self, value: f64) -> f64 {
        self.bottom() - (value - self.min) / self.range() * self.plot_height()
    }

    /// Horizontal position of the `index`-th of `count` evenly spread points,
    /// first on the left edge and last on the right. A single point is
    /// centered.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn x_for_index(&self, index: usize, count: usize) -> f64 {
        if count <= 1 {
            return self.left() + self.plot_width() / 2.0;
        }
        self.left() + index as f64 * self.plot_width() / (count - 1) as f64
    }

    /// `(left, width)` of the `index`-th of `count` equal slots.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn slot(&self, index: usize, count: usize) -> (f64, f64) {
        let width = self.plot_width() / count.max(1) as f64;
        (self.left() + index as f64 * width, width)
    }

    /// Point on the plot for the `index`-th of `count` values.
    #[must_use]
    pub fn point(&self, index: usize, count: usize, value: f64) -> Point {
        Point::new(self.x_for_index(index, count), self.y_for(value))
    }

    /// Horizontal grid lines top to bottom as `(y, value)`; the value runs
    /// from `max` down to `min`.
    #[allow(clippy::cast_precision_loss)]
    pub fn grid_rows(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        (0..=GRID_ROWS).map(move |i| {
            let t = i as f64 / GRID_ROWS as f64;
            (self.top() + t * self.plot_height(), self.max - t * self.range())
        })
    }

    /// Vertical grid line positions, left to right.
    #[allow(clippy::cast_precision_loss)]
    pub fn grid_columns(&self) -> impl Iterator<Item = f64> + '_ {
        (0..=GRID_COLUMNS)
            .map(move |i| self.left() + i as f64 / GRID_COLUMNS as f64 * self.plot_width())
    }
}

/// Format a value for a label: rounded to one decimal, whole numbers
/// without a fractional part (`90`, `87.5`).
#[must_use]
pub fn format_value(value: f64) -> String {
    // + 0.0 turns -0.0 into 0.0
    let rounded = round_to(value, 1) + 0.0;
    if rounded.fract().abs() < f64::EPSILON {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}
