//! Draw primitives - the building blocks of chart scenes.

use serde::{Deserialize, Serialize};

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Create a color from its channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` representation.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A point in canvas pixel space (origin top-left, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Pixels from the left edge.
    pub x: f64,
    /// Pixels from the top edge.
    pub y: f64,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle given by two corners, `x0 <= x1` and `y0 <= y1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x0: f64,
    /// Top edge.
    pub y0: f64,
    /// Right edge.
    pub x1: f64,
    /// Bottom edge.
    pub y1: f64,
}

impl Rect {
    /// Create a rectangle, normalizing corner order.
    #[must_use]
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0)
    }

    /// Check if a point is within this rectangle (edges included).
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x0 && p.x <= self.x1 && p.y >= self.y0 && p.y <= self.y1
    }
}

/// Fill and outline of a closed shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Style {
    /// Interior color, if filled.
    pub fill: Option<Color>,
    /// Outline color, if stroked.
    pub stroke: Option<Color>,
}

impl Style {
    /// Filled shape without outline.
    #[must_use]
    pub const fn filled(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
        }
    }

    /// Outline only.
    #[must_use]
    pub const fn stroked(color: Color) -> Self {
        Self {
            fill: None,
            stroke: Some(color),
        }
    }

    /// Filled shape with an outline.
    #[must_use]
    pub const fn outlined(fill: Color, stroke: Color) -> Self {
        Self {
            fill: Some(fill),
            stroke: Some(stroke),
        }
    }
}

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    /// Text starts at the anchor.
    Start,
    /// Text is centered on the anchor.
    Middle,
    /// Text ends at the anchor.
    End,
}

/// What a mark represents in the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Plot-area border.
    Frame,
    /// Background grid line.
    Grid,
    /// Data point marker.
    Marker,
    /// Line segment joining two data points.
    Segment,
    /// Data bar.
    Bar,
    /// Filled pie slice.
    Slice,
    /// Pie slice outline arc.
    SliceOutline,
    /// Legend color swatch.
    Swatch,
    /// Chart title.
    Title,
    /// Axis caption.
    AxisTitle,
    /// Grid value label.
    TickLabel,
    /// Numeric label attached to a data mark.
    ValueLabel,
    /// Category caption under the x-axis.
    CategoryLabel,
    /// Legend caption.
    LegendLabel,
    /// Free annotation (e.g. "Lower is better").
    Note,
    /// Empty-state or error message.
    Message,
}

/// A primitive draw call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Mark {
    /// Axis-aligned rectangle.
    Rect {
        /// Geometry.
        rect: Rect,
        /// Fill and outline.
        style: Style,
        /// Meaning.
        role: Role,
    },

    /// Circle.
    Circle {
        /// Center point.
        center: Point,
        /// Radius in pixels.
        radius: f64,
        /// Fill and outline.
        style: Style,
        /// Meaning.
        role: Role,
    },

    /// Straight line segment.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Stroke color.
        color: Color,
        /// Meaning.
        role: Role,
    },

    /// Circular sector, angles in degrees measured clockwise from 3 o'clock.
    Wedge {
        /// Circle center.
        center: Point,
        /// Circle radius.
        radius: f64,
        /// Start angle in degrees.
        start_deg: f64,
        /// Sweep in degrees.
        sweep_deg: f64,
        /// Fill (sector) and stroke (outline arc).
        style: Style,
        /// Meaning.
        role: Role,
    },

    /// Single-line text label.
    Text {
        /// Content.
        text: String,
        /// Anchor point; vertically the text is centered on it.
        at: Point,
        /// Font size in pixels.
        size: f64,
        /// Horizontal alignment.
        anchor: Anchor,
        /// Text color.
        color: Color,
        /// Meaning.
        role: Role,
    },
}

impl Mark {
    /// The role of this mark.
    #[must_use]
    pub fn role(&self) -> Role {
        match self {
            Self::Rect { role, .. }
            | Self::Circle { role, .. }
            | Self::Line { role, .. }
            | Self::Wedge { role, .. }
            | Self::Text { role, .. } => *role,
        }
    }

    /// Text content, for text marks.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}
