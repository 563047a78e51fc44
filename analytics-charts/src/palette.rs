//! Named chart colors.

use analytics_core::Color;

/// The color table every chart is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Background.
    pub white: Color,
    /// Outlines and labels.
    pub black: Color,
    /// Primary series.
    pub blue: Color,
    /// Messages.
    pub red: Color,
    /// Categorical.
    pub green: Color,
    /// Baseline series.
    pub orange: Color,
    /// Categorical.
    pub purple: Color,
    /// Notes.
    pub gray: Color,
    /// Grid lines.
    pub light_gray: Color,
    /// Titles.
    pub dark_gray: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            white: Color::rgb(255, 255, 255),
            black: Color::rgb(0, 0, 0),
            blue: Color::rgb(52, 152, 219),
            red: Color::rgb(231, 76, 60),
            green: Color::rgb(46, 204, 113),
            orange: Color::rgb(243, 156, 18),
            purple: Color::rgb(155, 89, 182),
            gray: Color::rgb(149, 165, 166),
            light_gray: Color::rgb(236, 240, 241),
            dark_gray: Color::rgb(52, 73, 94),
        }
    }
}

impl Palette {
    /// Number of colors in the categorical cycle.
    pub const CATEGORICAL_LEN: usize = 5;

    /// Color for the `index`-th category: blue, green, orange, purple, red,
    /// then around again.
    #[must_use]
    pub fn categorical(&self, index: usize) -> Color {
        match index % Self::CATEGORICAL_LEN {
            0 => self.blue,
            1 => self.green,
            2 => self.orange,
            3 => self.purple,
            _ => self.red,
        }
    }

    /// Look a color up by name (`"light_gray"`, `"blue"`, ...).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Color> {
        let color = match name {
            "white" => self.white,
            "black" => self.black,
            "blue" => self.blue,
            "red" => self.red,
            "green" => self.green,
            "orange" => self.orange,
            "purple" => self.purple,
            "gray" => self.gray,
            "light_gray" => self.light_gray,
            "dark_gray" => self.dark_gray,
            _ => return None,
        };
        Some(color)
    }
}
