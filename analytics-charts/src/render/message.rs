//! Empty-state and error messages drawn into the chart image.

use analytics_core::{Anchor, Point, Role, Scene};

use super::{push_text, MESSAGE_SIZE};
use crate::palette::Palette;

/// Shown when a chart has no data at all.
pub const NO_DATA: &str = "No data available";
/// Shown when two compared series share no label.
pub const SERIES_MISMATCH: &str = "Series data do not match";
/// Shown when pie values sum to zero.
pub const NO_VALID_PIE_DATA: &str = "No valid data for pie chart";
/// Shown when a pie value is negative.
pub const NEGATIVE_PIE_VALUE: &str = "Pie chart values must be non-negative";

/// Center `text` on the scene in red.
pub fn render(scene: &mut Scene, text: &str, palette: &Palette) {
    let at = Point::new(
        f64::from(scene.width()) / 2.0,
        f64::from(scene.height()) / 2.0,
    );
    push_text(
        scene,
        text,
        at,
        MESSAGE_SIZE,
        Anchor::Middle,
        palette.red,
        Role::Message,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics_core::{Color, Mark};

    #[test]
    fn test_message_is_centered_and_red() {
        let palette = Palette::default();
        let mut scene = Scene::new(600, 400, palette.white);
        render(&mut scene, NO_DATA, &palette);

        assert_eq!(scene.message(), Some(NO_DATA));
        match &scene.marks()[0] {
            Mark::Text { at, color, .. } => {
                assert!((at.x - 300.0).abs() < f64::EPSILON);
                assert!((at.y - 200.0).abs() < f64::EPSILON);
                assert_eq!(*color, Color::rgb(231, 76, 60));
            }
            other => panic!("expected text mark, got {other:?}"),
        }
    }
}
