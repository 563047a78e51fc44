//! RGB pixel canvas painted with plotters.

use analytics_core::{Anchor, Color, Mark, Point, Rect, Role, Scene, Style};
use plotters::prelude::*;
use plotters::style::Color as _;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::error::{RenderError, RenderResult};
use crate::palette::Palette;

/// Bytes per pixel of the RGB buffer.
const CHANNELS: usize = 3;

type Area<'a> = DrawingArea<BitMapBackend<'a>, plotters::coord::Shift>;

/// A fixed-size RGB pixel buffer.
///
/// Created per chart, painted once from a [`Scene`] and then handed to the
/// encoder.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    buffer: Vec<u8>,
    palette: Palette,
}

impl Canvas {
    /// Allocate a white canvas.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidSize`] for a zero dimension.
    pub fn create(width: u32, height: u32) -> RenderResult<Self> {
        let len = usize::try_from(u64::from(width) * u64::from(height))
            .ok()
            .and_then(|pixels| pixels.checked_mul(CHANNELS))
            .filter(|len| *len > 0)
            .ok_or(RenderError::InvalidSize { width, height })?;

        let palette = Palette::default();
        let mut canvas = Self {
            width,
            height,
            buffer: vec![0; len],
            palette,
        };
        canvas.fill(palette.white);
        Ok(canvas)
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The colors this canvas draws with.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Raw RGB bytes, row-major.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: Color) {
        for chunk in self.buffer.chunks_exact_mut(CHANNELS) {
            chunk.copy_from_slice(&[color.r, color.g, color.b]);
        }
    }

    /// Color of the pixel at `(x, y)`, if inside the canvas.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let rgb = self.buffer.get(offset..offset + CHANNELS)?;
        Some(Color::rgb(rgb[0], rgb[1], rgb[2]))
    }

    /// Clear to the scene background and paint its marks in order.
    ///
    /// Labels that cannot be drawn (for instance when no system font is
    /// available) are logged and skipped. A message that cannot be drawn is
    /// an error, since the image would otherwise be blank.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::SizeMismatch`] when the scene was laid out for
    /// another size, or [`RenderError::Draw`] if a shape or message fails to
    /// draw.
    pub fn paint(&mut self, scene: &Scene) -> RenderResult<()> {
        if (scene.width(), scene.height()) != (self.width, self.height) {
            return Err(RenderError::SizeMismatch {
                scene_width: scene.width(),
                scene_height: scene.height(),
                canvas_width: self.width,
                canvas_height: self.height,
            });
        }

        self.fill(scene.background());

        let size = (self.width, self.height);
        let root = BitMapBackend::with_buffer(&mut self.buffer, size).into_drawing_area();
        for mark in scene.marks() {
            draw_mark(&root, mark)?;
        }
        root.present().map_err(|e| RenderError::Draw(e.to_string()))
    }

    /// Consume the canvas, returning its RGB bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

fn rgb(color: Color) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

#[allow(clippy::cast_possible_truncation)]
fn px(point: Point) -> (i32, i32) {
    (point.x.round() as i32, point.y.round() as i32)
}

fn corners(rect: &Rect) -> [(i32, i32); 2] {
    [
        px(Point::new(rect.x0, rect.y0)),
        px(Point::new(rect.x1, rect.y1)),
    ]
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

fn draw_mark(root: &Area<'_>, mark: &Mark) -> RenderResult<()> {
    match mark {
        Mark::Rect { rect, style, .. } => {
            let [a, b] = corners(rect);
            if let Some(fill) = style.fill {
                root.draw(&Rectangle::new([a, b], rgb(fill).filled()))
                    .map_err(draw_err)?;
            }
            if let Some(stroke) = style.stroke {
                root.draw(&Rectangle::new([a, b], rgb(stroke).stroke_width(1)))
                    .map_err(draw_err)?;
            }
        }
        Mark::Circle {
            center,
            radius,
            style,
            ..
        } => {
            #[allow(clippy::cast_possible_truncation)]
            let r = radius.round() as i32;
            if let Some(fill) = style.fill {
                root.draw(&Circle::new(px(*center), r, rgb(fill).filled()))
                    .map_err(draw_err)?;
            }
            if let Some(stroke) = style.stroke {
                root.draw(&Circle::new(px(*center), r, rgb(stroke).stroke_width(1)))
                    .map_err(draw_err)?;
            }
        }
        Mark::Line { from, to, color, .. } => {
            root.draw(&PathElement::new(
                vec![px(*from), px(*to)],
                rgb(*color).stroke_width(1),
            ))
            .map_err(draw_err)?;
        }
        Mark::Wedge {
            center,
            radius,
            start_deg,
            sweep_deg,
            style,
            ..
        } => draw_wedge(root, *center, *radius, *start_deg, *sweep_deg, *style)?,
        Mark::Text {
            text,
            at,
            size,
            anchor,
            color,
            role,
        } => {
            let h = match anchor {
                Anchor::Start => HPos::Left,
                Anchor::Middle => HPos::Center,
                Anchor::End => HPos::Right,
            };
            let style = ("sans-serif", *size)
                .into_font()
                .color(&rgb(*color))
                .pos(Pos::new(h, VPos::Center));
            if let Err(e) = root.draw(&Text::new(text.as_str(), px(*at), style)) {
                text_failure(text, *role, &e)?;
            }
        }
    }
    Ok(())
}

/// Decide what a failed text draw means: labels are skipped, messages fail.
fn text_failure<E: std::fmt::Display>(text: &str, role: Role, error: &E) -> RenderResult<()> {
    if role == Role::Message {
        tracing::error!(text = %text, error = %error, "Failed to draw chart message");
        return Err(RenderError::Draw(format!("message \"{text}\": {error}")));
    }
    tracing::warn!(text = %text, error = %error, "Skipping label that failed to draw");
    Ok(())
}

/// Sector as a polygon: the center followed by points along the arc.
fn wedge_points(center: Point, radius: f64, start_deg: f64, sweep_deg: f64) -> Vec<(i32, i32)> {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let steps = (sweep_deg.ceil() as usize).max(2);
    let mut points = Vec::with_capacity(steps + 2);
    points.push(px(center));
    for k in 0..=steps {
        #[allow(clippy::cast_precision_loss)]
        let angle = (start_deg + sweep_deg * k as f64 / steps as f64).to_radians();
        points.push(px(Point::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        )));
    }
    points
}

fn draw_wedge(
    root: &Area<'_>,
    center: Point,
    radius: f64,
    start_deg: f64,
    sweep_deg: f64,
    style: Style,
) -> RenderResult<()> {
    if sweep_deg <= 0.0 || radius <= 0.0 {
        return Ok(());
    }
    let points = wedge_points(center, radius, start_deg, sweep_deg);
    if let Some(fill) = style.fill {
        root.draw(&Polygon::new(points.clone(), rgb(fill).filled()))
            .map_err(draw_err)?;
    }
    if let Some(stroke) = style.stroke {
        let mut outline = points;
        outline.push(px(center));
        root.draw(&PathElement::new(outline, rgb(stroke).stroke_width(1)))
            .map_err(draw_err)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_rejects_zero_size() {
        assert!(matches!(
            Canvas::create(0, 100),
            Err(RenderError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_new_canvas_is_white() {
        let canvas = Canvas::create(10, 5).expect("canvas");
        assert_eq!(canvas.as_bytes().len(), 150);
        assert_eq!(canvas.pixel(9, 4), Some(Color::rgb(255, 255, 255)));
        assert_eq!(canvas.pixel(10, 0), None);
    }

    #[test]
    fn test_paint_filled_rect() {
        let mut canvas = Canvas::create(100, 100).expect("canvas");
        let blue = canvas.palette().blue;
        let mut scene = Scene::new(100, 100, Color::rgb(255, 255, 255));
        scene.push(Mark::Rect {
            rect: Rect::new(20.0, 20.0, 80.0, 80.0),
            style: Style::filled(blue),
            role: Role::Bar,
        });
        canvas.paint(&scene).expect("paint");

        assert_eq!(canvas.pixel(50, 50), Some(blue));
        assert_eq!(canvas.pixel(5, 5), Some(Color::rgb(255, 255, 255)));
    }

    #[test]
    fn test_paint_wedge_fills_its_quadrant() {
        let mut canvas = Canvas::create(100, 100).expect("canvas");
        let green = canvas.palette().green;
        let mut scene = Scene::new(100, 100, Color::rgb(255, 255, 255));
        // 0 to 90 degrees clockwise from 3 o'clock covers the lower right
        scene.push(Mark::Wedge {
            center: Point::new(50.0, 50.0),
            radius: 40.0,
            start_deg: 0.0,
            sweep_deg: 90.0,
            style: Style::filled(green),
            role: Role::Slice,
        });
        canvas.paint(&scene).expect("paint");

        assert_eq!(canvas.pixel(65, 65), Some(green));
        assert_eq!(canvas.pixel(35, 35), Some(Color::rgb(255, 255, 255)));
    }

    #[test]
    fn test_paint_clears_to_scene_background() {
        let mut canvas = Canvas::create(4, 4).expect("canvas");
        let gray = canvas.palette().light_gray;
        canvas.paint(&Scene::new(4, 4, gray)).expect("paint");
        assert_eq!(canvas.pixel(0, 0), Some(gray));
    }

    #[test]
    fn test_paint_rejects_size_mismatch() {
        let mut canvas = Canvas::create(10, 10).expect("canvas");
        let scene = Scene::new(20, 10, Color::rgb(255, 255, 255));
        assert!(matches!(
            canvas.paint(&scene),
            Err(RenderError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn test_failed_message_is_an_error() {
        let err = text_failure("No data available", Role::Message, &"no font")
            .expect_err("message failure propagates");
        assert!(err.to_string().contains("No data available"));

        assert!(text_failure("Math", Role::CategoryLabel, &"no font").is_ok());
        assert!(text_failure("Grades", Role::Title, &"no font").is_ok());
    }

    #[test]
    fn test_wedge_points_follow_arc() {
        let points = wedge_points(Point::new(0.0, 0.0), 10.0, 0.0, 90.0);
        assert_eq!(points[0], (0, 0));
        assert_eq!(points[1], (10, 0));
        assert_eq!(*points.last().expect("arc end"), (0, 10));
    }
}
