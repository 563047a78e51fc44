//! Integration tests for the chart engine (analytics-charts).
//!
//! Decodes the produced PNGs and checks geometry, pixel colors and the
//! empty-state behavior of every chart kind.

use analytics_charts::layout::{Layout, STANDARD_MARGIN};
use analytics_charts::render::message;
use analytics_charts::render::pie::{sweeps, FULL_TURN};
use analytics_charts::{BarAnchor, ChartEngine, ChartLabels, ComparisonStyle, Palette};
use analytics_core::{Color, Mark, Role, Series};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::RgbImage;
use proptest::prelude::*;

/// Decode base64 PNG text into an RGB image.
fn decode(image: &str) -> RgbImage {
    let bytes = STANDARD.decode(image).expect("valid base64");
    image::load_from_memory_with_format(&bytes, image::ImageFormat::Png)
        .expect("valid PNG")
        .to_rgb8()
}

fn color_at(img: &RgbImage, x: u32, y: u32) -> Color {
    let px = img.get_pixel(x, y);
    Color::rgb(px[0], px[1], px[2])
}

fn course_grades() -> Series {
    Series::new()
        .with("Math", 90.0)
        .with("Physics", 75.0)
        .with("Chem", 60.0)
}

// ==========================================================================
// Dimensions and encoding
// ==========================================================================

#[test]
fn test_decoded_png_matches_requested_size() {
    let series = course_grades();
    for (w, h) in [(800, 600), (400, 300), (1200, 800)] {
        let engine = ChartEngine::new(w, h);
        let images = [
            engine
                .generate_line_chart(&series, "Line", "x", "y")
                .expect("line"),
            engine
                .generate_bar_chart(&series, "Bar", "x", "y")
                .expect("bar"),
            engine
                .generate_double_bar_chart(&series, &series, "Cmp", "x", "y")
                .expect("double bar"),
            engine.generate_pie_chart(&series, "Pie").expect("pie"),
        ];
        for image in &images {
            let img = decode(image);
            assert_eq!(img.dimensions(), (w, h));
        }
    }
}

#[test]
fn test_corners_are_background() {
    let engine = ChartEngine::new(800, 600);
    let img = decode(
        &engine
            .generate_bar_chart(&course_grades(), "", "", "")
            .expect("bar"),
    );
    let white = Palette::default().white;
    assert_eq!(color_at(&img, 0, 0), white);
    assert_eq!(color_at(&img, 799, 599), white);
}

// ==========================================================================
// Bar chart pixels
// ==========================================================================

#[test]
fn test_bar_pixels_follow_series_order() {
    let palette = Palette::default();
    let engine = ChartEngine::new(800, 600);
    let series = course_grades();
    let scene = engine.bar_scene(&series, &ChartLabels::new("Grades", "Course", "Grade"));
    let img = decode(
        &engine
            .generate_bar_chart(&series, "Grades", "Course", "Grade")
            .expect("bar"),
    );

    let bars: Vec<_> = scene
        .marks_with(Role::Bar)
        .filter_map(|m| match m {
            Mark::Rect { rect, .. } => Some(rect.center()),
            _ => None,
        })
        .collect();
    assert_eq!(bars.len(), 3);

    let expected = [palette.blue, palette.green, palette.orange];
    for (center, color) in bars.iter().zip(expected) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (x, y) = (center.x.round() as u32, center.y.round() as u32);
        assert_eq!(color_at(&img, x, y), color);
        assert_ne!(color_at(&img, x, y), palette.white);
    }

    // Math is the leftmost bar
    assert!(bars[0].x < bars[1].x && bars[1].x < bars[2].x);
}

// ==========================================================================
// Empty states
// ==========================================================================

#[test]
fn test_every_kind_encodes_its_empty_message() {
    let engine = ChartEngine::new(600, 400);
    let empty = Series::new();
    let labels = ChartLabels::titled("Empty");

    let scenes = [
        engine.line_scene(&empty, &labels),
        engine.bar_scene(&empty, &labels),
        engine.double_bar_scene(&empty, &empty, &labels, &ComparisonStyle::default()),
        engine.pie_scene(&empty, "Empty"),
    ];
    for scene in &scenes {
        assert_eq!(scene.message(), Some(message::NO_DATA));
        let img = decode(&analytics_charts::rasterize(scene).expect("encode"));
        assert_eq!(img.dimensions(), (600, 400));
    }

    assert!(engine.generate_line_chart(&empty, "", "", "").is_ok());
    assert!(engine.generate_bar_chart(&empty, "", "", "").is_ok());
    assert!(engine
        .generate_double_bar_chart(&empty, &empty, "", "", "")
        .is_ok());
    assert!(engine.generate_pie_chart(&empty, "").is_ok());
}

#[test]
fn test_comparison_pairs_only_shared_labels() {
    let engine = ChartEngine::default();
    let a = Series::new().with("a", 1.0).with("b", 2.0);
    let b = Series::new().with("b", 3.0).with("c", 4.0);
    let scene = engine.double_bar_scene(
        &a,
        &b,
        &ChartLabels::default(),
        &ComparisonStyle::default(),
    );

    assert_eq!(scene.texts(Role::CategoryLabel).collect::<Vec<_>>(), vec!["b"]);
    assert_eq!(
        scene.texts(Role::ValueLabel).collect::<Vec<_>>(),
        vec!["2", "3"]
    );
}

#[test]
fn test_equal_values_give_equal_nonzero_bars() {
    let series = Series::new().with("a", 5.0).with("b", 5.0);
    for anchor in [BarAnchor::Zero, BarAnchor::Minimum] {
        let engine = ChartEngine::default().with_bar_anchor(anchor);
        let scene = engine.bar_scene(&series, &ChartLabels::default());
        let heights: Vec<f64> = scene
            .marks_with(Role::Bar)
            .filter_map(|m| match m {
                Mark::Rect { rect, .. } => Some(rect.height()),
                _ => None,
            })
            .collect();
        assert_eq!(heights.len(), 2);
        assert!((heights[0] - heights[1]).abs() < 1e-9);
        assert!(heights[0] > 0.0);
    }
}

// ==========================================================================
// Properties
// ==========================================================================

fn series_strategy(min: f64, max: f64) -> impl Strategy<Value = Series> {
    prop::collection::vec(min..max, 1..12).prop_map(|values| {
        values
            .into_iter()
            .enumerate()
            .map(|(i, v)| (format!("item {i}"), v))
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_pie_sweeps_sum_to_full_turn(series in series_strategy(0.01, 1000.0)) {
        let scene = ChartEngine::default().pie_scene(&series, "");
        let sweeps = sweeps(&scene);
        prop_assert_eq!(sweeps.len(), series.len());
        prop_assert!(sweeps.iter().all(|s| *s >= 0.0));
        prop_assert!((sweeps.iter().sum::<f64>() - FULL_TURN).abs() < 1e-6);
    }

    #[test]
    fn prop_bar_heights_within_plot(
        series in series_strategy(-500.0, 500.0),
        minimum in any::<bool>(),
    ) {
        let anchor = if minimum { BarAnchor::Minimum } else { BarAnchor::Zero };
        let engine = ChartEngine::default().with_bar_anchor(anchor);
        let scene = engine.bar_scene(&series, &ChartLabels::default());
        let plot_height = Layout::compute(800, 600, STANDARD_MARGIN, 0.0, 1.0).plot_height();

        let heights: Vec<f64> = scene
            .marks_with(Role::Bar)
            .filter_map(|m| match m {
                Mark::Rect { rect, .. } => Some(rect.height()),
                _ => None,
            })
            .collect();
        prop_assert_eq!(heights.len(), series.len());
        prop_assert!(heights.iter().all(|h| *h >= 0.0 && *h <= plot_height + 1e-9));
        if minimum {
            let tallest = heights.iter().copied().fold(0.0, f64::max);
            prop_assert!((tallest - plot_height).abs() < 1e-6);
        }
    }

    #[test]
    fn prop_line_marks_match_series(series in series_strategy(-100.0, 100.0)) {
        let scene = ChartEngine::default().line_scene(&series, &ChartLabels::default());
        prop_assert_eq!(scene.count(Role::Marker), series.len());
        prop_assert_eq!(scene.count(Role::Segment), series.len() - 1);
    }
}
