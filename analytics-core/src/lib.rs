//! # Student Analytics Core
//!
//! Data model shared by the chart engine and the analytics service.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               analytics-core                │
//! ├─────────────────────────────────────────────┤
//! │  Chart Input     │  Display List            │
//! │  - Series        │  - Marks + roles         │
//! │  - PairedSeries  │  - Scene                 │
//! ├─────────────────────────────────────────────┤
//! │  Grading         │  Analysis                │
//! │  - Scales        │  - Grades / courses      │
//! │  - TWA           │  - Prediction            │
//! │  - Parsing       │  - Scholarship           │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod analysis;
pub mod element;
pub mod error;
pub mod grading;
pub mod parse;
pub mod scene;
pub mod series;

pub use analysis::{
    analyze_grades, check_scholarship, compare_courses, predict, CourseComparison,
    CourseComparisonInput, EligibilityStatus, GradeAnalysis, GradeAnalysisInput,
    PerformanceTrend, Prediction, PredictionInput, RiskFactor, RiskLevel, ScholarshipAssessment,
    ScholarshipInput,
};
pub use element::{Anchor, Color, Mark, Point, Rect, Role, Style};
pub use error::{CoreError, CoreResult};
pub use grading::{FormatHint, GradeDistribution, GradeFormat};
pub use scene::Scene;
pub use series::{PairedEntry, PairedSeries, Series, SeriesEntry};

/// Analytics core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
