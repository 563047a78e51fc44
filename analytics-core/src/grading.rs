//! Grade scales and weighted averages.
//!
//! Two grading scales coexist: raw percentages (0-100, higher is better) and
//! transmuted grades (1.00-5.00, lower is better, 5.00 meaning failed).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Valid transmuted grades, best to worst.
pub const TRANSMUTED_GRADES: [f64; 10] = [
    1.00, 1.25, 1.50, 1.75, 2.00, 2.25, 2.50, 2.75, 3.00, 5.00,
];

/// Units assumed for a course whose unit count is missing.
pub const DEFAULT_UNITS: f64 = 3.0;

/// TWA reported when no grades are supplied.
pub const FAILING_TWA: f64 = 5.00;

const GRADE_TOLERANCE: f64 = 1e-9;

/// Raw-percentage thresholds and the transmuted grade they map to.
const RAW_TO_TRANSMUTED: [(f64, f64); 9] = [
    (96.0, 1.00),
    (93.0, 1.25),
    (90.0, 1.50),
    (87.0, 1.75),
    (84.0, 2.00),
    (81.0, 2.25),
    (78.0, 2.50),
    (75.0, 2.75),
    (70.0, 3.00),
];

/// Representative raw percentage for each passing transmuted grade.
const TRANSMUTED_TO_RAW: [(f64, f64); 9] = [
    (1.00, 98.0),
    (1.25, 94.0),
    (1.50, 91.0),
    (1.75, 88.0),
    (2.00, 85.0),
    (2.25, 82.0),
    (2.50, 79.0),
    (2.75, 76.0),
    (3.00, 72.0),
];

/// A concrete grading scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeFormat {
    /// Raw percentage, 0-100, higher is better.
    Raw,
    /// Transmuted grade, 1.00-5.00, lower is better.
    Transmuted,
}

impl GradeFormat {
    /// Whether a lower number means a better grade on this scale.
    #[must_use]
    pub fn lower_is_better(self) -> bool {
        matches!(self, Self::Transmuted)
    }

    /// Identifier used in requests and responses.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Transmuted => "transmuted",
        }
    }

    /// Convert a grade on this scale to a raw percentage.
    #[must_use]
    pub fn to_raw(self, grade: f64) -> f64 {
        match self {
            Self::Raw => grade,
            Self::Transmuted => transmuted_to_raw(grade),
        }
    }

    /// Convert a grade on this scale to a transmuted grade.
    #[must_use]
    pub fn to_transmuted(self, grade: f64) -> f64 {
        match self {
            Self::Raw => raw_to_transmuted(grade),
            Self::Transmuted => grade,
        }
    }
}

impl fmt::Display for GradeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested grading scale: explicit, or detected from the grades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatHint {
    /// Detect with [`detect_format`].
    #[default]
    Auto,
    /// Force raw percentages.
    Raw,
    /// Force transmuted grades.
    Transmuted,
}

impl FormatHint {
    /// Resolve the hint against the grades it applies to.
    #[must_use]
    pub fn resolve(self, grades: &[f64]) -> GradeFormat {
        match self {
            Self::Auto => detect_format(grades),
            Self::Raw => GradeFormat::Raw,
            Self::Transmuted => GradeFormat::Transmuted,
        }
    }
}

impl FromStr for FormatHint {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "auto" => Ok(Self::Auto),
            "raw" => Ok(Self::Raw),
            "transmuted" => Ok(Self::Transmuted),
            other => Err(CoreError::UnknownFormat(other.to_string())),
        }
    }
}

/// Whether `grade` is one of [`TRANSMUTED_GRADES`].
#[must_use]
pub fn is_valid_transmuted(grade: f64) -> bool {
    TRANSMUTED_GRADES
        .iter()
        .any(|t| (t - grade).abs() < GRADE_TOLERANCE)
}

/// Detect the grading scale: transmuted when strictly more than half of the
/// grades are valid transmuted values, raw otherwise.
#[must_use]
pub fn detect_format(grades: &[f64]) -> GradeFormat {
    let transmuted = grades.iter().filter(|g| is_valid_transmuted(**g)).count();
    if transmuted * 2 > grades.len() {
        GradeFormat::Transmuted
    } else {
        GradeFormat::Raw
    }
}

/// Whether every value lies on the 1.00-5.00 low-is-better band and the
/// majority are valid transmuted grades.
///
/// Used to pick the comparison chart's scale; empty input is not inverted.
#[must_use]
pub fn is_inverted_band(values: &[f64]) -> bool {
    !values.is_empty()
        && values.iter().all(|v| (1.0..=5.0).contains(v))
        && detect_format(values) == GradeFormat::Transmuted
}

/// Map a raw percentage to its transmuted grade.
#[must_use]
pub fn raw_to_transmuted(raw: f64) -> f64 {
    RAW_TO_TRANSMUTED
        .iter()
        .find(|(threshold, _)| raw >= *threshold)
        .map_or(FAILING_TWA, |(_, grade)| *grade)
}

/// Map a transmuted grade to a representative raw percentage (0 when failed
/// or not a valid transmuted grade).
#[must_use]
pub fn transmuted_to_raw(grade: f64) -> f64 {
    TRANSMUTED_TO_RAW
        .iter()
        .find(|(t, _)| (t - grade).abs() < GRADE_TOLERANCE)
        .map_or(0.0, |(_, raw)| *raw)
}

/// Round to `places` decimal places.
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

fn unit_at(units: &[f64], index: usize) -> f64 {
    units.get(index).copied().unwrap_or(DEFAULT_UNITS)
}

/// Term Weighted Average on the transmuted scale, rounded to 2 places.
///
/// Raw grades are transmuted first. Missing units default to
/// [`DEFAULT_UNITS`]. Returns [`FAILING_TWA`] when there is nothing to average.
#[must_use]
pub fn term_weighted_average(grades: &[f64], units: &[f64], format: GradeFormat) -> f64 {
    if grades.is_empty() || units.is_empty() {
        return FAILING_TWA;
    }

    let (weighted, total) = grades
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(weighted, total), (i, grade)| {
            let unit = unit_at(units, i);
            (weighted + format.to_transmuted(*grade) * unit, total + unit)
        });

    if total > 0.0 {
        round_to(weighted / total, 2)
    } else {
        FAILING_TWA
    }
}

/// Unit-weighted average on the raw scale, rounded to 2 places.
///
/// Transmuted grades are converted to raw first; 0 when the units sum to 0.
#[must_use]
pub fn weighted_average(grades: &[f64], units: &[f64], format: GradeFormat) -> f64 {
    let (weighted, total) = grades
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(weighted, total), (i, grade)| {
            let unit = unit_at(units, i);
            (weighted + format.to_raw(*grade) * unit, total + unit)
        });

    if total > 0.0 {
        round_to(weighted / total, 2)
    } else {
        0.0
    }
}

/// Letter-grade counts over raw percentages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeDistribution {
    /// 90 and above.
    pub a: usize,
    /// 80-89.
    pub b: usize,
    /// 70-79.
    pub c: usize,
    /// 60-69.
    pub d: usize,
    /// Below 60.
    pub f: usize,
}

impl GradeDistribution {
    /// Count raw grades per letter band.
    #[must_use]
    pub fn from_raw(grades: &[f64]) -> Self {
        grades.iter().fold(Self::default(), |mut dist, grade| {
            match *grade {
                g if g >= 90.0 => dist.a += 1,
                g if g >= 80.0 => dist.b += 1,
                g if g >= 70.0 => dist.c += 1,
                g if g >= 60.0 => dist.d += 1,
                _ => dist.f += 1,
            }
            dist
        })
    }

    /// `(letter, count)` pairs, A to F.
    #[must_use]
    pub fn bands(&self) -> [(&'static str, usize); 5] {
        [
            ("A", self.a),
            ("B", self.b),
            ("C", self.c),
            ("D", self.d),
            ("F", self.f),
        ]
    }
}

impl fmt::Display for GradeDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .bands()
            .iter()
            .map(|(letter, count)| format!("{letter}: {count}"))
            .collect();
        f.write_str(&parts.join(", "))
    }
}
