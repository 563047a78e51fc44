//! Academic performance analyses: grade analysis, course comparison,
//! performance prediction and scholarship eligibility.
//!
//! All operations are plain arithmetic over already-parsed inputs and return
//! serializable reports (camelCase field names on the wire).

use serde::{Deserialize, Serialize, Serializer};

use crate::grading::{
    round_to, term_weighted_average, weighted_average, FormatHint, GradeDistribution, GradeFormat,
};
use crate::{CoreError, CoreResult};

/// Raw-point gap below the class average that triggers a study recommendation.
const RAW_TRAILING_GAP: f64 = 5.0;
/// Same gap on the transmuted scale (one grade step).
const TRANSMUTED_TRAILING_GAP: f64 = 0.25;

// ============================================================================
// Grade analysis
// ============================================================================

/// Input for [`analyze_grades`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GradeAnalysisInput {
    /// Current-term grades.
    pub grades: Vec<f64>,
    /// Units per course, parallel to `grades`.
    pub units: Vec<f64>,
    /// Earlier terms, oldest first.
    pub historical: Vec<Vec<f64>>,
    /// Grading scale of `grades`.
    pub format: FormatHint,
}

/// Direction of recent grades.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceTrend {
    /// Mean step above +2.
    StrongUpward,
    /// Mean step above +0.5.
    Improving,
    /// Mean step within ±0.5.
    Stable,
    /// Mean step above -2.
    Declining,
    /// Mean step -2 or worse.
    ConcerningDownward,
    /// Fewer than two grades to compare.
    NoHistory,
}

impl PerformanceTrend {
    /// Classify the mean difference between successive grades.
    #[must_use]
    pub fn from_mean_step(step: f64) -> Self {
        match step {
            s if s > 2.0 => Self::StrongUpward,
            s if s > 0.5 => Self::Improving,
            s if s > -0.5 => Self::Stable,
            s if s > -2.0 => Self::Declining,
            _ => Self::ConcerningDownward,
        }
    }

    /// Human-readable description.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StrongUpward => "Strong upward trend",
            Self::Improving => "Improving",
            Self::Stable => "Stable",
            Self::Declining => "Declining",
            Self::ConcerningDownward => "Concerning downward trend",
            Self::NoHistory => "No historical data available",
        }
    }

    /// Whether grades are going down.
    #[must_use]
    pub fn is_declining(self) -> bool {
        matches!(self, Self::Declining | Self::ConcerningDownward)
    }
}

impl Serialize for PerformanceTrend {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Result of [`analyze_grades`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeAnalysis {
    /// Term weighted average on the transmuted scale.
    pub twa: f64,
    /// Unit-weighted average on the raw scale.
    pub weighted_average: f64,
    /// Scale the grades were read on.
    pub grade_format: GradeFormat,
    /// Letter-band counts, e.g. `"A: 2, B: 1, C: 0, D: 0, F: 0"`.
    pub grade_distribution: String,
    /// Trend across the first historical term and the current grades.
    pub performance_trend: PerformanceTrend,
    /// Study suggestions joined by `"; "`, empty when none apply.
    pub suggestions: String,
}

/// Analyze the current term's grades.
///
/// # Errors
///
/// Returns [`CoreError::EmptyInput`] if no current grades are given.
pub fn analyze_grades(input: &GradeAnalysisInput) -> CoreResult<GradeAnalysis> {
    if input.grades.is_empty() {
        return Err(CoreError::EmptyInput("current grades"));
    }

    let format = input.format.resolve(&input.grades);
    let raw: Vec<f64> = input.grades.iter().map(|g| format.to_raw(*g)).collect();
    let trend = performance_trend(&input.historical, &input.grades);

    let mut suggestions: Vec<&str> = Vec::new();
    if raw.iter().copied().fold(f64::INFINITY, f64::min) < 70.0 {
        suggestions.push("Focus on improving lowest performing course");
    }
    if trend.is_declining() {
        suggestions.push("Implement consistent study schedule");
        suggestions.push("Seek additional tutoring support");
    }
    if mean(&raw) < 80.0 {
        suggestions.push("Consider forming study groups");
    }

    tracing::debug!(
        grades = input.grades.len(),
        format = %format,
        trend = trend.as_str(),
        "Analyzed grades"
    );

    Ok(GradeAnalysis {
        twa: term_weighted_average(&input.grades, &input.units, format),
        weighted_average: weighted_average(&input.grades, &input.units, format),
        grade_format: format,
        grade_distribution: GradeDistribution::from_raw(&raw).to_string(),
        performance_trend: trend,
        suggestions: suggestions.join("; "),
    })
}

/// Trend over the first historical term followed by the current grades.
#[must_use]
pub fn performance_trend(historical: &[Vec<f64>], current: &[f64]) -> PerformanceTrend {
    let combined: Vec<f64> = historical
        .first()
        .into_iter()
        .flatten()
        .chain(current)
        .copied()
        .collect();

    if combined.len() < 2 {
        return PerformanceTrend::NoHistory;
    }

    let steps: Vec<f64> = combined.windows(2).map(|w| w[1] - w[0]).collect();
    PerformanceTrend::from_mean_step(mean(&steps))
}

// ============================================================================
// Course comparison
// ============================================================================

/// Input for [`compare_courses`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseComparisonInput {
    /// Course names.
    pub courses: Vec<String>,
    /// Student grade per course.
    pub grades: Vec<f64>,
    /// Class average per course.
    pub averages: Vec<f64>,
    /// Units per course; missing entries default to 3.
    pub units: Vec<f64>,
}

/// Result of [`compare_courses`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseComparison {
    /// Course with the best grade.
    pub best_course: String,
    /// Best grade.
    pub best_grade: f64,
    /// Course with the worst grade.
    pub weakest_course: String,
    /// Worst grade.
    pub weakest_grade: f64,
    /// Term weighted average.
    pub twa: f64,
    /// Detected scale.
    pub grade_format: GradeFormat,
    /// Courses where the student beats the class average.
    pub courses_above_average: Vec<String>,
    /// Courses where the student does not beat the class average.
    pub courses_below_average: Vec<String>,
    /// Population variance of the grades, rounded to 2 places.
    pub performance_variance: f64,
    /// Study recommendations.
    pub recommendations: Vec<String>,
}

/// Compare a student's course grades with class averages.
///
/// "Better" follows the detected scale: higher for raw grades, lower for
/// transmuted grades.
///
/// # Errors
///
/// Returns [`CoreError::EmptyInput`] without grades, or
/// [`CoreError::LengthMismatch`] when names or averages don't line up with
/// the grades.
pub fn compare_courses(input: &CourseComparisonInput) -> CoreResult<CourseComparison> {
    let n = input.grades.len();
    if n == 0 {
        return Err(CoreError::EmptyInput("student grades"));
    }
    check_len("course names", n, input.courses.len())?;
    check_len("class averages", n, input.averages.len())?;

    let format = crate::grading::detect_format(&input.grades);
    let better = |a: f64, b: f64| {
        if format.lower_is_better() {
            a < b
        } else {
            a > b
        }
    };

    let (mut best, mut worst) = (0, 0);
    for (i, grade) in input.grades.iter().enumerate() {
        if better(*grade, input.grades[best]) {
            best = i;
        }
        if better(input.grades[worst], *grade) {
            worst = i;
        }
    }

    let mut above = Vec::new();
    let mut below = Vec::new();
    let mut recommendations = Vec::new();
    for ((course, grade), average) in input.courses.iter().zip(&input.grades).zip(&input.averages) {
        if better(*grade, *average) {
            above.push(course.clone());
        } else {
            below.push(course.clone());
        }

        let trailing = if format.lower_is_better() {
            *grade > average + TRANSMUTED_TRAILING_GAP
        } else {
            *grade < average - RAW_TRAILING_GAP
        };
        if trailing {
            recommendations.push(format!("Focus additional study time on {course}"));
        }
    }
    if recommendations.is_empty() {
        recommendations.push("Maintain current performance levels".to_string());
    }

    let avg = mean(&input.grades);
    #[allow(clippy::cast_precision_loss)]
    let variance = input
        .grades
        .iter()
        .map(|g| (g - avg).powi(2))
        .sum::<f64>()
        / n as f64;

    tracing::debug!(courses = n, format = %format, "Compared courses");

    Ok(CourseComparison {
        best_course: input.courses[best].clone(),
        best_grade: input.grades[best],
        weakest_course: input.courses[worst].clone(),
        weakest_grade: input.grades[worst],
        twa: term_weighted_average(&input.grades, &input.units, format),
        grade_format: format,
        courses_above_average: above,
        courses_below_average: below,
        performance_variance: round_to(variance, 2),
        recommendations,
    })
}

// ============================================================================
// Prediction
// ============================================================================

/// Input for [`predict`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictionInput {
    /// Historical grades, oldest first.
    pub grades: Vec<f64>,
    /// Attendance percentage.
    pub attendance_rate: f64,
    /// Course contact hours.
    pub course_hours: f64,
    /// Credit units currently taken.
    pub credit_units: f64,
    /// Grading scale of `grades`.
    pub format: FormatHint,
}

/// A condition that raises the risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskFactor {
    /// Attendance below 85%.
    LowAttendance,
    /// Fewer than 30 course hours.
    InsufficientHours,
    /// Fewer than 15 credit units.
    LowUnitLoad,
    /// Trend factor below -0.5.
    DecliningTrend,
}

impl RiskFactor {
    /// Points added to the risk score.
    #[must_use]
    pub fn weight(self) -> u32 {
        match self {
            Self::LowAttendance => 3,
            Self::InsufficientHours => 2,
            Self::LowUnitLoad => 1,
            Self::DecliningTrend => 4,
        }
    }

    /// Human-readable description.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LowAttendance => "Low attendance",
            Self::InsufficientHours => "Insufficient course hours",
            Self::LowUnitLoad => "Low credit unit load",
            Self::DecliningTrend => "Declining grade trend",
        }
    }

    /// What to do about it.
    #[must_use]
    pub fn recommendation(self) -> &'static str {
        match self {
            Self::LowAttendance => "Improve class attendance to above 90%",
            Self::InsufficientHours => "Increase course engagement and study time",
            Self::LowUnitLoad => "Consider taking additional courses if academically prepared",
            Self::DecliningTrend => "Seek academic counseling immediately",
        }
    }
}

impl Serialize for RiskFactor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Overall risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    /// Score below 3.
    Low,
    /// Score 3 to 5.
    Medium,
    /// Score 6 or more.
    High,
}

impl RiskLevel {
    /// Classify a risk score.
    #[must_use]
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 6 => Self::High,
            s if s >= 3 => Self::Medium,
            _ => Self::Low,
        }
    }
}

/// Result of [`predict`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    /// Predicted next grade on the input scale, rounded to 2 places.
    pub predicted_grade: f64,
    /// Scale of the prediction.
    pub grade_format: GradeFormat,
    /// Risk classification.
    pub risk_level: RiskLevel,
    /// Summed risk weights.
    pub risk_score: u32,
    /// Conditions contributing to the risk score.
    pub risk_factors: Vec<RiskFactor>,
    /// Confidence in percent, rounded to 2 places.
    pub confidence_score: f64,
    /// Normalized least-squares slope of the grades.
    pub trend_factor: f64,
    /// Description of the trend factor.
    pub trend_analysis: &'static str,
    /// Positive factors.
    pub key_factors: Vec<&'static str>,
    /// Recommendations.
    pub recommendations: Vec<&'static str>,
    /// Whether the risk level is High.
    pub at_risk: bool,
}

/// Predict the next grade and assess academic risk.
///
/// # Errors
///
/// Returns [`CoreError::EmptyInput`] without historical grades.
pub fn predict(input: &PredictionInput) -> CoreResult<Prediction> {
    let Some(&last) = input.grades.last() else {
        return Err(CoreError::EmptyInput("historical grades"));
    };

    let format = input.format.resolve(&input.grades);
    let trend = trend_factor(&input.grades);
    let attendance_factor = input.attendance_rate / 100.0 * 0.4;
    let hours_factor = (input.course_hours / 60.0).min(1.0) * 0.3;
    let units_factor = (input.credit_units / 21.0).min(1.0) * 0.3;
    let adjustment = attendance_factor + hours_factor + units_factor;

    let predicted = match format {
        GradeFormat::Transmuted => (last + trend * 0.5 + adjustment * 0.5).clamp(1.0, 5.0),
        GradeFormat::Raw => (last + trend * 10.0 + adjustment * 15.0).clamp(0.0, 100.0),
    };

    let mut risk_factors = Vec::new();
    if input.attendance_rate < 85.0 {
        risk_factors.push(RiskFactor::LowAttendance);
    }
    if input.course_hours < 30.0 {
        risk_factors.push(RiskFactor::InsufficientHours);
    }
    if input.credit_units < 15.0 {
        risk_factors.push(RiskFactor::LowUnitLoad);
    }
    if trend < -0.5 {
        risk_factors.push(RiskFactor::DecliningTrend);
    }
    let risk_score: u32 = risk_factors.iter().map(|f| f.weight()).sum();
    let risk_level = RiskLevel::from_score(risk_score);

    let mut key_factors = Vec::new();
    if attendance_factor > 0.3 {
        key_factors.push("Good attendance");
    }
    if hours_factor > 0.2 {
        key_factors.push("Adequate course hours");
    }
    if units_factor > 0.2 {
        key_factors.push("Optimal credit load");
    }
    if trend > 0.0 {
        key_factors.push("Improving trend");
    }

    let mut recommendations: Vec<&'static str> =
        risk_factors.iter().map(|f| f.recommendation()).collect();
    if recommendations.is_empty() {
        recommendations.push("Continue current positive academic habits");
    }

    tracing::debug!(
        grades = input.grades.len(),
        risk_score,
        trend,
        "Generated prediction"
    );

    Ok(Prediction {
        predicted_grade: round_to(predicted, 2),
        grade_format: format,
        risk_level,
        risk_score,
        risk_factors,
        confidence_score: round_to(confidence(&input.grades), 2),
        trend_factor: trend,
        trend_analysis: describe_trend(trend),
        key_factors,
        recommendations,
        at_risk: risk_level == RiskLevel::High,
    })
}

/// Least-squares slope of `grades` over x = 1..n, divided by 10.
///
/// Zero with fewer than two grades.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn trend_factor(grades: &[f64]) -> f64 {
    if grades.len() < 2 {
        return 0.0;
    }

    let n = grades.len() as f64;
    let (sum_x, sum_y, sum_xy, sum_x2) = grades.iter().enumerate().fold(
        (0.0, 0.0, 0.0, 0.0),
        |(sx, sy, sxy, sx2), (i, y)| {
            let x = (i + 1) as f64;
            (sx + x, sy + y, sxy + x * y, sx2 + x * x)
        },
    );

    let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_x2 - sum_x * sum_x);
    slope / 10.0
}

/// Describe a trend factor in words.
#[must_use]
pub fn describe_trend(trend: f64) -> &'static str {
    match trend {
        t if t > 0.5 => "Strong improvement trajectory",
        t if t > 0.1 => "Gradual improvement",
        t if t > -0.1 => "Stable performance",
        t if t > -0.5 => "Slight decline",
        _ => "Significant decline",
    }
}

/// Confidence in percent: data quantity (saturating at five grades) times
/// consistency (one minus mean absolute deviation over 100).
#[allow(clippy::cast_precision_loss)]
fn confidence(grades: &[f64]) -> f64 {
    if grades.is_empty() {
        return 0.0;
    }
    let n = grades.len() as f64;
    let data_quality = (n / 5.0).min(1.0);
    let avg = mean(grades);
    let deviation = grades.iter().map(|g| (g - avg).abs()).sum::<f64>() / n;
    data_quality * (1.0 - deviation / 100.0) * 100.0
}

// ============================================================================
// Scholarship eligibility
// ============================================================================

/// Input for [`check_scholarship`].
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ScholarshipInput {
    /// Term weighted average (1.00-5.00, lower is better).
    pub twa: f64,
    /// Credit units currently taken.
    pub credit_units: f64,
    /// Units completed so far.
    pub completed_units: f64,
}

/// Eligibility outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EligibilityStatus {
    /// Meets the excellence criteria.
    Eligible,
    /// Meets a lesser tier.
    Conditional,
    /// No scholarship tier applies.
    #[serde(rename = "Not Eligible")]
    NotEligible,
}

/// Result of [`check_scholarship`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScholarshipAssessment {
    /// Outcome.
    pub eligibility_status: EligibilityStatus,
    /// Sum of the three component scores (max 100).
    pub overall_score: u32,
    /// Input TWA.
    pub twa: f64,
    /// TWA component (max 70).
    pub twa_score: u32,
    /// Academic load component (max 20).
    pub academic_load_score: u32,
    /// Degree progress component (max 10).
    pub progress_score: u32,
    /// Scholarships the student qualifies for.
    pub eligible_scholarships: Vec<&'static str>,
    /// Recommendations.
    pub recommendations: Vec<&'static str>,
}

/// Upper TWA bound and score, best first.
const TWA_SCORES: [(f64, u32); 8] = [
    (1.25, 70),
    (1.50, 60),
    (1.75, 50),
    (2.00, 40),
    (2.25, 30),
    (2.50, 20),
    (2.75, 10),
    (3.00, 5),
];

/// Score an eligibility request.
///
/// # Errors
///
/// Returns [`CoreError::TwaOutOfRange`] when the TWA is outside 1.00-5.00.
pub fn check_scholarship(input: &ScholarshipInput) -> CoreResult<ScholarshipAssessment> {
    let twa = input.twa;
    if !(1.0..=5.0).contains(&twa) {
        return Err(CoreError::TwaOutOfRange(twa));
    }

    let twa_score = TWA_SCORES
        .iter()
        .find(|(bound, _)| twa <= *bound)
        .map_or(0, |(_, score)| *score);

    let academic_load_score = match input.credit_units {
        u if u >= 18.0 => 20,
        u if u >= 15.0 => 15,
        u if u >= 12.0 => 10,
        _ => 5,
    };

    let progress_score = match input.completed_units {
        u if u >= 100.0 => 10,
        u if u >= 75.0 => 8,
        u if u >= 50.0 => 6,
        u if u >= 25.0 => 4,
        _ => 2,
    };

    let overall = twa_score + academic_load_score + progress_score;

    let (status, scholarships) = if overall >= 80 && twa <= 1.50 {
        let mut list = vec!["Academic Excellence Scholarship", "Dean's List Award"];
        if twa <= 1.25 {
            list.push("President's List Scholarship");
        }
        (EligibilityStatus::Eligible, list)
    } else if overall >= 60 && twa <= 2.00 {
        (
            EligibilityStatus::Conditional,
            vec!["Merit Scholarship", "Academic Achievement Award"],
        )
    } else if overall >= 40 && twa <= 2.50 {
        (
            EligibilityStatus::Conditional,
            vec!["Academic Improvement Grant"],
        )
    } else {
        (EligibilityStatus::NotEligible, Vec::new())
    };

    let mut recommendations = Vec::new();
    if twa_score < 40 {
        recommendations.push("Focus on improving TWA to 2.00 or below");
    }
    if academic_load_score < 15 {
        recommendations.push("Consider increasing credit unit load");
    }
    if progress_score < 6 {
        recommendations.push("Maintain steady progress toward degree completion");
    }
    if twa > 2.50 {
        recommendations.push("Critical: Improve grades to maintain academic standing");
    }
    if overall >= 80 {
        recommendations.push("Apply for multiple scholarship opportunities");
    }

    Ok(ScholarshipAssessment {
        eligibility_status: status,
        overall_score: overall,
        twa,
        twa_score,
        academic_load_score,
        progress_score,
        eligible_scholarships: scholarships,
        recommendations,
    })
}

// ============================================================================
// Helpers
// ============================================================================

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn check_len(field: &'static str, expected: usize, actual: usize) -> CoreResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(CoreError::LengthMismatch {
            field,
            expected,
            actual,
        })
    }
}
