//! Request and response bodies.
//!
//! Chart requests carry series directly. Analysis requests carry the
//! comma/semicolon-delimited strings a grade form submits and are parsed with
//! `analytics_core::parse`.

use analytics_charts::{ChartKind, ChartLabels};
use analytics_core::parse::{parse_labels, parse_terms, parse_values};
use analytics_core::{
    CourseComparisonInput, CoreResult, FormatHint, GradeAnalysisInput, PredictionInput,
    ScholarshipInput, Series,
};
use serde::{Deserialize, Serialize};

use crate::validation::{validate_count, validate_label, validate_series, ValidationError};

/// Optional output size; missing values fall back to the server defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Dimensions {
    /// Image width in pixels.
    pub width: Option<u32>,
    /// Image height in pixels.
    pub height: Option<u32>,
}

/// Body of the line, bar and pie chart endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRequest {
    /// Ordered label/value pairs.
    #[serde(default)]
    pub data: Series,
    /// Chart title.
    #[serde(default)]
    pub title: String,
    /// X axis title.
    #[serde(default)]
    pub x_label: String,
    /// Y axis title.
    #[serde(default)]
    pub y_label: String,
    /// Output size.
    #[serde(flatten)]
    pub size: Dimensions,
    /// Bar charts only: start the scale at zero (default) or at the minimum.
    pub anchor_at_zero: Option<bool>,
}

impl ChartRequest {
    /// Check label lengths and the series size.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_titles(&self.title, &self.x_label, &self.y_label)?;
        validate_series("data", &self.data)
    }

    /// Title and axis titles.
    #[must_use]
    pub fn labels(&self) -> ChartLabels {
        ChartLabels::new(&self.title, &self.x_label, &self.y_label)
    }
}

/// Body of the comparison chart endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoubleBarRequest {
    /// Student values.
    #[serde(default)]
    pub primary: Series,
    /// Reference values, typically class averages.
    #[serde(default)]
    pub baseline: Series,
    /// Chart title.
    #[serde(default)]
    pub title: String,
    /// X axis title.
    #[serde(default)]
    pub x_label: String,
    /// Y axis title.
    #[serde(default)]
    pub y_label: String,
    /// Output size.
    #[serde(flatten)]
    pub size: Dimensions,
    /// Legend caption of the primary series.
    pub primary_name: Option<String>,
    /// Legend caption of the baseline series.
    pub baseline_name: Option<String>,
    /// Whether lower values are better; detected from the values when absent.
    pub lower_is_better: Option<bool>,
}

impl DoubleBarRequest {
    /// Check label lengths and both series.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_titles(&self.title, &self.x_label, &self.y_label)?;
        if let Some(name) = &self.primary_name {
            validate_label("primaryName", name)?;
        }
        if let Some(name) = &self.baseline_name {
            validate_label("baselineName", name)?;
        }
        validate_series("primary", &self.primary)?;
        validate_series("baseline", &self.baseline)
    }

    /// Title and axis titles.
    #[must_use]
    pub fn labels(&self) -> ChartLabels {
        ChartLabels::new(&self.title, &self.x_label, &self.y_label)
    }
}

fn validate_titles(title: &str, x_label: &str, y_label: &str) -> Result<(), ValidationError> {
    validate_label("title", title)?;
    validate_label("xLabel", x_label)?;
    validate_label("yLabel", y_label)
}

/// Successful chart response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartResponse {
    /// Always `true`.
    pub success: bool,
    /// Kind of chart rendered.
    pub chart_type: ChartKind,
    /// Base64-encoded PNG.
    pub image_data: String,
    /// Number of data points plotted.
    pub data_points: usize,
    /// Image width.
    pub width: u32,
    /// Image height.
    pub height: u32,
}

// ============================================================================
// Analysis requests
// ============================================================================

/// Body of `/api/analysis/grades`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeAnalysisRequest {
    /// Comma-separated current grades, e.g. `"90, 85, 88"`.
    pub current_grades: String,
    /// Comma-separated units per course.
    #[serde(default)]
    pub units: String,
    /// Earlier terms: semicolon-separated lists, e.g. `"80,82;85,87"`.
    #[serde(default)]
    pub historical_grades: String,
    /// Comma-separated course names, used to label the chart.
    #[serde(default)]
    pub course_names: String,
    /// `auto`, `raw` or `transmuted`.
    #[serde(default)]
    pub grade_format: FormatHint,
    /// Chart size for the charted variant.
    #[serde(flatten)]
    pub size: Dimensions,
}

impl GradeAnalysisRequest {
    /// Parse the delimited fields.
    ///
    /// # Errors
    ///
    /// Returns a [`CoreError`](analytics_core::CoreError) for malformed numbers.
    pub fn to_input(&self) -> CoreResult<GradeAnalysisInput> {
        Ok(GradeAnalysisInput {
            grades: parse_values(&self.current_grades, "current grades")?,
            units: parse_values(&self.units, "units")?,
            historical: parse_terms(&self.historical_grades, "historical grades")?,
            format: self.grade_format,
        })
    }

    /// Course names, or `Course 1..n` when none were given.
    #[must_use]
    pub fn course_labels(&self, count: usize) -> Vec<String> {
        let names = parse_labels(&self.course_names);
        if names.len() == count {
            names
        } else {
            (1..=count).map(|i| format!("Course {i}")).collect()
        }
    }
}

/// Body of `/api/analysis/courses`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseComparisonRequest {
    /// Comma-separated course names.
    pub course_names: String,
    /// Comma-separated student grades.
    pub student_grades: String,
    /// Comma-separated class averages.
    pub class_averages: String,
    /// Comma-separated units per course.
    #[serde(default)]
    pub units: String,
    /// Chart size for the charted variant.
    #[serde(flatten)]
    pub size: Dimensions,
}

impl CourseComparisonRequest {
    /// Parse the delimited fields.
    ///
    /// # Errors
    ///
    /// Returns a [`CoreError`](analytics_core::CoreError) for malformed numbers.
    pub fn to_input(&self) -> CoreResult<CourseComparisonInput> {
        Ok(CourseComparisonInput {
            courses: parse_labels(&self.course_names),
            grades: parse_values(&self.student_grades, "student grades")?,
            averages: parse_values(&self.class_averages, "class averages")?,
            units: parse_values(&self.units, "units")?,
        })
    }
}

/// Body of `/api/analysis/prediction`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRequest {
    /// Comma-separated historical grades, oldest first.
    pub historical_grades: String,
    /// Attendance percentage.
    #[serde(default)]
    pub attendance_rate: f64,
    /// Course contact hours.
    #[serde(default)]
    pub course_hours: f64,
    /// Credit units currently taken.
    #[serde(default)]
    pub credit_units: f64,
    /// `auto`, `raw` or `transmuted`.
    #[serde(default)]
    pub grade_format: FormatHint,
    /// Chart size for the charted variant.
    #[serde(flatten)]
    pub size: Dimensions,
}

impl PredictionRequest {
    /// Parse the delimited fields.
    ///
    /// # Errors
    ///
    /// Returns a [`CoreError`](analytics_core::CoreError) for malformed numbers.
    pub fn to_input(&self) -> CoreResult<PredictionInput> {
        Ok(PredictionInput {
            grades: parse_values(&self.historical_grades, "historical grades")?,
            attendance_rate: self.attendance_rate,
            course_hours: self.course_hours,
            credit_units: self.credit_units,
            format: self.grade_format,
        })
    }
}

/// Body of `/api/analysis/scholarship`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScholarshipRequest {
    /// Term weighted average.
    pub twa: f64,
    /// Credit units currently taken.
    #[serde(default)]
    pub credit_units: f64,
    /// Units completed so far.
    #[serde(default)]
    pub completed_units: f64,
}

impl From<ScholarshipRequest> for ScholarshipInput {
    fn from(request: ScholarshipRequest) -> Self {
        Self {
            twa: request.twa,
            credit_units: request.credit_units,
            completed_units: request.completed_units,
        }
    }
}

/// Check that no parsed list is larger than the service accepts.
///
/// # Errors
///
/// Returns [`ValidationError::TooManyPoints`] for the first oversized list.
pub fn validate_lists(lists: &[(&'static str, usize)]) -> Result<(), ValidationError> {
    lists
        .iter()
        .try_for_each(|&(field, count)| validate_count(field, count))
}

/// Successful analysis response, optionally with a chart.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse<T> {
    /// Always `true`.
    pub success: bool,
    /// Analysis result.
    pub analysis: T,
    /// Chart of the analyzed data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartResponse>,
}

impl<T> AnalysisResponse<T> {
    /// Response without a chart.
    #[must_use]
    pub fn new(analysis: T) -> Self {
        Self {
            success: true,
            analysis,
            chart: None,
        }
    }

    /// Attach a chart.
    #[must_use]
    pub fn with_chart(mut self, chart: ChartResponse) -> Self {
        self.chart = Some(chart);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_request_from_object_data() {
        let request: ChartRequest = serde_json::from_value(serde_json::json!({
            "data": { "Math": 90, "Physics": 75 },
            "title": "Grades",
            "xLabel": "Course",
            "width": 640,
            "anchorAtZero": false
        }))
        .expect("parse");

        assert_eq!(request.data.len(), 2);
        assert_eq!(request.x_label, "Course");
        assert_eq!(request.y_label, "");
        assert_eq!(
            request.size,
            Dimensions {
                width: Some(640),
                height: None
            }
        );
        assert_eq!(request.anchor_at_zero, Some(false));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_double_bar_request_validation_names_field() {
        let request = DoubleBarRequest {
            primary_name: Some("x".repeat(500)),
            ..DoubleBarRequest::default()
        };
        assert_eq!(request.validate().map_err(|e| e.field()), Err("primaryName"));
    }

    #[test]
    fn test_grade_request_parses_fields() {
        let request: GradeAnalysisRequest = serde_json::from_value(serde_json::json!({
            "currentGrades": "90, 85",
            "units": "3,4",
            "historicalGrades": "80,82;85",
            "gradeFormat": "raw"
        }))
        .expect("parse");
        let input = request.to_input().expect("input");
        assert_eq!(input.grades, vec![90.0, 85.0]);
        assert_eq!(input.units, vec![3.0, 4.0]);
        assert_eq!(input.historical, vec![vec![80.0, 82.0], vec![85.0]]);
        assert_eq!(input.format, FormatHint::Raw);
    }

    #[test]
    fn test_course_labels_fall_back_when_counts_differ() {
        let request = GradeAnalysisRequest {
            course_names: "Math, Physics".to_string(),
            ..GradeAnalysisRequest::default()
        };
        assert_eq!(request.course_labels(2), vec!["Math", "Physics"]);
        assert_eq!(
            request.course_labels(3),
            vec!["Course 1", "Course 2", "Course 3"]
        );
    }

    #[test]
    fn test_malformed_number_is_an_input_error() {
        let request = CourseComparisonRequest {
            course_names: "Math".to_string(),
            student_grades: "ninety".to_string(),
            class_averages: "80".to_string(),
            ..CourseComparisonRequest::default()
        };
        assert!(request.to_input().is_err());
    }

    #[test]
    fn test_analysis_response_omits_missing_chart() {
        let json = serde_json::to_value(AnalysisResponse::new(1)).expect("serialize");
        assert_eq!(json, serde_json::json!({ "success": true, "analysis": 1 }));
    }
}
