//! `POST /api/analysis/*` - academic analyses, optionally charted.

use analytics_charts::{ChartKind, ComparisonStyle};
use analytics_core::{
    analyze_grades, check_scholarship, compare_courses, predict, CourseComparison,
    CourseComparisonInput, GradeAnalysis, GradeAnalysisInput, GradeFormat, Prediction,
    PredictionInput, ScholarshipAssessment, Series,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use super::render_chart;
use crate::error::ApiError;
use crate::metrics;
use crate::models::{
    validate_lists, AnalysisResponse, CourseComparisonRequest, GradeAnalysisRequest,
    PredictionRequest, ScholarshipRequest,
};
use crate::AppState;

/// Label of the predicted point on the prediction chart.
pub const PREDICTED_LABEL: &str = "Predicted";

fn grade_axis(format: GradeFormat) -> &'static str {
    match format {
        GradeFormat::Raw => "Grade (%)",
        GradeFormat::Transmuted => "Grade (1.00-5.00)",
    }
}

// ============================================================================
// Grades
// ============================================================================

fn run_grade_analysis(
    request: &GradeAnalysisRequest,
) -> Result<(GradeAnalysisInput, GradeAnalysis), ApiError> {
    let input = request.to_input()?;
    validate_lists(&[
        ("currentGrades", input.grades.len()),
        ("units", input.units.len()),
        (
            "historicalGrades",
            input.historical.iter().map(Vec::len).sum::<usize>(),
        ),
    ])?;
    let analysis = analyze_grades(&input)?;
    metrics::record_analysis_request("grades");
    Ok((input, analysis))
}

/// TWA, averages, distribution, trend and suggestions for a term.
#[tracing::instrument(name = "analyze_grades", skip_all)]
pub async fn grades(
    payload: Result<Json<GradeAnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse<GradeAnalysis>>, ApiError> {
    let Json(request) = payload?;
    let (_, analysis) = run_grade_analysis(&request)?;
    Ok(Json(AnalysisResponse::new(analysis)))
}

/// Grade analysis plus a bar chart of the current grades.
#[tracing::instrument(name = "analyze_grades_chart", skip_all)]
pub async fn grades_chart(
    State(state): State<AppState>,
    payload: Result<Json<GradeAnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse<GradeAnalysis>>, ApiError> {
    let Json(request) = payload?;
    let (input, analysis) = run_grade_analysis(&request)?;
    let engine = state.engine(request.size)?;

    let series = Series::zip(&request.course_labels(input.grades.len()), &input.grades);
    let y_label = grade_axis(analysis.grade_format);
    let chart = render_chart(ChartKind::Bar, engine, series.len(), move |engine| {
        engine.generate_bar_chart(&series, "Current Grades", "Course", y_label)
    })
    .await?;
    Ok(Json(AnalysisResponse::new(analysis).with_chart(chart)))
}

// ============================================================================
// Course comparison
// ============================================================================

fn run_course_comparison(
    request: &CourseComparisonRequest,
) -> Result<(CourseComparisonInput, CourseComparison), ApiError> {
    let input = request.to_input()?;
    validate_lists(&[
        ("courseNames", input.courses.len()),
        ("studentGrades", input.grades.len()),
        ("classAverages", input.averages.len()),
        ("units", input.units.len()),
    ])?;
    let comparison = compare_courses(&input)?;
    metrics::record_analysis_request("courses");
    Ok((input, comparison))
}

/// Strongest and weakest courses relative to class averages.
#[tracing::instrument(name = "compare_courses", skip_all)]
pub async fn courses(
    payload: Result<Json<CourseComparisonRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse<CourseComparison>>, ApiError> {
    let Json(request) = payload?;
    let (_, comparison) = run_course_comparison(&request)?;
    Ok(Json(AnalysisResponse::new(comparison)))
}

/// Course comparison plus a student-vs-class-average chart.
#[tracing::instrument(name = "compare_courses_chart", skip_all)]
pub async fn courses_chart(
    State(state): State<AppState>,
    payload: Result<Json<CourseComparisonRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse<CourseComparison>>, ApiError> {
    let Json(request) = payload?;
    let (input, comparison) = run_course_comparison(&request)?;
    let engine = state.engine(request.size)?;

    let student = Series::zip(&input.courses, &input.grades);
    let class = Series::zip(&input.courses, &input.averages);
    let y_label = grade_axis(comparison.grade_format);
    let style = ComparisonStyle {
        lower_is_better: comparison.grade_format.lower_is_better(),
        ..ComparisonStyle::default()
    };
    let chart = render_chart(ChartKind::DoubleBar, engine, student.len(), move |engine| {
        engine.generate_double_bar_chart_with(
            &student,
            &class,
            "Student vs Class Average",
            "Course",
            y_label,
            &style,
        )
    })
    .await?;
    Ok(Json(AnalysisResponse::new(comparison).with_chart(chart)))
}

// ============================================================================
// Prediction
// ============================================================================

fn run_prediction(request: &PredictionRequest) -> Result<(PredictionInput, Prediction), ApiError> {
    let input = request.to_input()?;
    validate_lists(&[("historicalGrades", input.grades.len())])?;
    let prediction = predict(&input)?;
    metrics::record_analysis_request("prediction");
    Ok((input, prediction))
}

/// Next-grade prediction and risk assessment.
#[tracing::instrument(name = "predict", skip_all)]
pub async fn prediction(
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse<Prediction>>, ApiError> {
    let Json(request) = payload?;
    let (_, prediction) = run_prediction(&request)?;
    Ok(Json(AnalysisResponse::new(prediction)))
}

/// Prediction plus a line chart of past terms and the predicted grade.
#[tracing::instrument(name = "predict_chart", skip_all)]
pub async fn prediction_chart(
    State(state): State<AppState>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse<Prediction>>, ApiError> {
    let Json(request) = payload?;
    let (input, prediction) = run_prediction(&request)?;
    let engine = state.engine(request.size)?;

    let series = trend_series(&input.grades, prediction.predicted_grade);
    let y_label = grade_axis(prediction.grade_format);
    let chart = render_chart(ChartKind::Line, engine, series.len(), move |engine| {
        engine.generate_line_chart(&series, "Grade Trend and Prediction", "Term", y_label)
    })
    .await?;
    Ok(Json(AnalysisResponse::new(prediction).with_chart(chart)))
}

/// `Term 1..n` followed by the predicted point.
fn trend_series(history: &[f64], predicted: f64) -> Series {
    history
        .iter()
        .enumerate()
        .map(|(i, grade)| (format!("Term {}", i + 1), *grade))
        .chain(std::iter::once((PREDICTED_LABEL.to_string(), predicted)))
        .collect()
}

// ============================================================================
// Scholarship
// ============================================================================

/// Scholarship eligibility from TWA, load and progress.
#[tracing::instrument(name = "check_scholarship", skip_all)]
pub async fn scholarship(
    payload: Result<Json<ScholarshipRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse<ScholarshipAssessment>>, ApiError> {
    let Json(request) = payload?;
    let assessment = check_scholarship(&request.into())?;
    metrics::record_analysis_request("scholarship");
    Ok(Json(AnalysisResponse::new(assessment)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_series_appends_prediction() {
        let series = trend_series(&[80.0, 85.0], 88.5);
        assert_eq!(
            series.labels().collect::<Vec<_>>(),
            vec!["Term 1", "Term 2", PREDICTED_LABEL]
        );
        assert_eq!(series.values().last(), Some(88.5));
    }

    #[test]
    fn test_grade_axis_names_the_scale() {
        assert_eq!(grade_axis(GradeFormat::Raw), "Grade (%)");
        assert_eq!(grade_axis(GradeFormat::Transmuted), "Grade (1.00-5.00)");
    }

    #[test]
    fn test_grade_analysis_rejects_empty_grades() {
        let request = GradeAnalysisRequest::default();
        assert!(matches!(
            run_grade_analysis(&request),
            Err(ApiError::Input(_))
        ));
    }

    #[test]
    fn test_course_comparison_length_mismatch_is_input_error() {
        let request = CourseComparisonRequest {
            course_names: "Math,Physics".to_string(),
            student_grades: "90".to_string(),
            class_averages: "85,80".to_string(),
            ..CourseComparisonRequest::default()
        };
        assert!(matches!(
            run_course_comparison(&request),
            Err(ApiError::Input(_))
        ));
    }
}
