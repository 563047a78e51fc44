//! End-to-end analysis tests: delimited form input through parsing into each
//! analysis operation.

use analytics_core::grading::{detect_format, term_weighted_average, TRANSMUTED_GRADES};
use analytics_core::parse::{parse_labels, parse_terms, parse_values};
use analytics_core::{
    analyze_grades, check_scholarship, compare_courses, predict, CourseComparisonInput,
    EligibilityStatus, FormatHint, GradeAnalysisInput, GradeFormat, PredictionInput, RiskLevel,
    ScholarshipInput,
};
use proptest::prelude::*;

#[test]
fn test_grade_analysis_from_form_fields() {
    let input = GradeAnalysisInput {
        grades: parse_values("1.25, 1.50, 2.00", "current grades").expect("grades"),
        units: parse_values("3,3,2", "units").expect("units"),
        historical: parse_terms("1.75,1.75;2.0,2.0", "historical grades").expect("terms"),
        format: "auto".parse().expect("format"),
    };

    let analysis = analyze_grades(&input).expect("analysis");
    assert_eq!(analysis.grade_format, GradeFormat::Transmuted);
    // (1.25*3 + 1.5*3 + 2.0*2) / 8 = 1.53125
    assert!((analysis.twa - 1.53).abs() < 1e-9);

    let json = serde_json::to_value(&analysis).expect("serialize");
    assert_eq!(json["gradeFormat"], "transmuted");
    assert!(json["performanceTrend"].is_string());
    assert!(json.get("weightedAverage").is_some());
}

#[test]
fn test_course_comparison_from_form_fields() {
    let input = CourseComparisonInput {
        courses: parse_labels("Math, Physics, Chemistry"),
        grades: parse_values("92,78,85", "student grades").expect("grades"),
        averages: parse_values("85,84,85", "class averages").expect("averages"),
        units: parse_values("4,3,3", "units").expect("units"),
    };

    let comparison = compare_courses(&input).expect("comparison");
    assert_eq!(comparison.best_course, "Math");
    assert_eq!(comparison.weakest_course, "Physics");
    assert_eq!(
        comparison.recommendations,
        vec!["Focus additional study time on Physics"]
    );

    let json = serde_json::to_value(&comparison).expect("serialize");
    assert_eq!(json["coursesAboveAverage"][0], "Math");
}

#[test]
fn test_prediction_and_scholarship_pipeline() {
    let prediction = predict(&PredictionInput {
        grades: parse_values("1.75,1.5,1.5,1.25", "historical grades").expect("grades"),
        attendance_rate: 92.0,
        course_hours: 45.0,
        credit_units: 18.0,
        format: FormatHint::Auto,
    })
    .expect("prediction");
    assert_eq!(prediction.grade_format, GradeFormat::Transmuted);
    assert_eq!(prediction.risk_level, RiskLevel::Low);

    let assessment = check_scholarship(&ScholarshipInput {
        twa: 1.4,
        credit_units: 18.0,
        completed_units: 80.0,
    })
    .expect("assessment");
    // 60 + 20 + 8
    assert_eq!(assessment.overall_score, 88);
    assert_eq!(assessment.eligibility_status, EligibilityStatus::Eligible);

    let json = serde_json::to_value(&assessment).expect("serialize");
    assert_eq!(json["eligibilityStatus"], "Eligible");
}

#[test]
fn test_malformed_input_is_reported() {
    let err = parse_values("90,8o", "current grades").expect_err("malformed");
    assert!(err.to_string().contains("current grades"));
}

proptest! {
    #[test]
    fn prop_twa_stays_on_scale(grades in prop::collection::vec(0.0f64..100.0, 1..12)) {
        let units = vec![3.0; grades.len()];
        let twa = term_weighted_average(&grades, &units, GradeFormat::Raw);
        prop_assert!((1.0..=5.0).contains(&twa));
    }

    #[test]
    fn prop_valid_transmuted_grades_are_detected(
        picks in prop::collection::vec(0usize..TRANSMUTED_GRADES.len(), 1..10)
    ) {
        let grades: Vec<f64> = picks.iter().map(|i| TRANSMUTED_GRADES[*i]).collect();
        prop_assert_eq!(detect_format(&grades), GradeFormat::Transmuted);
    }

    #[test]
    fn prop_scholarship_score_bounded(
        twa in 1.0f64..=5.0,
        load in 0.0f64..30.0,
        completed in 0.0f64..200.0,
    ) {
        let assessment = check_scholarship(&ScholarshipInput {
            twa,
            credit_units: load,
            completed_units: completed,
        }).expect("in range");
        prop_assert!(assessment.overall_score <= 100);
        prop_assert_eq!(
            assessment.overall_score,
            assessment.twa_score + assessment.academic_load_score + assessment.progress_score
        );
    }
}
