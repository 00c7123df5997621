//! Folds a course list into a single metrics snapshot.

use tracing::debug;

use crate::grading::classify::{GradeClass, classify};
use crate::grading::types::{CourseInput, GpaMetrics};

/// Passing threshold for numeric grades. Scores below it still weigh into
/// the GPA but earn no completed credits.
const PASSING_GRADE: f64 = 55.0;

/// Rounds to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Aggregates a course list into one [`GpaMetrics`].
///
/// Unrecognized grades never fail: they land in the excluded bucket. The
/// GPA division is guarded, so an all-textual course list yields 0.0.
pub fn aggregate_courses(courses: &[CourseInput]) -> GpaMetrics {
    let mut gpa_points = 0.0;
    let mut gpa_credits = 0.0;
    let mut completed_credits = 0.0;
    let mut excluded_credits = 0.0;

    let mut included_courses = 0;
    let mut excluded_courses = 0;

    for course in courses {
        let credits = course.credits.unwrap_or(0.0);

        match classify(course.grade.as_ref()) {
            GradeClass::Scored(score) => {
                gpa_points += score * credits;
                gpa_credits += credits;
                if score >= PASSING_GRADE {
                    completed_credits += credits;
                }
                included_courses += 1;
            }
            GradeClass::CreditOnly => {
                completed_credits += credits;
                excluded_courses += 1;
            }
            GradeClass::Excluded => {
                excluded_credits += credits;
                excluded_courses += 1;
            }
        }
    }

    let gpa = if gpa_credits > 0.0 {
        gpa_points / gpa_credits
    } else {
        0.0
    };

    debug!(
        included_courses,
        excluded_courses, "Aggregated course list"
    );

    GpaMetrics {
        gpa: round2(gpa),
        gpa_points: round2(gpa_points),
        gpa_credits: round2(gpa_credits),
        completed_credits: round2(completed_credits),
        excluded_credits: round2(excluded_credits),
        included_courses,
        excluded_courses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::types::GradeValue;

    fn numeric(credits: f64, grade: f64) -> CourseInput {
        CourseInput {
            credits: Some(credits),
            grade: Some(GradeValue::Numeric(grade)),
        }
    }

    fn textual(credits: f64, grade: &str) -> CourseInput {
        CourseInput {
            credits: Some(credits),
            grade: Some(GradeValue::Text(grade.to_string())),
        }
    }

    #[test]
    fn test_mixed_pass_and_exemption() {
        let courses = vec![
            numeric(3.0, 90.0),
            numeric(4.0, 40.0), // fail: counts in GPA, not completed
            textual(2.0, "Pass"),
            textual(1.0, "Exemption"),
        ];
        let metrics = aggregate_courses(&courses);

        assert_eq!(metrics.gpa, 61.43); // (90*3 + 40*4) / 7
        assert_eq!(metrics.gpa_points, 430.0);
        assert_eq!(metrics.gpa_credits, 7.0);
        assert_eq!(metrics.completed_credits, 5.0);
        assert_eq!(metrics.excluded_credits, 1.0);
        assert_eq!(metrics.included_courses, 2);
        assert_eq!(metrics.excluded_courses, 2);
    }

    #[test]
    fn test_empty_course_list() {
        let metrics = aggregate_courses(&[]);

        assert_eq!(metrics.gpa, 0.0);
        assert_eq!(metrics.gpa_points, 0.0);
        assert_eq!(metrics.gpa_credits, 0.0);
        assert_eq!(metrics.completed_credits, 0.0);
        assert_eq!(metrics.excluded_credits, 0.0);
        assert_eq!(metrics.included_courses, 0);
        assert_eq!(metrics.excluded_courses, 0);
    }

    #[test]
    fn test_gpa_is_zero_without_numeric_grades() {
        let courses = vec![
            textual(2.0, "Pass"),
            textual(3.0, "Exemption with points"),
            textual(1.0, "Exemption"),
        ];
        let metrics = aggregate_courses(&courses);

        assert_eq!(metrics.gpa, 0.0);
        assert_eq!(metrics.completed_credits, 5.0);
        assert_eq!(metrics.excluded_credits, 1.0);
        assert_eq!(metrics.included_courses, 0);
    }

    #[test]
    fn test_course_counts_sum_to_input_length() {
        let courses = vec![
            numeric(3.0, 75.0),
            textual(2.0, "Pass"),
            textual(1.0, "garbage value"),
            CourseInput::default(),
        ];
        let metrics = aggregate_courses(&courses);

        assert_eq!(
            metrics.included_courses + metrics.excluded_courses,
            courses.len()
        );
    }

    #[test]
    fn test_credit_conservation() {
        // completed + excluded + failed-numeric credits == total credits
        let courses = vec![
            numeric(3.0, 90.0),
            numeric(4.0, 40.0),
            textual(2.0, "Pass"),
            textual(1.5, "Exemption"),
        ];
        let metrics = aggregate_courses(&courses);

        let failed_credits = 4.0;
        let total: f64 = 3.0 + 4.0 + 2.0 + 1.5;
        assert!(
            (metrics.completed_credits + metrics.excluded_credits + failed_credits - total).abs()
                < 1e-9
        );
    }

    #[test]
    fn test_missing_credits_default_to_zero() {
        let courses = vec![CourseInput {
            credits: None,
            grade: Some(GradeValue::Numeric(90.0)),
        }];
        let metrics = aggregate_courses(&courses);

        assert_eq!(metrics.gpa, 0.0);
        assert_eq!(metrics.gpa_credits, 0.0);
        assert_eq!(metrics.included_courses, 1);
    }

    #[test]
    fn test_boundary_grade_55_completes() {
        let metrics = aggregate_courses(&[numeric(2.0, 55.0)]);
        assert_eq!(metrics.completed_credits, 2.0);

        let metrics = aggregate_courses(&[numeric(2.0, 54.9)]);
        assert_eq!(metrics.completed_credits, 0.0);
    }

    #[test]
    fn test_totals_are_rounded_to_two_decimals() {
        let metrics = aggregate_courses(&[numeric(3.0, 92.0), numeric(1.5, 67.0)]);

        assert_eq!(metrics.gpa_points, 376.5);
        assert_eq!(metrics.gpa_credits, 4.5);
        assert_eq!(metrics.gpa, 83.67); // 376.5 / 4.5 = 83.666...
    }

    #[test]
    fn test_json_course_list_deserializes() {
        let raw = r#"[
            {"grade": 90, "credits": 3},
            {"grade": "Pass", "credits": 2},
            {"grade": null, "credits": 1},
            {"credits": 1}
        ]"#;
        let courses: Vec<CourseInput> = serde_json::from_str(raw).unwrap();
        let metrics = aggregate_courses(&courses);

        assert_eq!(metrics.included_courses, 1);
        assert_eq!(metrics.excluded_courses, 3);
        assert_eq!(metrics.excluded_credits, 2.0);
    }
}
