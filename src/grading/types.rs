//! Data types shared by the classification and aggregation steps.

use serde::{Deserialize, Serialize};

/// A grade as supplied by a caller: a numeric score or one of the textual
/// grade-vocabulary values (`Pass`, `Exemption`, ...).
///
/// Untagged so JSON numbers and strings both deserialize naturally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GradeValue {
    Numeric(f64),
    Text(String),
}

/// One course as consumed by the aggregator.
///
/// Missing or null credits count as zero and a missing grade falls into
/// the excluded bucket; malformed per-course input is never an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseInput {
    #[serde(default)]
    pub credits: Option<f64>,
    #[serde(default)]
    pub grade: Option<GradeValue>,
}

/// Computed academic metrics snapshot.
///
/// Credit and point totals are rounded to two decimal places; the course
/// counts always sum to the number of input courses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpaMetrics {
    pub gpa: f64,
    pub gpa_points: f64,
    pub gpa_credits: f64,
    pub completed_credits: f64,
    pub excluded_credits: f64,
    pub included_courses: usize,
    pub excluded_courses: usize,
}
