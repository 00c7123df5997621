//! Course row extraction from transcript text lines.
//!
//! Transcripts are flowed text, not true tables: long course names wrap
//! across lines with no continuation marker. Rows are rebuilt by
//! accumulating lines into a buffer until the trailing fields (grade and
//! semester, optionally credits) parse, which is the only reliable signal
//! that a row is complete.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::grading::types::{CourseInput, GradeValue};

/// Term token, e.g. `2023-2024 Fall`.
const SEMESTER: &str = r"\d{4}-\d{4}\s+(?:Spring|Winter|Summer|Fall)";
/// Numeric 0-100 score, `Pass`, or one of the `Exemption` variants.
const GRADE: &str = r"(?:Exemption(?:\s+with(?:out)?\s+points)?|Pass|\d{1,3})";
/// Integer or decimal credits, e.g. `3` or `5.5`.
const CREDITS: &str = r"\d+(?:\.\d+)?";
/// Course code, e.g. `02340118`.
const CODE: &str = r"[A-Z]?\d{5,8}";

/// optional code + name + credits + grade + semester
static ROW_WITH_CREDITS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?:{CODE}\s+)?(?P<course>.+?)\s+(?P<credits>{CREDITS})\s+(?P<grade>{GRADE})\s+(?P<semester>{SEMESTER})\s*$"
    ))
    .unwrap()
});

/// optional code + name + grade + semester (no credits column)
static ROW_NO_CREDITS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?:{CODE}\s+)?(?P<course>.+?)\s+(?P<grade>{GRADE})\s+(?P<semester>{SEMESTER})\s*$"
    ))
    .unwrap()
});

/// A single parsed course row, with every field as document text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub course: String,
    /// Decimal text, or `-` when the row had no credits column.
    pub credits: String,
    pub grade: String,
    pub semester: String,
}

impl CourseRecord {
    /// Translates the raw record into the aggregator's input contract.
    ///
    /// Credits parse to a number, with `-` and anything unparseable
    /// becoming zero. A grade consisting solely of digits is coerced to a
    /// numeric grade; every other grade stays text.
    pub fn to_input(&self) -> CourseInput {
        let credits = self.credits.parse::<f64>().unwrap_or(0.0);
        let grade = if !self.grade.is_empty() && self.grade.chars().all(|c| c.is_ascii_digit()) {
            GradeValue::Numeric(self.grade.parse::<f64>().unwrap_or(0.0))
        } else {
            GradeValue::Text(self.grade.clone())
        };

        CourseInput {
            credits: Some(credits),
            grade: Some(grade),
        }
    }
}

/// Keeps only the table region: everything after the column header line
/// (the first line containing "subject", "credits", "grade" and "semester",
/// case-insensitively) and before the `END OF TRANSCRIPT` marker.
fn crop_to_table(lines: &[String]) -> &[String] {
    let start = lines
        .iter()
        .position(|ln| {
            let lower = ln.to_lowercase();
            ["subject", "credits", "grade", "semester"]
                .iter()
                .all(|t| lower.contains(t))
        })
        .map(|i| i + 1)
        .unwrap_or(0);

    let end = lines
        .iter()
        .position(|ln| ln.contains("END OF TRANSCRIPT"))
        .unwrap_or(lines.len());

    &lines[start..end.max(start)]
}

/// Lines that repeat on every page (footers, legends, repeated headers)
/// and must not be folded into a row buffer.
fn is_noise(line: &str) -> bool {
    line.contains("Page ")
        || line.contains("Grade Scale")
        || line.starts_with("Transcript of ")
        || ["SUBJECT", "CREDITS", "GRADE"]
            .iter()
            .all(|t| line.contains(t))
}

/// Collapses internal whitespace runs to single spaces so wrapped names
/// join correctly.
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Matches one reconstructed row against the two row shapes, in order.
///
/// Returns `None` when the text does not yet form a complete row.
pub fn match_row(row: &str) -> Option<CourseRecord> {
    let row = collapse_whitespace(row);

    if let Some(caps) = ROW_WITH_CREDITS.captures(&row) {
        return Some(CourseRecord {
            course: caps["course"].trim().to_string(),
            credits: caps["credits"].to_string(),
            grade: caps["grade"].to_string(),
            semester: caps["semester"].to_string(),
        });
    }

    if let Some(caps) = ROW_NO_CREDITS.captures(&row) {
        return Some(CourseRecord {
            course: caps["course"].trim().to_string(),
            credits: "-".to_string(),
            grade: caps["grade"].to_string(),
            semester: caps["semester"].to_string(),
        });
    }

    None
}

/// Reconstructs course rows from raw per-line transcript text.
///
/// Rows that never match either shape are dropped without error:
/// extraction is lenient and lossy, one malformed row never aborts the
/// document.
pub fn extract_courses(lines: &[String]) -> Vec<CourseRecord> {
    let table = crop_to_table(lines);

    let mut courses = Vec::new();
    let mut buf = String::new();

    for raw in table {
        let line = raw.trim();
        if line.is_empty() || is_noise(line) {
            continue;
        }

        if buf.is_empty() {
            buf.push_str(line);
        } else {
            buf.push(' ');
            buf.push_str(line);
        }

        if let Some(rec) = match_row(&buf) {
            courses.push(rec);
            buf.clear();
        }
    }

    // last row may end exactly at end-of-input
    if !buf.is_empty() {
        if let Some(rec) = match_row(&buf) {
            courses.push(rec);
        } else {
            debug!(fragment = %buf, "Dropping unmatched trailing fragment");
        }
    }

    debug!(
        lines = lines.len(),
        courses = courses.len(),
        "Extraction finished"
    );

    courses
}
