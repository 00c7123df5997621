//! Output formatting and persistence for course records and metrics.
//!
//! Supports JSON printing, CSV append/load of course rows, and JSON
//! report files.

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::path::Path;
use tracing::{debug, info};

use crate::extract::CourseRecord;
use crate::grading::types::{CourseInput, GpaMetrics};

/// Metrics envelope written by `report --output`.
#[derive(Debug, Serialize)]
pub struct MetricsReport {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub course_count: usize,
    pub metrics: GpaMetrics,
}

/// Prints a value as pretty JSON on stdout.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Appends course records as rows to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_courses(path: &str, courses: &[CourseRecord]) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, rows = courses.len(), "Appending CSV rows");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    for course in courses {
        writer.serialize(course)?;
    }
    writer.flush()?;

    Ok(())
}

/// Loads course records from a CSV file previously written by
/// [`append_courses`].
pub fn read_courses_csv(path: &str) -> Result<Vec<CourseRecord>> {
    let file = File::open(path)?;
    let mut rdr = csv::Reader::from_reader(file);

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let record: CourseRecord = result?;
        rows.push(record);
    }

    Ok(rows)
}

/// Loads a JSON array of course inputs.
pub fn read_course_inputs(path: &str) -> Result<Vec<CourseInput>> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(file)?)
}

/// Writes any serializable value as pretty JSON to a file.
pub fn write_json(path: &str, value: &impl Serialize) -> Result<()> {
    std::fs::write(path, serde_json::to_vec_pretty(value)?)?;
    info!(path, "JSON written");
    Ok(())
}
