//! CLI entry point for the transcript GPA tool.
//!
//! Provides subcommands for extracting course rows from a transcript PDF,
//! computing GPA metrics from a course list, and doing both in one pass.

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use transcript_gpa::{
    extract::{CourseRecord, extract_courses},
    fetch::{BasicClient, fetch_document},
    grading::aggregate::aggregate_courses,
    grading::types::CourseInput,
    output::{self, MetricsReport},
    pdf::extract_lines,
};

#[derive(Parser)]
#[command(name = "transcript_gpa")]
#[command(about = "A tool to extract courses from transcript PDFs and compute GPA metrics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract course rows from a transcript PDF (file or URL)
    Extract {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// CSV file to append extracted rows to
        #[arg(short, long, default_value = "courses.csv")]
        output: String,

        /// Also print the rows as JSON on stdout
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Compute GPA metrics from a course list file
    Gpa {
        /// JSON array of courses, or a CSV written by `extract`
        #[arg(value_name = "COURSES_FILE")]
        input: String,

        /// Optional JSON file to write the metrics to
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Extract a transcript and compute its GPA metrics in one pass
    Report {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Optional JSON file to write a timestamped report to
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/transcript_gpa.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("transcript_gpa.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            source,
            output,
            json,
        } => {
            let courses = extract_from_source(&source).await?;
            info!(courses = courses.len(), "Extraction complete");

            output::append_courses(&output, &courses)?;
            if json {
                output::print_json(&courses)?;
            }
        }
        Commands::Gpa { input, output } => {
            let inputs = load_course_inputs(&input)?;
            let metrics = aggregate_courses(&inputs);

            output::print_json(&metrics)?;
            if let Some(path) = output {
                output::write_json(&path, &metrics)?;
            }
        }
        Commands::Report { source, output } => {
            let courses = extract_from_source(&source).await?;
            let inputs: Vec<CourseInput> = courses.iter().map(CourseRecord::to_input).collect();
            let metrics = aggregate_courses(&inputs);

            output::print_json(&metrics)?;
            if let Some(path) = output {
                let report = MetricsReport {
                    generated_at: Utc::now(),
                    source: source.clone(),
                    course_count: courses.len(),
                    metrics,
                };
                output::write_json(&path, &report)?;
            }
        }
    }

    Ok(())
}

/// Loads transcript bytes from a local file path or fetches them over
/// HTTP, then extracts course rows.
#[tracing::instrument(fields(source = %source))]
async fn extract_from_source(source: &str) -> Result<Vec<CourseRecord>> {
    let bytes = if source.starts_with("http") {
        let client = BasicClient::new();
        fetch_document(&client, source).await?
    } else {
        std::fs::read(source)?
    };
    debug!(bytes = bytes.len(), "Document loaded");

    let lines = extract_lines(&bytes)?;
    Ok(extract_courses(&lines))
}

/// Loads a course list: CSV files are read as extracted rows and
/// translated at the boundary, anything else as a JSON array of inputs.
fn load_course_inputs(path: &str) -> Result<Vec<CourseInput>> {
    if Path::new(path).extension() == Some(OsStr::new("csv")) {
        let rows = output::read_courses_csv(path)?;
        Ok(rows.iter().map(CourseRecord::to_input).collect())
    } else {
        output::read_course_inputs(path)
    }
}
