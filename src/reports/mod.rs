//! Report generation for holdout builds and evaluations.
//!
//! - TSV: the holdout tables themselves ([`render_table`], [`write_table`])
//! - Summary: compact, shell-friendly run summaries
//! - JSON: structured run reports for programmatic use

mod json;
mod summary;
mod tsv;
mod types;

pub use json::JsonReporter;
pub use summary::SummaryReporter;
pub use tsv::{render_table, write_table};
pub use types::ReportFormat;

use crate::pipeline::{EvaluationReport, RangeReport};
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report for a holdout build over a snapshot range
    fn generate_range_report(&self, report: &RangeReport) -> Result<String, ReportError>;

    /// Generate a report for an evaluation run
    fn generate_evaluation_report(&self, report: &EvaluationReport)
        -> Result<String, ReportError>;

    /// Write a range report to a writer
    fn write_range_report(
        &self,
        report: &RangeReport,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let content = self.generate_range_report(report)?;
        writer.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Reporter for a format.
#[must_use]
pub fn create_reporter(format: ReportFormat, colored: bool) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Summary if colored => Box::new(SummaryReporter::new()),
        ReportFormat::Summary => Box::new(SummaryReporter::new().no_color()),
        ReportFormat::Json => Box::new(JsonReporter::new()),
    }
}
