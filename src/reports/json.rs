//! JSON report generator.

use super::{ReportError, ReportFormat, ReportGenerator};
use crate::pipeline::{EvaluationReport, RangeReport};
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn to_json<T: Serialize>(&self, value: &T) -> Result<String, ReportError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        json.map_err(|e| ReportError::SerializationError(e.to_string()))
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_range_report(&self, report: &RangeReport) -> Result<String, ReportError> {
        self.to_json(report)
    }

    fn generate_evaluation_report(
        &self,
        report: &EvaluationReport,
    ) -> Result<String, ReportError> {
        self.to_json(report)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}
