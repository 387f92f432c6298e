//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable summary for terminal usage.

use super::{ReportError, ReportFormat, ReportGenerator};
use crate::pipeline::{EvaluationReport, EvaluationStatus, PairStatus, RangeReport};

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn header(&self, title: &str, lines: &mut Vec<String>) {
        lines.push(self.color(title, "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_range_report(&self, report: &RangeReport) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        self.header("Holdout Build Summary", &mut lines);
        lines.push(format!(
            "{}  {} → {}",
            self.color("Range:", "cyan"),
            report.start,
            report.end.saturating_add(1)
        ));
        lines.push(String::new());

        for outcome in &report.outcomes {
            let pair = format!("{:>6} → {:<6}", outcome.index, outcome.next);
            match &outcome.status {
                PairStatus::Written(summary) => lines.push(format!(
                    "  {} {}  known {} / gt_all {} / new {} rows, {} new pairs",
                    self.color("✓", "green"),
                    pair,
                    summary.known.rows,
                    summary.gt_all.rows,
                    summary.gt_new_pairs.rows,
                    summary.delta.pairs_new
                )),
                PairStatus::Failed(failure) => lines.push(format!(
                    "  {} {}  {}",
                    self.color("✗", "red"),
                    pair,
                    self.color(&failure.message, "red")
                )),
            }
        }

        lines.push(String::new());
        let failed = report.failed_count();
        let failed_text = format!("{failed} failed");
        lines.push(format!(
            "{}  {} written, {}",
            self.color("Pairs:", "cyan"),
            self.color(&report.written_count().to_string(), "green"),
            if failed > 0 {
                self.color(&failed_text, "red")
            } else {
                failed_text
            }
        ));

        Ok(lines.join("\n"))
    }

    fn generate_evaluation_report(
        &self,
        report: &EvaluationReport,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        self.header("Evaluation Summary", &mut lines);

        for outcome in &report.outcomes {
            let pair = format!("{:>6} → {:<6}", outcome.index, outcome.next);
            let line = match &outcome.status {
                EvaluationStatus::Completed { out_dir } => format!(
                    "  {} {}  {}",
                    self.color("✓", "green"),
                    pair,
                    out_dir.display()
                ),
                EvaluationStatus::Skipped { missing } => format!(
                    "  {} {}  missing {}",
                    self.color("-", "yellow"),
                    pair,
                    missing
                        .iter()
                        .map(|p| p.display().to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
                EvaluationStatus::Failed { message } => format!(
                    "  {} {}  {}",
                    self.color("✗", "red"),
                    pair,
                    self.color(message, "red")
                ),
            };
            lines.push(line);
        }

        lines.push(String::new());
        lines.push(format!(
            "{}  {} completed, {} skipped, {} failed",
            self.color("Pairs:", "cyan"),
            report.completed_count(),
            report.skipped_count(),
            report.failed_count()
        ));

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::holdout::DeltaSummary;
    use crate::model::TableStats;
    use crate::pipeline::{PairFailure, PairOutcome, PairPaths, PairSummary};
    use chrono::Utc;
    use std::path::PathBuf;

    fn stats(rows: usize) -> TableStats {
        TableStats {
            rows,
            proteins: 1,
            terms: rows,
        }
    }

    fn report() -> RangeReport {
        let now = Utc::now();
        RangeReport {
            start: 1,
            end: 2,
            started_at: now,
            finished_at: now,
            outcomes: vec![
                PairOutcome {
                    index: 1,
                    next: 2,
                    status: PairStatus::Written(PairSummary {
                        outputs: PairPaths {
                            known: PathBuf::from("known/known.1.tsv"),
                            gt_all: PathBuf::from("gt_all/gt_all.2.tsv"),
                            ground_truth: PathBuf::from("ground_truth/ground_truth.1_2.tsv"),
                        },
                        known: stats(1),
                        gt_all: stats(2),
                        gt_new_pairs: stats(1),
                        delta: DeltaSummary {
                            pairs_known: 1,
                            pairs_next: 2,
                            pairs_new: 1,
                            pairs_carried: 1,
                        },
                    }),
                },
                PairOutcome {
                    index: 2,
                    next: 3,
                    status: PairStatus::Failed(PairFailure {
                        kind: FailureKind::NotFound,
                        message: "snapshot 3 not found".to_string(),
                    }),
                },
            ],
        }
    }

    #[test]
    fn test_plain_range_summary() {
        let text = SummaryReporter::new()
            .no_color()
            .generate_range_report(&report())
            .unwrap();
        assert!(text.contains("Range:  1 → 3"), "{text}");
        assert!(text.contains("known 1 / gt_all 2 / new 1 rows, 1 new pairs"), "{text}");
        assert!(text.contains("snapshot 3 not found"), "{text}");
        assert!(text.contains("1 written, 1 failed"), "{text}");
        assert!(!text.contains("\x1b["));
    }

    #[test]
    fn test_colored_output_has_escapes() {
        let text = SummaryReporter::new().generate_range_report(&report()).unwrap();
        assert!(text.contains("\x1b[31m"));
    }

    #[test]
    fn test_evaluation_summary_counts() {
        let now = Utc::now();
        let report = EvaluationReport {
            start: 1,
            end: 1,
            started_at: now,
            finished_at: now,
            outcomes: vec![crate::pipeline::EvaluationOutcome {
                index: 1,
                next: 2,
                status: EvaluationStatus::Failed {
                    message: "exited with exit status: 1".to_string(),
                },
            }],
        };
        let text = SummaryReporter::new()
            .no_color()
            .generate_evaluation_report(&report)
            .unwrap();
        assert!(text.contains("0 completed, 0 skipped, 1 failed"), "{text}");
    }
}
