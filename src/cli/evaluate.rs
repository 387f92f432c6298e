//! Evaluate command handler.
//!
//! Runs the external CAFA evaluator on each built pair (ground truth delta
//! plus known annotations at N).

use crate::config::{EvaluatorConfig, Validatable};
use crate::pipeline::{
    should_use_color, write_output, EvaluationInputs, EvaluationRunner, OutputTarget,
};
use crate::reports::{create_reporter, JsonReporter, ReportFormat, ReportGenerator};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Configuration for the `evaluate` command.
#[derive(Debug, Clone)]
pub struct EvaluateCommand {
    pub inputs: EvaluationInputs,
    pub settings: EvaluatorConfig,
    pub start: u32,
    pub end: u32,
    pub format: ReportFormat,
    pub report_file: Option<PathBuf>,
    pub no_color: bool,
    pub quiet: bool,
}

/// Run the evaluate command, returning the desired exit code.
///
/// Invalid ranges or inputs are errors. Missing pair files are skipped and
/// evaluator failures are reported per pair.
#[allow(clippy::needless_pass_by_value)]
pub fn run_evaluate(command: EvaluateCommand) -> Result<i32> {
    let errors = command.settings.validate();
    if !errors.is_empty() {
        let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::bail!("invalid evaluator configuration:\n  {}", details.join("\n  "));
    }

    tracing::info!(
        "Evaluating {} for pairs {} → {}",
        command.inputs.submission_dir.display(),
        command.start,
        command.end.saturating_add(1)
    );

    let runner = EvaluationRunner::new(command.inputs.clone(), command.settings.clone());
    let report = runner.run(command.start, command.end)?;

    tracing::info!(
        "Done: {} completed, {} skipped, {} failed",
        report.completed_count(),
        report.skipped_count(),
        report.failed_count()
    );

    if !command.quiet {
        let reporter = create_reporter(command.format, should_use_color(command.no_color));
        let content = reporter
            .generate_evaluation_report(&report)
            .context("failed to render report")?;
        write_output(&content, &OutputTarget::Stdout, command.quiet)?;
    }
    if let Some(path) = &command.report_file {
        let json = JsonReporter::new()
            .generate_evaluation_report(&report)
            .context("failed to serialize report")?;
        write_output(&json, &OutputTarget::File(path.clone()), command.quiet)?;
    }

    Ok(crate::pipeline::exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_ontology_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let command = EvaluateCommand {
            inputs: EvaluationInputs {
                ontology: dir.path().join("missing.obo"),
                submission_dir: dir.path().to_path_buf(),
                ground_truth_dir: dir.path().join("ground_truth"),
                known_dir: dir.path().join("known"),
                terms_of_interest: None,
                information_accretion: None,
            },
            settings: EvaluatorConfig::default(),
            start: 1,
            end: 1,
            format: ReportFormat::Summary,
            report_file: None,
            no_color: true,
            quiet: true,
        };
        let err = run_evaluate(command).unwrap_err();
        assert!(err.to_string().contains("ontology"), "{err}");
    }
}
