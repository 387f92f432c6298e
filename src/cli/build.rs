//! Build command handler.
//!
//! Implements the `build` subcommand: holdout sets for every snapshot pair
//! of a range.

use crate::config::{AppConfig, EvidencePreset, Validatable};
use crate::holdout::EvidenceFilter;
use crate::model::EvidenceCodeSet;
use crate::pipeline::{
    exit_codes, should_use_color, write_output, OutputLayout, OutputTarget, RangeOrchestrator,
    RangeReport, SnapshotDirectory, SnapshotRange,
};
use crate::reports::{create_reporter, JsonReporter, ReportFormat, ReportGenerator};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Command-line values that override the loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct BuildOverrides {
    pub base_path: Option<PathBuf>,
    pub start: Option<u32>,
    pub end: Option<u32>,
    pub known_dir: Option<PathBuf>,
    pub gt_all_dir: Option<PathBuf>,
    pub ground_truth_dir: Option<PathBuf>,
    pub evidence_codes: Option<String>,
    pub evidence_preset: Option<EvidencePreset>,
    pub parallel: bool,
    pub fail_on_pair_error: bool,
}

impl BuildOverrides {
    /// Layer these values over `config`.
    pub fn apply_to(self, config: &mut AppConfig) {
        if let Some(base_path) = self.base_path {
            config.snapshots.base_path = base_path;
        }
        if let Some(start) = self.start {
            config.snapshots.start = start;
        }
        if let Some(end) = self.end {
            config.snapshots.end = end;
        }
        if let Some(dir) = self.known_dir {
            config.outputs.known_dir = dir;
        }
        if let Some(dir) = self.gt_all_dir {
            config.outputs.gt_all_dir = dir;
        }
        if let Some(dir) = self.ground_truth_dir {
            config.outputs.ground_truth_dir = dir;
        }
        if let Some(preset) = self.evidence_preset {
            config.evidence.preset = preset;
            config.evidence.codes = None;
        }
        if let Some(codes) = self.evidence_codes {
            config.evidence.codes = Some(EvidenceCodeSet::parse_list(&codes));
        }
        if self.parallel {
            config.behavior.parallel = true;
        }
        if self.fail_on_pair_error {
            config.behavior.fail_on_pair_error = true;
        }
    }
}

/// Everything the build handler needs.
#[derive(Debug, Clone)]
pub struct BuildCommand {
    pub config: AppConfig,
    pub format: ReportFormat,
    pub report_file: Option<PathBuf>,
    pub no_color: bool,
    pub quiet: bool,
}

/// Run the build command, returning the desired exit code.
///
/// Configuration problems are errors; pair failures are recorded in the
/// report and only affect the exit code with `fail_on_pair_error`.
#[allow(clippy::needless_pass_by_value)]
pub fn run_build(command: BuildCommand) -> Result<i32> {
    let config = &command.config;
    let errors = config.validate();
    if !errors.is_empty() {
        let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::bail!("invalid configuration:\n  {}", details.join("\n  "));
    }
    let range = SnapshotRange::new(config.snapshots.start, config.snapshots.end)?;

    let layout = OutputLayout::from(&config.outputs);
    layout
        .ensure_dirs()
        .context("failed to create output directories")?;

    let codes = config.evidence.code_set();
    tracing::info!(
        "Building holdout sets for snapshots {} → {} from {}",
        range.start(),
        range.end() + 1,
        config.snapshots.base_path.display()
    );
    tracing::debug!("Evidence codes: {}", codes);

    let orchestrator = RangeOrchestrator::new(
        SnapshotDirectory::new(&config.snapshots.base_path),
        layout,
        EvidenceFilter::new(codes),
    )
    .parallel(config.behavior.parallel);
    let report = orchestrator.run_range(range);

    tracing::info!(
        "Done: {} pair(s) written, {} failed",
        report.written_count(),
        report.failed_count()
    );

    if !command.quiet {
        let reporter = create_reporter(command.format, should_use_color(command.no_color));
        let content = reporter
            .generate_range_report(&report)
            .context("failed to render report")?;
        write_output(&content, &OutputTarget::Stdout, command.quiet)?;
    }
    if let Some(path) = &command.report_file {
        let json = JsonReporter::new()
            .generate_range_report(&report)
            .context("failed to serialize report")?;
        write_output(&json, &OutputTarget::File(path.clone()), command.quiet)?;
    }

    Ok(determine_exit_code(config, &report))
}

/// Exit code for a finished range.
fn determine_exit_code(config: &AppConfig, report: &RangeReport) -> i32 {
    if config.behavior.fail_on_pair_error && report.has_failures() {
        return exit_codes::PAIR_FAILURES;
    }
    exit_codes::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_file_values() {
        let mut config = AppConfig::builder().range(1, 2).build();
        BuildOverrides {
            start: Some(220),
            end: Some(223),
            ground_truth_dir: Some(PathBuf::from("delta")),
            evidence_codes: Some("EXP,IDA".to_string()),
            parallel: true,
            ..BuildOverrides::default()
        }
        .apply_to(&mut config);

        assert_eq!((config.snapshots.start, config.snapshots.end), (220, 223));
        assert_eq!(config.outputs.ground_truth_dir, PathBuf::from("delta"));
        assert_eq!(config.outputs.known_dir, PathBuf::from("known"));
        assert_eq!(
            config.evidence.code_set(),
            EvidenceCodeSet::from_codes(["EXP", "IDA"])
        );
        assert!(config.behavior.parallel);
    }

    #[test]
    fn test_empty_overrides_keep_config() {
        let original = AppConfig::builder()
            .parallel(true)
            .evidence_preset(EvidencePreset::Experimental)
            .build();
        let mut config = original.clone();
        BuildOverrides::default().apply_to(&mut config);
        assert_eq!(config, original);
    }

    #[test]
    fn test_preset_override_clears_file_codes() {
        let mut config = AppConfig::builder()
            .evidence_codes(EvidenceCodeSet::parse_list("IEA"))
            .build();
        BuildOverrides {
            evidence_preset: Some(EvidencePreset::HighThroughput),
            ..BuildOverrides::default()
        }
        .apply_to(&mut config);
        assert_eq!(config.evidence.code_set(), EvidenceCodeSet::high_throughput());
    }

    #[test]
    fn test_invalid_range_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::builder()
            .base_path(dir.path())
            .output_root(dir.path())
            .range(5, 4)
            .build();
        let result = run_build(BuildCommand {
            config,
            format: ReportFormat::Summary,
            report_file: None,
            no_color: true,
            quiet: true,
        });
        assert!(result.is_err());
        assert!(!dir.path().join("known").exists());
    }
}
