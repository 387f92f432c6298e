//! Configuration types for cafa-holdout operations.
//!
//! Every section deserializes with `#[serde(default)]`, so a config file only
//! needs to name the values it changes.

use super::defaults::{
    EvidencePreset, DEFAULT_END, DEFAULT_EVALUATOR_OUT_ROOT, DEFAULT_GROUND_TRUTH_DIR,
    DEFAULT_GT_ALL_DIR, DEFAULT_KNOWN_DIR, DEFAULT_START,
};
use crate::model::EvidenceCodeSet;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI flags are applied on top of the file values by the command handlers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Where snapshots live and which range to process
    pub snapshots: SnapshotsConfig,
    /// Output directories for the three holdout tables
    pub outputs: OutputsConfig,
    /// Evidence codes accepted as curated
    pub evidence: EvidenceConfig,
    /// Run behavior flags
    pub behavior: BehaviorConfig,
    /// External evaluator invocation
    pub evaluator: EvaluatorConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the snapshot base directory.
    pub fn base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.snapshots.base_path = path.into();
        self
    }

    /// Set the inclusive snapshot range.
    pub const fn range(mut self, start: u32, end: u32) -> Self {
        self.config.snapshots.start = start;
        self.config.snapshots.end = end;
        self
    }

    /// Put all three output directories under `root`.
    pub fn output_root(mut self, root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        self.config.outputs = OutputsConfig {
            known_dir: root.join(DEFAULT_KNOWN_DIR),
            gt_all_dir: root.join(DEFAULT_GT_ALL_DIR),
            ground_truth_dir: root.join(DEFAULT_GROUND_TRUTH_DIR),
        };
        self
    }

    /// Use an evidence preset.
    pub fn evidence_preset(mut self, preset: EvidencePreset) -> Self {
        self.config.evidence.preset = preset;
        self.config.evidence.codes = None;
        self
    }

    /// Use an explicit evidence code set.
    pub fn evidence_codes(mut self, codes: EvidenceCodeSet) -> Self {
        self.config.evidence.codes = Some(codes);
        self
    }

    /// Process pairs on the rayon pool.
    pub const fn parallel(mut self, parallel: bool) -> Self {
        self.config.behavior.parallel = parallel;
        self
    }

    /// Exit non-zero when any pair fails.
    pub const fn fail_on_pair_error(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_pair_error = fail;
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Sections
// ============================================================================

/// Snapshot location and range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SnapshotsConfig {
    /// Directory holding `goa_uniprot_all_subset.N.tsv` files (flat or nested)
    pub base_path: PathBuf,
    /// First snapshot index N (inclusive)
    pub start: u32,
    /// Last snapshot index N (inclusive); pairs run up to end+1
    pub end: u32,
}

impl Default for SnapshotsConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("."),
            start: DEFAULT_START,
            end: DEFAULT_END,
        }
    }
}

/// Output directories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputsConfig {
    /// Directory for `known.N.tsv`
    pub known_dir: PathBuf,
    /// Directory for `gt_all.N+1.tsv`
    pub gt_all_dir: PathBuf,
    /// Directory for `ground_truth.N_N+1.tsv`
    pub ground_truth_dir: PathBuf,
}

impl Default for OutputsConfig {
    fn default() -> Self {
        Self {
            known_dir: PathBuf::from(DEFAULT_KNOWN_DIR),
            gt_all_dir: PathBuf::from(DEFAULT_GT_ALL_DIR),
            ground_truth_dir: PathBuf::from(DEFAULT_GROUND_TRUTH_DIR),
        }
    }
}

/// Evidence code selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EvidenceConfig {
    /// Named code set used when `codes` is not given
    pub preset: EvidencePreset,
    /// Explicit code list; overrides `preset`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codes: Option<EvidenceCodeSet>,
}

impl EvidenceConfig {
    /// The effective code set.
    #[must_use]
    pub fn code_set(&self) -> EvidenceCodeSet {
        self.codes.clone().unwrap_or_else(|| self.preset.codes())
    }
}

/// Behavior flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Process snapshot pairs in parallel
    pub parallel: bool,
    /// Exit with a failure status when any pair fails
    pub fail_on_pair_error: bool,
}

/// External evaluator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// `module` for `python -m cafaeval`, otherwise a script path
    pub entry: String,
    /// Python interpreter
    pub python: String,
    /// Evaluator worker threads
    pub threads: u32,
    /// Threshold step
    pub th_step: f64,
    /// Maximum terms per protein considered
    pub max_terms: u32,
    /// Score propagation strategy
    pub prop: String,
    /// Normalization strategy
    pub norm: String,
    /// Drop orphan terms
    pub no_orphans: bool,
    /// Root directory for per-pair evaluation results
    pub out_root: PathBuf,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            entry: "module".to_string(),
            python: "python3".to_string(),
            threads: 4,
            th_step: 0.01,
            max_terms: 500,
            prop: "fill".to_string(),
            norm: "cafa".to_string(),
            no_orphans: true,
            out_root: PathBuf::from(DEFAULT_EVALUATOR_OUT_ROOT),
        }
    }
}
