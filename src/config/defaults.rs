//! Default values and evidence presets for cafa-holdout.

use crate::model::EvidenceCodeSet;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// First snapshot index processed by default.
pub const DEFAULT_START: u32 = 214;

/// Last snapshot index N processed by default (its pair is N, N+1).
pub const DEFAULT_END: u32 = 225;

/// Default directory for `known.N.tsv`.
pub const DEFAULT_KNOWN_DIR: &str = "known";

/// Default directory for `gt_all.N+1.tsv`.
pub const DEFAULT_GT_ALL_DIR: &str = "gt_all";

/// Default directory for `ground_truth.N_N+1.tsv`.
pub const DEFAULT_GROUND_TRUTH_DIR: &str = "ground_truth";

/// Default root for per-pair evaluator output.
pub const DEFAULT_EVALUATOR_OUT_ROOT: &str = "results_submission_delta";

/// Default terms-of-interest output file.
pub const DEFAULT_TOI_FILE: &str = "terms_of_interest.txt";

// ============================================================================
// Evidence Presets
// ============================================================================

/// Named evidence code sets.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum EvidencePreset {
    /// Experimental, high-throughput and statement codes
    #[default]
    Curated,
    /// Low-throughput experimental codes only
    Experimental,
    /// High-throughput experimental codes only
    HighThroughput,
}

impl EvidencePreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Curated => "curated",
            Self::Experimental => "experimental",
            Self::HighThroughput => "high-throughput",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "curated" | "default" => Some(Self::Curated),
            "experimental" | "exp" => Some(Self::Experimental),
            "high-throughput" | "htp" => Some(Self::HighThroughput),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Curated => "EXP IDA IPI IMP IGI IEP, HTP HDA HMP HGI HEP, IC TAS",
            Self::Experimental => "EXP IDA IPI IMP IGI IEP",
            Self::HighThroughput => "HTP HDA HMP HGI HEP",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Curated, Self::Experimental, Self::HighThroughput]
    }

    /// The code set this preset names.
    #[must_use]
    pub fn codes(&self) -> EvidenceCodeSet {
        match self {
            Self::Curated => EvidenceCodeSet::curated(),
            Self::Experimental => EvidenceCodeSet::experimental(),
            Self::HighThroughput => EvidenceCodeSet::high_throughput(),
        }
    }
}

impl std::fmt::Display for EvidencePreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
