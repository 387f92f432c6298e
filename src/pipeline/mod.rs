//! Pipeline orchestration for holdout builds.
//!
//! This module wires snapshot loading, evidence filtering, delta computation
//! and output writing into range runs, plus the evaluation stage that feeds
//! the written tables to the external evaluator.

mod evaluate_stage;
mod output;
mod range;
mod sink;
mod snapshot;

pub use evaluate_stage::{
    EvaluationInputs, EvaluationOutcome, EvaluationReport, EvaluationRunner, EvaluationStatus,
    EvaluatorEntry, EVALUATOR_MODULE,
};
pub use output::{should_use_color, write_output, OutputTarget};
pub use range::{
    PairFailure, PairOutcome, PairStatus, PairSummary, RangeOrchestrator, RangeReport,
    SnapshotRange,
};
pub use sink::{HoldoutSink, OutputLayout, PairPaths};
pub use snapshot::{SnapshotDirectory, SnapshotSource};

/// Exit codes for scripted runs
pub mod exit_codes {
    /// Every pair was processed (or failures were tolerated)
    pub const SUCCESS: i32 = 0;
    /// Fatal error before or outside pair processing
    pub const ERROR: i32 = 1;
    /// At least one pair failed and `--fail-on-pair-error` was set
    pub const PAIR_FAILURES: i32 = 2;
}
