//! Range orchestration over consecutive snapshot pairs.

use super::sink::{HoldoutSink, PairPaths};
use super::snapshot::SnapshotSource;
use crate::error::{FailureKind, HoldoutError, Result};
use crate::holdout::{build_holdout_sets, DeltaSummary, EvidenceFilter, HoldoutSets};
use crate::model::TableStats;
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;

/// An inclusive range of snapshot indices N; each N is paired with N+1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SnapshotRange {
    start: u32,
    end: u32,
}

impl SnapshotRange {
    /// Validate and build a range. `end` must not precede `start`, and
    /// `end + 1` must exist.
    pub fn new(start: u32, end: u32) -> Result<Self> {
        if end < start {
            return Err(HoldoutError::config(format!(
                "end ({end}) must be greater than or equal to start ({start})"
            )));
        }
        if end == u32::MAX {
            return Err(HoldoutError::config(format!(
                "end ({end}) has no successor snapshot"
            )));
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub const fn start(&self) -> u32 {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> u32 {
        self.end
    }

    /// Number of pairs in the range.
    #[must_use]
    pub const fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    pub fn indices(&self) -> std::ops::RangeInclusive<u32> {
        self.start..=self.end
    }
}

// ============================================================================
// Outcomes
// ============================================================================

/// What happened to one snapshot pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairOutcome {
    pub index: u32,
    pub next: u32,
    #[serde(flatten)]
    pub status: PairStatus,
}

impl PairOutcome {
    #[must_use]
    pub const fn is_written(&self) -> bool {
        matches!(self.status, PairStatus::Written(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PairStatus {
    Written(PairSummary),
    Failed(PairFailure),
}

/// Counts and paths for a pair that was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairSummary {
    pub outputs: PairPaths,
    pub known: TableStats,
    pub gt_all: TableStats,
    pub gt_new_pairs: TableStats,
    pub delta: DeltaSummary,
}

impl PairSummary {
    fn new(outputs: PairPaths, sets: &HoldoutSets) -> Self {
        Self {
            outputs,
            known: sets.known.stats(),
            gt_all: sets.gt_all.stats(),
            gt_new_pairs: sets.gt_new_pairs.stats(),
            delta: sets.summary,
        }
    }
}

/// A recorded per-pair failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl From<&HoldoutError> for PairFailure {
    fn from(err: &HoldoutError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Result of a whole range run, ordered by index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeReport {
    pub start: u32,
    pub end: u32,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcomes: Vec<PairOutcome>,
}

impl RangeReport {
    #[must_use]
    pub fn written_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_written()).count()
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.written_count()
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|o| !o.is_written())
    }

    /// Failed pairs with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (u32, &PairFailure)> {
        self.outcomes.iter().filter_map(|o| match &o.status {
            PairStatus::Failed(failure) => Some((o.index, failure)),
            PairStatus::Written(_) => None,
        })
    }
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Builds holdout sets for every pair (N, N+1) of a range.
///
/// Pairs are independent: a failure is logged with its index, recorded in
/// the report, and the next pair proceeds.
pub struct RangeOrchestrator<S, K> {
    source: S,
    sink: K,
    filter: EvidenceFilter,
    parallel: bool,
}

impl<S: SnapshotSource, K: HoldoutSink> RangeOrchestrator<S, K> {
    pub fn new(source: S, sink: K, filter: EvidenceFilter) -> Self {
        Self {
            source,
            sink,
            filter,
            parallel: false,
        }
    }

    /// Process pairs on the rayon global pool.
    #[must_use]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validate `start..=end` and run it.
    pub fn run(&self, start: u32, end: u32) -> Result<RangeReport> {
        let range = SnapshotRange::new(start, end)?;
        Ok(self.run_range(range))
    }

    pub fn run_range(&self, range: SnapshotRange) -> RangeReport {
        let started_at = Utc::now();
        let outcomes = if self.parallel {
            range
                .indices()
                .into_par_iter()
                .map(|index| self.process_pair(index))
                .collect()
        } else {
            range.indices().map(|index| self.process_pair(index)).collect()
        };

        RangeReport {
            start: range.start(),
            end: range.end(),
            started_at,
            finished_at: Utc::now(),
            outcomes,
        }
    }

    /// Run one pair, converting any error into a recorded failure.
    pub fn process_pair(&self, index: u32) -> PairOutcome {
        let next = index.saturating_add(1);
        let status = match self.build_pair(index, next) {
            Ok(summary) => PairStatus::Written(summary),
            Err(e) => {
                tracing::error!("Pair {}->{} failed: {}", index, next, e);
                PairStatus::Failed(PairFailure::from(&e))
            }
        };
        PairOutcome {
            index,
            next,
            status,
        }
    }

    fn build_pair(&self, index: u32, next: u32) -> Result<PairSummary> {
        tracing::info!("Processing pair {} -> {}", index, next);
        let snapshot_n = self.source.load(index)?;
        let snapshot_next = self.source.load(next)?;

        let sets = build_holdout_sets(&snapshot_n, &snapshot_next, &self.filter)?;
        let outputs = self.sink.write_pair(index, &sets)?;
        let summary = PairSummary::new(outputs, &sets);

        tracing::info!(
            "{}: rows={} proteins={}",
            summary.outputs.known.display(),
            summary.known.rows,
            summary.known.proteins
        );
        tracing::info!(
            "{}: rows={} proteins={}",
            summary.outputs.gt_all.display(),
            summary.gt_all.rows,
            summary.gt_all.proteins
        );
        tracing::info!(
            "{}: rows={} proteins={} new_pairs={}",
            summary.outputs.ground_truth.display(),
            summary.gt_new_pairs.rows,
            summary.gt_new_pairs.proteins,
            summary.delta.pairs_new
        );
        Ok(summary)
    }
}
