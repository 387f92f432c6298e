//! Temporal holdout construction.
//!
//! Two consecutive snapshots N and N+1 are reduced to curated annotations by
//! [`EvidenceFilter`] and then differenced by [`compute_delta`]:
//!
//! - `known`: curated annotations at N,
//! - `gt_all`: curated annotations at N+1,
//! - `gt_new_pairs`: the N+1 rows whose (protein, term) pair is absent at N.
//!
//! ```
//! use cafa_holdout::holdout::{build_holdout_sets, EvidenceFilter};
//! use cafa_holdout::model::AnnotationTable;
//!
//! let cols = ["protein_id", "go_term", "evidence_code"];
//! let row = |p: &str, g: &str, e: &str| vec![p.to_string(), g.to_string(), e.to_string()];
//! let n = AnnotationTable::with_rows(cols, vec![row("P1", "GO:1", "EXP"), row("P2", "GO:2", "IEA")])?;
//! let next = AnnotationTable::with_rows(cols, vec![row("P1", "GO:1", "EXP"), row("P1", "GO:3", "EXP")])?;
//!
//! let sets = build_holdout_sets(&n, &next, &EvidenceFilter::curated())?;
//! assert_eq!(sets.known.len(), 1);
//! assert_eq!(sets.gt_all.len(), 2);
//! assert_eq!(sets.gt_new_pairs.len(), 1);
//! # Ok::<(), cafa_holdout::HoldoutError>(())
//! ```

mod delta;
mod filter;
mod terms;

pub use delta::{compute_delta, DeltaSummary, HoldoutSets};
pub use filter::{filter_curated, EvidenceFilter, FilterStats};
pub use terms::{TermCollector, BP_ROOT, CC_ROOT, MF_ROOT, ROOT_TERMS};

use crate::error::{ErrorContext, Result};
use crate::model::AnnotationTable;

/// Filter both raw snapshots and compute their holdout sets.
pub fn build_holdout_sets(
    snapshot_n: &AnnotationTable,
    snapshot_next: &AnnotationTable,
    filter: &EvidenceFilter,
) -> Result<HoldoutSets> {
    let (filtered_n, stats_n) = filter.apply_with_stats(snapshot_n).context("snapshot N")?;
    let (filtered_next, stats_next) = filter
        .apply_with_stats(snapshot_next)
        .context("snapshot N+1")?;
    tracing::debug!(?stats_n, ?stats_next, "evidence filter applied");

    compute_delta(filtered_n, filtered_next)
}
