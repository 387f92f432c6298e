//! Snapshot differencing: known set, full ground truth and new-pair delta.

use crate::error::{ErrorContext, Result};
use crate::model::AnnotationTable;
use serde::Serialize;

/// The three tables derived from a pair of filtered snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldoutSets {
    /// Curated annotations known at snapshot N
    pub known: AnnotationTable,
    /// All curated annotations at snapshot N+1
    pub gt_all: AnnotationTable,
    /// Rows of N+1 whose (protein, term) pair does not occur in N
    pub gt_new_pairs: AnnotationTable,
    pub summary: DeltaSummary,
}

/// Pair counts of a delta computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeltaSummary {
    pub pairs_known: usize,
    pub pairs_next: usize,
    pub pairs_new: usize,
    pub pairs_carried: usize,
}

/// Compute the holdout sets for snapshots N and N+1.
///
/// Both inputs are expected to be filtered already; `known` and `gt_all` are
/// passed through as-is. The delta is an anti-join on (protein_id, go_term):
/// every N+1 row whose pair is absent from N is kept, whatever its other
/// columns say, so a new pair backed by several evidence rows yields several
/// rows. Exact duplicate rows are collapsed. The delta leads with
/// `protein_id` and `go_term`, followed by the remaining N+1 columns.
pub fn compute_delta(
    filtered_n: AnnotationTable,
    filtered_next: AnnotationTable,
) -> Result<HoldoutSets> {
    let (gt_new_pairs, summary) = new_pairs(&filtered_n, &filtered_next)?;

    Ok(HoldoutSets {
        known: filtered_n,
        gt_all: filtered_next,
        gt_new_pairs,
        summary,
    })
}

/// Rows of `next` whose pair is absent from `known`, plus the pair counts.
fn new_pairs(
    known: &AnnotationTable,
    next: &AnnotationTable,
) -> Result<(AnnotationTable, DeltaSummary)> {
    let known_pairs = known.pair_keys().context("snapshot N")?;
    let next_pairs = next.pair_keys().context("snapshot N+1")?;
    let (p, g) = next.pair_columns()?;

    let delta = next
        .select_distinct(|row| !known_pairs.contains(&(row[p].as_str(), row[g].as_str())))
        .into_keys_first()?;

    let pairs_new = next_pairs
        .iter()
        .filter(|pair| !known_pairs.contains(*pair))
        .count();
    let summary = DeltaSummary {
        pairs_known: known_pairs.len(),
        pairs_next: next_pairs.len(),
        pairs_new,
        pairs_carried: next_pairs.len() - pairs_new,
    };
    Ok((delta, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProteinTermPair;

    fn table(rows: &[[&str; 3]]) -> AnnotationTable {
        AnnotationTable::with_rows(
            ["protein_id", "go_term", "evidence_code"],
            rows.iter()
                .map(|r| r.iter().map(|v| (*v).to_string()).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_pairs_only() {
        let n = table(&[["P1", "GO:1", "EXP"]]);
        let next = table(&[["P1", "GO:1", "EXP"], ["P1", "GO:3", "EXP"]]);
        let sets = compute_delta(n.clone(), next.clone()).unwrap();

        assert_eq!(sets.known, n);
        assert_eq!(sets.gt_all, next);
        assert_eq!(sets.gt_new_pairs, table(&[["P1", "GO:3", "EXP"]]));
        assert_eq!(
            sets.summary,
            DeltaSummary {
                pairs_known: 1,
                pairs_next: 2,
                pairs_new: 1,
                pairs_carried: 1,
            }
        );
    }

    #[test]
    fn test_match_ignores_non_key_columns() {
        // Same pair with a different evidence code is not new.
        let n = table(&[["P1", "GO:1", "IDA"]]);
        let next = table(&[["P1", "GO:1", "EXP"]]);
        let sets = compute_delta(n, next).unwrap();
        assert!(sets.gt_new_pairs.is_empty());
    }

    #[test]
    fn test_new_pair_keeps_every_evidence_row() {
        let n = table(&[["P9", "GO:9", "EXP"]]);
        let next = table(&[
            ["P1", "GO:2", "EXP"],
            ["P1", "GO:2", "IDA"],
            ["P1", "GO:2", "EXP"],
        ]);
        let sets = compute_delta(n, next).unwrap();
        assert_eq!(
            sets.gt_new_pairs,
            table(&[["P1", "GO:2", "EXP"], ["P1", "GO:2", "IDA"]])
        );
        assert_eq!(sets.summary.pairs_new, 1);
    }

    #[test]
    fn test_no_new_annotations() {
        let n = table(&[["P1", "GO:1", "EXP"], ["P2", "GO:2", "EXP"]]);
        let next = table(&[["P2", "GO:2", "IMP"]]);
        let sets = compute_delta(n, next).unwrap();
        assert!(sets.gt_new_pairs.is_empty());
        assert_eq!(sets.gt_new_pairs.column_count(), 3);
    }

    #[test]
    fn test_empty_inputs() {
        let empty = table(&[]);
        let next = table(&[["P1", "GO:1", "EXP"]]);

        let sets = compute_delta(empty.clone(), next.clone()).unwrap();
        assert_eq!(sets.gt_new_pairs, next);

        let sets = compute_delta(next, empty).unwrap();
        assert!(sets.gt_all.is_empty());
        assert!(sets.gt_new_pairs.is_empty());
    }

    #[test]
    fn test_schemas_may_differ_between_snapshots() {
        let n = table(&[["P1", "GO:1", "EXP"]]);
        let next = AnnotationTable::with_rows(
            ["go_term", "protein_id", "evidence_code", "assigned_by"],
            vec![
                vec!["GO:1".into(), "P1".into(), "EXP".into(), "UniProt".into()],
                vec!["GO:7".into(), "P1".into(), "EXP".into(), "MGI".into()],
            ],
        )
        .unwrap();
        let sets = compute_delta(n, next).unwrap();
        assert_eq!(
            sets.gt_all.columns().collect::<Vec<_>>(),
            vec!["go_term", "protein_id", "evidence_code", "assigned_by"]
        );
        assert_eq!(
            sets.gt_new_pairs.columns().collect::<Vec<_>>(),
            vec!["protein_id", "go_term", "evidence_code", "assigned_by"]
        );
        assert_eq!(sets.gt_new_pairs.raw_rows()[0][..2], ["P1", "GO:7"]);
        let pairs: Vec<_> = sets.gt_new_pairs.pairs().unwrap().into_iter().collect();
        assert_eq!(pairs, vec![ProteinTermPair::new("P1", "GO:7")]);
    }

    #[test]
    fn test_missing_key_column_is_schema_error() {
        let n = AnnotationTable::new(["protein_id", "evidence_code"]).unwrap();
        let next = table(&[]);
        let err = compute_delta(n, next).unwrap_err();
        assert!(err.to_string().contains("snapshot N"), "{err}");
        assert!(err.to_string().contains("go_term"), "{err}");
    }
}
