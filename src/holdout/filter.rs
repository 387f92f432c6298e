//! Curated-evidence filtering.

use crate::error::Result;
use crate::model::{has_not_qualifier, AnnotationTable, EvidenceCodeSet};
use serde::Serialize;

/// Selects curated annotation rows from a snapshot.
///
/// A row survives when its evidence code is in the configured set, its
/// qualifier (if the table has one) carries no `NOT` token, and both its
/// protein and term are non-empty. Exact duplicate rows are collapsed,
/// keeping the first occurrence.
#[derive(Debug, Clone, Default)]
pub struct EvidenceFilter {
    codes: EvidenceCodeSet,
}

/// Row accounting for one filter pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterStats {
    pub input_rows: usize,
    pub dropped_evidence: usize,
    pub dropped_negated: usize,
    pub dropped_missing_key: usize,
    pub duplicates: usize,
    pub kept: usize,
}

impl EvidenceFilter {
    #[must_use]
    pub const fn new(codes: EvidenceCodeSet) -> Self {
        Self { codes }
    }

    /// Filter using [`EvidenceCodeSet::curated`].
    #[must_use]
    pub fn curated() -> Self {
        Self::new(EvidenceCodeSet::curated())
    }

    #[must_use]
    pub const fn codes(&self) -> &EvidenceCodeSet {
        &self.codes
    }

    /// Apply the filter, failing with a schema error if a required column is missing.
    pub fn apply(&self, table: &AnnotationTable) -> Result<AnnotationTable> {
        self.apply_with_stats(table).map(|(filtered, _)| filtered)
    }

    /// Apply the filter and report how many rows each rule removed.
    pub fn apply_with_stats(&self, table: &AnnotationTable) -> Result<(AnnotationTable, FilterStats)> {
        let keys = table.key_columns()?;
        let mut stats = FilterStats {
            input_rows: table.len(),
            ..FilterStats::default()
        };

        let mut passed = 0usize;
        let filtered = table.select_distinct(|row| {
            if !self.codes.contains(&row[keys.evidence_code]) {
                stats.dropped_evidence += 1;
                return false;
            }
            if keys.qualifier.is_some_and(|q| has_not_qualifier(&row[q])) {
                stats.dropped_negated += 1;
                return false;
            }
            if row[keys.protein_id].is_empty() || row[keys.go_term].is_empty() {
                stats.dropped_missing_key += 1;
                return false;
            }
            passed += 1;
            true
        });

        stats.kept = filtered.len();
        stats.duplicates = passed - stats.kept;
        Ok((filtered, stats))
    }
}

/// Filter `table` down to curated rows for the given codes.
pub fn filter_curated(table: &AnnotationTable, codes: &EvidenceCodeSet) -> Result<AnnotationTable> {
    EvidenceFilter::new(codes.clone()).apply(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EVIDENCE_CODE;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    fn table_with_qualifier(rows: &[[&str; 4]]) -> AnnotationTable {
        AnnotationTable::with_rows(
            ["protein_id", "qualifier", "go_term", "evidence_code"],
            rows.iter().map(|r| row(r)).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_keeps_only_configured_codes() {
        let table = table_with_qualifier(&[
            ["P1", "", "GO:1", "EXP"],
            ["P2", "", "GO:2", "IEA"],
            ["P3", "", "GO:3", "TAS"],
        ]);
        let filtered = EvidenceFilter::curated().apply(&table).unwrap();
        let codes: Vec<_> = filtered.rows().filter_map(|r| r.evidence_code()).collect();
        assert_eq!(codes, vec!["EXP", "TAS"]);
    }

    #[test]
    fn test_injected_code_set() {
        let table = table_with_qualifier(&[["P1", "", "GO:1", "EXP"], ["P2", "", "GO:2", "IEA"]]);
        let filtered = filter_curated(&table, &EvidenceCodeSet::parse_list("IEA")).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.rows().next().unwrap().protein_id(), Some("P2"));
    }

    #[test]
    fn test_not_qualifier_excluded() {
        let table = table_with_qualifier(&[
            ["P1", "NOT", "GO:4", "EXP"],
            ["P1", "contributes_to", "GO:5", "EXP"],
            ["P1", "NOT|colocalizes_with", "GO:6", "EXP"],
            ["P1", "NOTX", "GO:7", "EXP"],
        ]);
        let (filtered, stats) = EvidenceFilter::curated().apply_with_stats(&table).unwrap();
        let terms: Vec<_> = filtered.rows().filter_map(|r| r.go_term()).collect();
        assert_eq!(terms, vec!["GO:5", "GO:7"]);
        assert_eq!(stats.dropped_negated, 2);
    }

    #[test]
    fn test_missing_qualifier_column_excludes_nothing() {
        let table = AnnotationTable::with_rows(
            ["protein_id", "go_term", "evidence_code"],
            vec![row(&["P1", "GO:1", "EXP"]), row(&["P1", "GO:2", "IDA"])],
        )
        .unwrap();
        assert_eq!(EvidenceFilter::curated().apply(&table).unwrap().len(), 2);
    }

    #[test]
    fn test_empty_keys_dropped() {
        let table = table_with_qualifier(&[
            ["", "", "GO:1", "EXP"],
            ["P1", "", "", "EXP"],
            ["P1", "", "GO:1", "EXP"],
        ]);
        let (filtered, stats) = EvidenceFilter::curated().apply_with_stats(&table).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(stats.dropped_missing_key, 2);
    }

    #[test]
    fn test_duplicates_collapsed_but_distinct_rows_kept() {
        let table = table_with_qualifier(&[
            ["P1", "", "GO:1", "EXP"],
            ["P1", "", "GO:1", "EXP"],
            ["P1", "", "GO:1", "IDA"],
        ]);
        let (filtered, stats) = EvidenceFilter::curated().apply_with_stats(&table).unwrap();
        assert_eq!(filtered.len(), 2);
        assert_eq!(
            stats,
            FilterStats {
                input_rows: 3,
                dropped_evidence: 0,
                dropped_negated: 0,
                dropped_missing_key: 0,
                duplicates: 1,
                kept: 2,
            }
        );
    }

    #[test]
    fn test_passthrough_columns_preserved() {
        let table = AnnotationTable::with_rows(
            ["db", "protein_id", "go_term", "evidence_code", "date"],
            vec![row(&["UniProtKB", "P1", "GO:1", "IMP", "20240101"])],
        )
        .unwrap();
        let filtered = EvidenceFilter::curated().apply(&table).unwrap();
        assert_eq!(filtered.columns().collect::<Vec<_>>(), table.columns().collect::<Vec<_>>());
        assert_eq!(filtered.raw_rows(), table.raw_rows());
    }

    #[test]
    fn test_missing_required_column_is_schema_error() {
        let table = AnnotationTable::new(["protein_id", "go_term"]).unwrap();
        let err = EvidenceFilter::curated().apply(&table).unwrap_err();
        assert_eq!(err.kind(), crate::error::FailureKind::Schema);
        assert!(err.to_string().contains(EVIDENCE_CODE));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let table = table_with_qualifier(&[
            ["P1", "", "GO:1", "EXP"],
            ["P1", "", "GO:1", "EXP"],
            ["P2", "NOT", "GO:1", "EXP"],
            ["P3", "", "GO:2", "IEA"],
        ]);
        let filter = EvidenceFilter::curated();
        let once = filter.apply(&table).unwrap();
        let twice = filter.apply(&once).unwrap();
        assert_eq!(once, twice);
    }
}
