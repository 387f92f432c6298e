//! Terms-of-interest collection across ground-truth tables.

use crate::error::Result;
use crate::model::{AnnotationTable, GO_TERM};
use std::collections::BTreeSet;

/// Biological process root.
pub const BP_ROOT: &str = "GO:0008150";
/// Molecular function root.
pub const MF_ROOT: &str = "GO:0003674";
/// Cellular component root.
pub const CC_ROOT: &str = "GO:0005575";

/// The three GO namespace roots.
pub const ROOT_TERMS: [&str; 3] = [BP_ROOT, MF_ROOT, CC_ROOT];

/// Accumulates the distinct GO terms seen across tables.
#[derive(Debug, Clone, Default)]
pub struct TermCollector {
    terms: BTreeSet<String>,
}

impl TermCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every non-empty `go_term` of a table.
    pub fn add_table(&mut self, table: &AnnotationTable) -> Result<()> {
        table.require_columns(&[GO_TERM], "terms of interest")?;
        self.terms.extend(
            table
                .rows()
                .filter_map(|row| row.go_term())
                .filter(|term| !term.is_empty())
                .map(str::to_string),
        );
        Ok(())
    }

    /// Sorted terms, optionally without the namespace roots.
    #[must_use]
    pub fn finish(self, keep_roots: bool) -> Vec<String> {
        self.terms
            .into_iter()
            .filter(|term| keep_roots || !ROOT_TERMS.contains(&term.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gt(terms: &[&str]) -> AnnotationTable {
        AnnotationTable::with_rows(
            ["protein_id", "go_term"],
            terms
                .iter()
                .map(|t| vec!["P1".to_string(), (*t).to_string()])
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_collects_sorted_unique_terms_without_roots() {
        let mut collector = TermCollector::new();
        collector.add_table(&gt(&["GO:2", "GO:0008150", "GO:1"])).unwrap();
        collector.add_table(&gt(&["GO:1", "", "GO:0005575"])).unwrap();
        assert_eq!(collector.finish(false), vec!["GO:1", "GO:2"]);
    }

    #[test]
    fn test_keep_roots() {
        let mut collector = TermCollector::new();
        collector.add_table(&gt(&["GO:0003674", "GO:1"])).unwrap();
        assert_eq!(collector.finish(true), vec!["GO:0003674", "GO:1"]);
    }

    #[test]
    fn test_requires_go_term_column() {
        let table = AnnotationTable::new(["protein_id"]).unwrap();
        assert!(TermCollector::new().add_table(&table).is_err());
    }
}
