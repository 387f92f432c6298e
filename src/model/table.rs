//! Annotation tables with a dynamic, ordered column schema.

use super::ProteinTermPair;
use crate::error::{HoldoutError, ParseErrorKind, Result};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use std::collections::HashSet;

/// Column holding the protein identifier.
pub const PROTEIN_ID: &str = "protein_id";
/// Column holding the GO term identifier.
pub const GO_TERM: &str = "go_term";
/// Column holding the evidence code.
pub const EVIDENCE_CODE: &str = "evidence_code";
/// Optional column holding the pipe-delimited qualifier.
pub const QUALIFIER: &str = "qualifier";

/// Columns every annotation snapshot must carry.
pub const REQUIRED_COLUMNS: [&str; 3] = [PROTEIN_ID, GO_TERM, EVIDENCE_CODE];

/// An in-memory annotation table.
///
/// The column set is fixed per table and kept in file order; rows are plain
/// string vectors aligned with it. An empty string stands for a missing value.
/// Rows are not assumed unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationTable {
    columns: IndexSet<String>,
    rows: Vec<Vec<String>>,
}

/// Resolved positions of the columns the holdout logic reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyColumns {
    pub protein_id: usize,
    pub go_term: usize,
    pub evidence_code: usize,
    pub qualifier: Option<usize>,
}

impl AnnotationTable {
    /// Create an empty table with the given column schema.
    pub fn new<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = IndexSet::new();
        for column in columns {
            let column = column.into();
            if !set.insert(column.clone()) {
                return Err(HoldoutError::parse(
                    "building table schema",
                    ParseErrorKind::DuplicateColumn(column),
                ));
            }
        }
        Ok(Self {
            columns: set,
            rows: Vec::new(),
        })
    }

    /// Create a table and fill it with rows.
    pub fn with_rows<I, S>(columns: I, rows: Vec<Vec<String>>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new(columns)?;
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Append a row. The row must have exactly one value per column.
    pub fn push_row(&mut self, row: Vec<String>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(HoldoutError::parse(
                "appending row",
                ParseErrorKind::RowWidth {
                    expected: self.columns.len(),
                    found: row.len(),
                },
            ));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Column names in schema order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    /// Number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Position of a column, if present.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.get_index_of(name)
    }

    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains(name)
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate rows as name-addressable views.
    pub fn rows(&self) -> impl Iterator<Item = AnnotationRow<'_>> {
        self.rows.iter().map(move |values| AnnotationRow {
            columns: &self.columns,
            values,
        })
    }

    /// Raw row values in schema order.
    #[must_use]
    pub fn raw_rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Check that every named column is present.
    pub fn require_columns(&self, required: &[&str], context: &str) -> Result<()> {
        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|c| !self.has_column(c))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(HoldoutError::schema(context, missing))
        }
    }

    /// Resolve the protein, term and evidence columns (and the qualifier if present).
    pub fn key_columns(&self) -> Result<KeyColumns> {
        self.require_columns(&REQUIRED_COLUMNS, "annotation table")?;
        Ok(KeyColumns {
            protein_id: self.column_index(PROTEIN_ID).unwrap_or_default(),
            go_term: self.column_index(GO_TERM).unwrap_or_default(),
            evidence_code: self.column_index(EVIDENCE_CODE).unwrap_or_default(),
            qualifier: self.column_index(QUALIFIER),
        })
    }

    /// Resolve only the (protein_id, go_term) key positions.
    pub(crate) fn pair_columns(&self) -> Result<(usize, usize)> {
        match (self.column_index(PROTEIN_ID), self.column_index(GO_TERM)) {
            (Some(p), Some(g)) => Ok((p, g)),
            _ => {
                let missing = [PROTEIN_ID, GO_TERM]
                    .into_iter()
                    .filter(|c| !self.has_column(c));
                Err(HoldoutError::schema("pair projection", missing))
            }
        }
    }

    /// Distinct (protein_id, go_term) pairs, in first-seen order.
    pub fn pairs(&self) -> Result<IndexSet<ProteinTermPair>> {
        let (p, g) = self.pair_columns()?;
        Ok(self
            .rows
            .iter()
            .map(|row| ProteinTermPair::new(&row[p], &row[g]))
            .collect())
    }

    /// Borrowed pair keys, for joins that do not need owned pairs.
    pub(crate) fn pair_keys(&self) -> Result<HashSet<(&str, &str)>> {
        let (p, g) = self.pair_columns()?;
        Ok(self
            .rows
            .iter()
            .map(|row| (row[p].as_str(), row[g].as_str()))
            .collect())
    }

    /// Number of distinct non-empty values in a column (0 if the column is absent).
    #[must_use]
    pub fn distinct_count(&self, column: &str) -> usize {
        self.column_index(column).map_or(0, |idx| {
            self.rows
                .iter()
                .map(|row| row[idx].as_str())
                .filter(|v| !v.is_empty())
                .collect::<HashSet<_>>()
                .len()
        })
    }

    /// Keep the rows for which `keep` returns true, collapsing exact duplicates.
    ///
    /// The first occurrence of each distinct row wins and relative order is kept.
    pub(crate) fn select_distinct<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&[String]) -> bool,
    {
        let distinct: IndexSet<&Vec<String>> =
            self.rows.iter().filter(|row| keep(row)).collect();
        Self {
            columns: self.columns.clone(),
            rows: distinct.into_iter().cloned().collect(),
        }
    }

    /// Move `protein_id` and `go_term` to the front; other columns keep their order.
    ///
    /// Ground-truth consumers read the first two fields as (target, term).
    pub(crate) fn into_keys_first(self) -> Result<Self> {
        let (p, g) = self.pair_columns()?;
        let order: Vec<usize> = [p, g]
            .into_iter()
            .chain((0..self.columns.len()).filter(|i| *i != p && *i != g))
            .collect();
        let columns = order
            .iter()
            .filter_map(|&i| self.columns.get_index(i).cloned())
            .collect();
        let rows = self
            .rows
            .into_iter()
            .map(|mut row| order.iter().map(|&i| std::mem::take(&mut row[i])).collect())
            .collect();
        Ok(Self { columns, rows })
    }

    /// Summary counts for logging and reports.
    #[must_use]
    pub fn stats(&self) -> TableStats {
        TableStats {
            rows: self.len(),
            proteins: self.distinct_count(PROTEIN_ID),
            terms: self.distinct_count(GO_TERM),
        }
    }
}

/// A single annotation row: an ordered mapping from column name to value.
#[derive(Debug, Clone, Copy)]
pub struct AnnotationRow<'a> {
    columns: &'a IndexSet<String>,
    values: &'a [String],
}

impl<'a> AnnotationRow<'a> {
    /// Value of a column, or `None` if the table has no such column.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&'a str> {
        self.columns
            .get_index_of(column)
            .map(|idx| self.values[idx].as_str())
    }

    #[must_use]
    pub fn protein_id(&self) -> Option<&'a str> {
        self.get(PROTEIN_ID)
    }

    #[must_use]
    pub fn go_term(&self) -> Option<&'a str> {
        self.get(GO_TERM)
    }

    #[must_use]
    pub fn evidence_code(&self) -> Option<&'a str> {
        self.get(EVIDENCE_CODE)
    }

    #[must_use]
    pub fn qualifier(&self) -> Option<&'a str> {
        self.get(QUALIFIER)
    }

    /// Values in schema order.
    #[must_use]
    pub const fn values(&self) -> &'a [String] {
        self.values
    }

    /// (column, value) entries in schema order.
    pub fn entries(&self) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }

    /// Collect into an owned ordered map.
    #[must_use]
    pub fn to_map(&self) -> IndexMap<String, String> {
        self.entries()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

/// Row and distinct-value counts of a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableStats {
    pub rows: usize,
    pub proteins: usize,
    pub terms: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    fn sample() -> AnnotationTable {
        AnnotationTable::with_rows(
            ["protein_id", "go_term", "evidence_code", "db"],
            vec![
                row(&["P1", "GO:1", "EXP", "UniProtKB"]),
                row(&["P1", "GO:2", "IDA", "UniProtKB"]),
                row(&["P2", "GO:1", "EXP", "UniProtKB"]),
                row(&["P1", "GO:1", "EXP", "UniProtKB"]),
            ],
        )
        .expect("valid table")
    }

    #[test]
    fn test_duplicate_column_rejected() {
        match AnnotationTable::new(["a", "b", "a"]) {
            Err(HoldoutError::Parse {
                source: ParseErrorKind::DuplicateColumn(column),
                ..
            }) => assert_eq!(column, "a"),
            other => panic!("Expected duplicate column error, got {other:?}"),
        }
    }

    #[test]
    fn test_push_row_checks_width() {
        let mut table = AnnotationTable::new(["a", "b"]).unwrap();
        assert!(table.push_row(row(&["1"])).is_err());
        assert!(table.push_row(row(&["1", "2"])).is_ok());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_row_view_by_name() {
        let table = sample();
        let first = table.rows().next().unwrap();
        assert_eq!(first.protein_id(), Some("P1"));
        assert_eq!(first.get("db"), Some("UniProtKB"));
        assert_eq!(first.qualifier(), None);
        let keys: Vec<_> = first.to_map().into_keys().collect();
        assert_eq!(keys, vec!["protein_id", "go_term", "evidence_code", "db"]);
    }

    #[test]
    fn test_pairs_are_distinct_in_first_seen_order() {
        let pairs = sample().pairs().unwrap();
        let pairs: Vec<_> = pairs.into_iter().collect();
        assert_eq!(
            pairs,
            vec![
                ProteinTermPair::new("P1", "GO:1"),
                ProteinTermPair::new("P1", "GO:2"),
                ProteinTermPair::new("P2", "GO:1"),
            ]
        );
    }

    #[test]
    fn test_key_columns_missing_is_schema_error() {
        let table = AnnotationTable::new(["protein_id", "go_term"]).unwrap();
        let err = table.key_columns().unwrap_err();
        assert_eq!(err.kind(), crate::error::FailureKind::Schema);
        assert!(err.to_string().contains("evidence_code"));
    }

    #[test]
    fn test_select_distinct_collapses_duplicates() {
        let table = sample();
        let distinct = table.select_distinct(|_| true);
        assert_eq!(distinct.len(), 3);
        assert_eq!(distinct.raw_rows()[0], row(&["P1", "GO:1", "EXP", "UniProtKB"]));
    }

    #[test]
    fn test_stats() {
        let stats = sample().stats();
        assert_eq!(
            stats,
            TableStats {
                rows: 4,
                proteins: 2,
                terms: 2
            }
        );
    }

    #[test]
    fn test_keys_first_keeps_remaining_order() {
        let table = AnnotationTable::with_rows(
            ["db", "go_term", "symbol", "protein_id", "evidence_code"],
            vec![row(&["UniProtKB", "GO:1", "ABC1", "P1", "EXP"])],
        )
        .unwrap()
        .into_keys_first()
        .unwrap();
        assert_eq!(
            table.columns().collect::<Vec<_>>(),
            vec!["protein_id", "go_term", "db", "symbol", "evidence_code"]
        );
        assert_eq!(table.raw_rows()[0], row(&["P1", "GO:1", "UniProtKB", "ABC1", "EXP"]));
    }
}
