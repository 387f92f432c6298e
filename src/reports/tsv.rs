//! Tab-separated table output.

use crate::error::{HoldoutError, Result};
use crate::model::AnnotationTable;
use std::fmt::Write as _;
use std::path::Path;

/// Render a table as TSV: header line, then one line per row, each `\n`
/// terminated.
#[must_use]
pub fn render_table(table: &AnnotationTable) -> String {
    let mut out = String::new();
    let header: Vec<&str> = table.columns().collect();
    let _ = writeln!(out, "{}", header.join("\t"));
    for row in table.raw_rows() {
        let _ = writeln!(out, "{}", row.join("\t"));
    }
    out
}

/// Render and write a table to `path`.
pub fn write_table(table: &AnnotationTable, path: &Path) -> Result<()> {
    std::fs::write(path, render_table(table)).map_err(|e| HoldoutError::io(path, e))
}
