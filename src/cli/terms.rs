//! Terms-of-interest command handler.

use crate::holdout::TermCollector;
use crate::parsers::parse_table_file;
use anyhow::{Context, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static GT_ALL_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^gt_all\.(\d+)\.tsv$").expect("static regex"));

/// Configuration for the `terms` command.
#[derive(Debug, Clone)]
pub struct TermsCommand {
    pub gt_all_dir: PathBuf,
    pub output: PathBuf,
    pub keep_roots: bool,
}

/// `gt_all.N.tsv` files of a directory, ordered by N.
pub fn find_gt_all_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("cannot read {}", dir.display()))?;

    let mut files: Vec<(u64, PathBuf)> = entries
        .filter_map(std::result::Result::ok)
        .filter_map(|entry| {
            let name = entry.file_name();
            let captures = GT_ALL_FILE.captures(name.to_str()?)?;
            let index = captures[1].parse().ok()?;
            Some((index, entry.path()))
        })
        .collect();
    files.sort();
    Ok(files.into_iter().map(|(_, path)| path).collect())
}

/// Collect the terms of every ground-truth table and write them one per line.
///
/// Returns the number of terms written.
#[allow(clippy::needless_pass_by_value)]
pub fn run_terms(command: TermsCommand) -> Result<usize> {
    let files = find_gt_all_files(&command.gt_all_dir)?;
    if files.is_empty() {
        anyhow::bail!(
            "no gt_all.N.tsv files found in {}",
            command.gt_all_dir.display()
        );
    }

    let mut collector = TermCollector::new();
    for path in &files {
        tracing::debug!("Reading {}", path.display());
        let table = parse_table_file(path)?;
        collector
            .add_table(&table)
            .with_context(|| path.display().to_string())?;
    }

    let terms = collector.finish(command.keep_roots);
    let mut content = terms.join("\n");
    if !terms.is_empty() {
        content.push('\n');
    }
    std::fs::write(&command.output, content)
        .with_context(|| format!("failed to write {}", command.output.display()))?;

    tracing::info!(
        "Wrote {} terms from {} file(s) to {}",
        terms.len(),
        files.len(),
        command.output.display()
    );
    Ok(terms.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_gt_all_files_orders_numerically() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["gt_all.10.tsv", "gt_all.9.tsv", "known.9.tsv", "gt_all.x.tsv"] {
            std::fs::write(dir.path().join(name), "go_term\n").unwrap();
        }
        let files = find_gt_all_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["gt_all.9.tsv", "gt_all.10.tsv"]);
    }

    #[test]
    fn test_run_terms_requires_input_files() {
        let dir = tempfile::tempdir().unwrap();
        let result = run_terms(TermsCommand {
            gt_all_dir: dir.path().to_path_buf(),
            output: dir.path().join("toi.txt"),
            keep_roots: false,
        });
        assert!(result.is_err());
    }
}
