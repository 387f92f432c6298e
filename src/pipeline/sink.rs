//! Persisting holdout tables.

use crate::config::OutputsConfig;
use crate::error::{HoldoutError, Result};
use crate::holdout::HoldoutSets;
use crate::reports::render_table;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Destination for the three tables of a snapshot pair.
///
/// A sink either persists all three tables of a pair or none of them.
pub trait HoldoutSink: Send + Sync {
    /// Persist the holdout sets of pair (`index`, `index + 1`).
    fn write_pair(&self, index: u32, sets: &HoldoutSets) -> Result<PairPaths>;
}

/// Files written for one pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairPaths {
    pub known: PathBuf,
    pub gt_all: PathBuf,
    pub ground_truth: PathBuf,
}

impl PairPaths {
    fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        [&self.known, &self.gt_all, &self.ground_truth].into_iter()
    }
}

/// On-disk output directories.
///
/// Files are named `known.N.tsv`, `gt_all.N+1.tsv` and
/// `ground_truth.N_N+1.tsv`; downstream evaluation relies on these names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    known_dir: PathBuf,
    gt_all_dir: PathBuf,
    ground_truth_dir: PathBuf,
}

impl OutputLayout {
    pub fn new(
        known_dir: impl Into<PathBuf>,
        gt_all_dir: impl Into<PathBuf>,
        ground_truth_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            known_dir: known_dir.into(),
            gt_all_dir: gt_all_dir.into(),
            ground_truth_dir: ground_truth_dir.into(),
        }
    }

    /// The default directory names under `root`.
    pub fn under(root: &Path) -> Self {
        let defaults = OutputsConfig::default();
        Self::new(
            root.join(defaults.known_dir),
            root.join(defaults.gt_all_dir),
            root.join(defaults.ground_truth_dir),
        )
    }

    #[must_use]
    pub fn known_path(&self, index: u32) -> PathBuf {
        self.known_dir.join(format!("known.{index}.tsv"))
    }

    /// Path of the full ground truth at snapshot `next`.
    #[must_use]
    pub fn gt_all_path(&self, next: u32) -> PathBuf {
        self.gt_all_dir.join(format!("gt_all.{next}.tsv"))
    }

    #[must_use]
    pub fn ground_truth_path(&self, index: u32, next: u32) -> PathBuf {
        self.ground_truth_dir
            .join(format!("ground_truth.{index}_{next}.tsv"))
    }

    /// All three output paths of pair (`index`, `index + 1`).
    #[must_use]
    pub fn pair_paths(&self, index: u32) -> PairPaths {
        let next = index.saturating_add(1);
        PairPaths {
            known: self.known_path(index),
            gt_all: self.gt_all_path(next),
            ground_truth: self.ground_truth_path(index, next),
        }
    }

    /// Create the output directories if missing.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.known_dir, &self.gt_all_dir, &self.ground_truth_dir] {
            fs::create_dir_all(dir).map_err(|e| HoldoutError::io(dir, e))?;
        }
        Ok(())
    }
}

impl From<&OutputsConfig> for OutputLayout {
    fn from(config: &OutputsConfig) -> Self {
        Self::new(
            &config.known_dir,
            &config.gt_all_dir,
            &config.ground_truth_dir,
        )
    }
}

impl HoldoutSink for OutputLayout {
    fn write_pair(&self, index: u32, sets: &HoldoutSets) -> Result<PairPaths> {
        self.ensure_dirs()?;
        let paths = self.pair_paths(index);
        let contents = [
            render_table(&sets.known),
            render_table(&sets.gt_all),
            render_table(&sets.gt_new_pairs),
        ];

        // Stage every file next to its target first, then rename.
        let mut staged = Vec::with_capacity(contents.len());
        for (target, content) in paths.iter().zip(&contents) {
            let temp = staging_path(target);
            if let Err(e) = fs::write(&temp, content) {
                remove_all(staged.iter().chain(std::iter::once(&temp)));
                return Err(HoldoutError::io(temp, e));
            }
            staged.push(temp);
        }

        let mut committed: Vec<&PathBuf> = Vec::with_capacity(staged.len());
        for (position, (temp, target)) in staged.iter().zip(paths.iter()).enumerate() {
            if let Err(e) = fs::rename(temp, target) {
                remove_all(committed.into_iter().chain(&staged[position..]));
                return Err(HoldoutError::io(target, e));
            }
            committed.push(target);
        }

        Ok(paths)
    }
}

/// Hidden sibling used while a pair is being written.
fn staging_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{name}.{}.partial", std::process::id()))
}

fn remove_all<'a>(paths: impl IntoIterator<Item = &'a PathBuf>) {
    for path in paths {
        if let Err(e) = fs::remove_file(path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Failed to remove {}: {}", path.display(), e);
            }
        }
    }
}
