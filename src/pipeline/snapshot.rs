//! Snapshot location and loading.

use crate::error::{ErrorContext, HoldoutError, Result};
use crate::model::{AnnotationTable, REQUIRED_COLUMNS};
use crate::parsers::parse_table_file;
use std::path::{Path, PathBuf};

/// Source of annotation snapshots, addressed by release index.
///
/// Implementations must return tables that carry the required columns, or
/// fail with a schema error.
pub trait SnapshotSource: Send + Sync {
    /// Load snapshot `index`.
    fn load(&self, index: u32) -> Result<AnnotationTable>;
}

/// Snapshots stored on disk under a base directory.
///
/// Snapshot `N` is looked up, in order, at
/// `<base>/goa_uniprot_all_subset.N.tsv` and
/// `<base>/goa_uniprot_all.gaf.N/goa_uniprot_all_subset.N.tsv`.
#[derive(Debug, Clone)]
pub struct SnapshotDirectory {
    base: PathBuf,
}

impl SnapshotDirectory {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Candidate paths for snapshot `index`, in lookup order.
    #[must_use]
    pub fn candidates(&self, index: u32) -> [PathBuf; 2] {
        let file_name = format!("goa_uniprot_all_subset.{index}.tsv");
        [
            self.base.join(&file_name),
            self.base
                .join(format!("goa_uniprot_all.gaf.{index}"))
                .join(&file_name),
        ]
    }

    /// Find the file for snapshot `index`.
    pub fn locate(&self, index: u32) -> Result<PathBuf> {
        let candidates = self.candidates(index);
        candidates
            .iter()
            .find(|path| path.is_file())
            .cloned()
            .ok_or_else(|| HoldoutError::not_found(format!("snapshot {index}"), candidates.to_vec()))
    }
}

impl SnapshotSource for SnapshotDirectory {
    fn load(&self, index: u32) -> Result<AnnotationTable> {
        let path = self.locate(index)?;
        tracing::info!("Loading snapshot {} from {}", index, path.display());

        let table = parse_table_file(&path).with_context(|| format!("snapshot {index}"))?;
        table.require_columns(&REQUIRED_COLUMNS, &format!("snapshot {index}"))?;

        tracing::debug!(
            rows = table.len(),
            columns = table.column_count(),
            "snapshot {} loaded",
            index
        );
        Ok(table)
    }
}
