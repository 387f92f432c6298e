//! Annotation data model.
//!
//! Snapshots are loaded into [`AnnotationTable`]s: an ordered column schema
//! plus string rows. Only the `protein_id`, `go_term`, `evidence_code` and
//! (optional) `qualifier` columns carry meaning; every other column is
//! passed through untouched.

mod evidence;
mod pair;
mod table;

pub use evidence::{
    has_not_qualifier, EvidenceCodeSet, EXPERIMENTAL_CODES, HIGH_THROUGHPUT_CODES,
    STATEMENT_CODES,
};
pub use pair::ProteinTermPair;
pub use table::{
    AnnotationRow, AnnotationTable, KeyColumns, TableStats, EVIDENCE_CODE, GO_TERM, PROTEIN_ID,
    QUALIFIER, REQUIRED_COLUMNS,
};
