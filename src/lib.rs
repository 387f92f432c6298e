//! **Temporal holdout benchmarks for protein function prediction.**
//!
//! `cafa-holdout` turns a series of Gene Ontology annotation snapshots into
//! CAFA-style evaluation sets. For every consecutive pair of snapshots
//! (N, N+1) it writes:
//!
//! - `known.N.tsv`: curated annotations already known at N,
//! - `gt_all.N+1.tsv`: every curated annotation at N+1,
//! - `ground_truth.N_N+1.tsv`: the N+1 annotations whose (protein, term)
//!   pair did not exist at N.
//!
//! "Curated" means an experimental, high-throughput, or author/curator
//! statement evidence code and no `NOT` qualifier.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: [`AnnotationTable`], an ordered column schema with string
//!   rows, plus evidence code sets and protein/term pairs.
//! - **[`parsers`]**: tab-separated snapshot parsing.
//! - **[`holdout`]**: the [`EvidenceFilter`] and [`compute_delta`] that
//!   produce [`HoldoutSets`], and terms-of-interest collection.
//! - **[`pipeline`]**: snapshot lookup on disk, atomic output writing, the
//!   [`RangeOrchestrator`] and the external evaluator stage.
//! - **[`reports`]**: TSV table output and run summaries.
//! - **[`config`]**: YAML configuration, presets and validation.
//!
//! ## Building a Range
//!
//! ```no_run
//! use cafa_holdout::holdout::EvidenceFilter;
//! use cafa_holdout::pipeline::{OutputLayout, RangeOrchestrator, SnapshotDirectory};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let orchestrator = RangeOrchestrator::new(
//!         SnapshotDirectory::new("/data/goa"),
//!         OutputLayout::under(Path::new("holdout")),
//!         EvidenceFilter::curated(),
//!     );
//!     let report = orchestrator.run(214, 225)?;
//!
//!     for (index, failure) in report.failures() {
//!         eprintln!("pair {index} failed: {}", failure.message);
//!     }
//!     println!("{} pairs written", report.written_count());
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::struct_excessive_bools,
    // Column indices and counts stay far below u32/usize limits
    clippy::cast_possible_truncation
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod holdout;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod reports;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError, EvidencePreset, Validatable};
pub use error::{ErrorContext, FailureKind, HoldoutError, Result};
pub use holdout::{
    build_holdout_sets, compute_delta, filter_curated, DeltaSummary, EvidenceFilter, HoldoutSets,
};
pub use model::{AnnotationTable, EvidenceCodeSet, ProteinTermPair, TableStats};
pub use parsers::{parse_table_file, parse_table_str};
pub use pipeline::{
    HoldoutSink, OutputLayout, RangeOrchestrator, RangeReport, SnapshotDirectory, SnapshotSource,
};
pub use reports::{render_table, write_table, ReportFormat, ReportGenerator};
