//! Snapshot table parsers.
//!
//! Annotation snapshots are tab-separated files with a header row. Lines
//! beginning with `!` are comments and every value is read as a string.
//!
//! ```no_run
//! use cafa_holdout::parsers::parse_table_file;
//! use std::path::Path;
//!
//! let table = parse_table_file(Path::new("goa_uniprot_all_subset.214.tsv")).unwrap();
//! println!("{} rows, {} columns", table.len(), table.column_count());
//! ```

mod tsv;

pub use tsv::{parse_table_file, parse_table_reader, parse_table_str, COMMENT_PREFIX, SEPARATOR};
