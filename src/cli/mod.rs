//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod build;
mod evaluate;
mod terms;

pub use build::{run_build, BuildCommand, BuildOverrides};
pub use evaluate::{run_evaluate, EvaluateCommand};
pub use terms::{find_gt_all_files, run_terms, TermsCommand};
