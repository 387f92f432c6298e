//! Unified error types for cafa-holdout.
//!
//! This module provides the error hierarchy for the library, with context
//! chaining for debugging and a coarse [`FailureKind`] classification used
//! when per-pair failures are recorded in run reports.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for cafa-holdout operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum HoldoutError {
    /// A table does not carry the columns an operation needs
    #[error("Schema error: {context}: missing column(s) {}", .missing.join(", "))]
    Schema {
        context: String,
        missing: Vec<String>,
    },

    /// A snapshot (or other input) could not be located
    #[error("{what} not found (looked in: {})", display_paths(.candidates))]
    NotFound {
        what: String,
        candidates: Vec<PathBuf>,
    },

    /// Errors while parsing tab-separated tables
    #[error("Failed to parse table: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// The external evaluator failed for a snapshot pair
    #[error("Evaluator failed for {index}->{next}: {message}")]
    Evaluator {
        index: u32,
        next: u32,
        message: String,
    },

    /// Configuration errors (invalid range, bad option values)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("no header row found")]
    MissingHeader,

    #[error("duplicate column '{0}' in header")]
    DuplicateColumn(String),

    #[error("line {line}: expected at most {expected} fields, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("row has {found} values but the table has {expected} columns")]
    RowWidth { expected: usize, found: usize },
}

/// Coarse classification of an error, recorded in run reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Schema,
    NotFound,
    Parse,
    Io,
    Evaluator,
    Config,
    Validation,
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for cafa-holdout operations
pub type Result<T> = std::result::Result<T, HoldoutError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl HoldoutError {
    /// Create a schema error for the given missing columns
    pub fn schema<I, S>(context: impl Into<String>, missing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Schema {
            context: context.into(),
            missing: missing.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a not-found error listing the locations that were tried
    pub fn not_found(what: impl Into<String>, candidates: Vec<PathBuf>) -> Self {
        Self::NotFound {
            what: what.into(),
            candidates,
        }
    }

    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create an evaluator error for a snapshot pair
    pub fn evaluator(index: u32, message: impl Into<String>) -> Self {
        Self::Evaluator {
            index,
            next: index.saturating_add(1),
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Classify this error for reporting.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Schema { .. } => FailureKind::Schema,
            Self::NotFound { .. } => FailureKind::NotFound,
            Self::Parse { .. } => FailureKind::Parse,
            Self::Io { .. } => FailureKind::Io,
            Self::Evaluator { .. } => FailureKind::Evaluator,
            Self::Config(_) => FailureKind::Config,
            Self::Validation(_) => FailureKind::Validation,
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for HoldoutError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are prepended to the error's existing context, so a chain
/// of calls reads outermost first:
///
/// ```ignore
/// use cafa_holdout::error::ErrorContext;
///
/// let table = parse_table_file(&path)
///     .with_context(|| format!("snapshot {index}"))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<HoldoutError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: HoldoutError, new_ctx: &str) -> HoldoutError {
    match err {
        HoldoutError::Schema { context, missing } => HoldoutError::Schema {
            context: chain_context(new_ctx, &context),
            missing,
        },
        HoldoutError::NotFound { what, candidates } => HoldoutError::NotFound {
            what: chain_context(new_ctx, &what),
            candidates,
        },
        HoldoutError::Parse { context, source } => HoldoutError::Parse {
            context: chain_context(new_ctx, &context),
            source,
        },
        HoldoutError::Io {
            path,
            message,
            source,
        } => HoldoutError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        HoldoutError::Evaluator {
            index,
            next,
            message,
        } => HoldoutError::Evaluator {
            index,
            next,
            message: chain_context(new_ctx, &message),
        },
        HoldoutError::Config(msg) => HoldoutError::Config(chain_context(new_ctx, &msg)),
        HoldoutError::Validation(msg) => HoldoutError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
