//! The (protein, term) matching key.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A (protein_id, go_term) pair.
///
/// Used as the matching key of the snapshot anti-join; never written to
/// output tables on its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProteinTermPair {
    pub protein_id: String,
    pub go_term: String,
}

impl ProteinTermPair {
    pub fn new(protein_id: impl Into<String>, go_term: impl Into<String>) -> Self {
        Self {
            protein_id: protein_id.into(),
            go_term: go_term.into(),
        }
    }
}

impl fmt::Display for ProteinTermPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.protein_id, self.go_term)
    }
}
