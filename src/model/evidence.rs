//! Evidence code sets and qualifier handling.

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

/// Experimental evidence codes.
pub const EXPERIMENTAL_CODES: [&str; 6] = ["EXP", "IDA", "IPI", "IMP", "IGI", "IEP"];

/// High-throughput experimental evidence codes.
pub const HIGH_THROUGHPUT_CODES: [&str; 5] = ["HTP", "HDA", "HMP", "HGI", "HEP"];

/// Curator and author statement codes accepted as curated.
pub const STATEMENT_CODES: [&str; 2] = ["IC", "TAS"];

/// The set of evidence codes an annotation must carry to count as curated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct EvidenceCodeSet(BTreeSet<String>);

impl EvidenceCodeSet {
    /// Build a set from arbitrary codes. Codes are trimmed; empty entries are dropped.
    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            codes
                .into_iter()
                .map(|c| c.as_ref().trim().to_string())
                .filter(|c| !c.is_empty())
                .collect(),
        )
    }

    /// Parse a comma-separated list such as `"EXP,IDA, IPI"`.
    #[must_use]
    pub fn parse_list(list: &str) -> Self {
        Self::from_codes(list.split(','))
    }

    /// Experimental, high-throughput, and curator/author statement codes.
    #[must_use]
    pub fn curated() -> Self {
        Self::from_codes(
            EXPERIMENTAL_CODES
                .iter()
                .chain(HIGH_THROUGHPUT_CODES.iter())
                .chain(STATEMENT_CODES.iter()),
        )
    }

    /// Low-throughput experimental codes only.
    #[must_use]
    pub fn experimental() -> Self {
        Self::from_codes(EXPERIMENTAL_CODES)
    }

    /// High-throughput experimental codes only.
    #[must_use]
    pub fn high_throughput() -> Self {
        Self::from_codes(HIGH_THROUGHPUT_CODES)
    }

    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.0.contains(code)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for EvidenceCodeSet {
    fn default() -> Self {
        Self::curated()
    }
}

impl fmt::Display for EvidenceCodeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.iter().collect::<Vec<_>>().join(","))
    }
}

/// Whether a GAF-style qualifier carries the negating `NOT` token.
///
/// The token must be a whole pipe-delimited segment: `NOT`, `NOT|x`, `x|NOT`
/// and `x|NOT|y` match, `NOTX` and `XNOT` do not.
#[must_use]
pub fn has_not_qualifier(qualifier: &str) -> bool {
    static NOT_TOKEN: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?:^|\|)NOT(?:\||$)").expect("static regex"));
    NOT_TOKEN.is_match(qualifier)
}
