//! in-toto statement envelope pieces: statement type, subjects and the
//! predicate capability every payload implements.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Statement type written into the `_type` field.
pub const STATEMENT_TYPE_V01: &str = "https://in-toto.io/Statement/v0.1";

/// Algorithm name → lowercase hex digest. Keys serialize sorted.
pub type DigestSet = BTreeMap<String, String>;

/// A payload that can ride inside an in-toto statement.
pub trait Predicate: Serialize {
    /// URI written into the statement's `predicateType` field.
    const PREDICATE_TYPE: &'static str;
}

/// An artifact reference identified by its content digests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    pub digest: DigestSet,
}

impl Subject {
    /// Create a subject with no digests yet.
    pub fn new(name: impl Into<String>) -> Self {
        Subject {
            name: name.into(),
            digest: DigestSet::new(),
        }
    }

    /// Add (or replace) the digest for `algorithm`.
    pub fn with_digest(mut self, algorithm: impl Into<String>, hex: impl Into<String>) -> Self {
        self.digest.insert(algorithm.into(), hex.into());
        self
    }
}
