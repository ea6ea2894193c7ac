//! The attestation document: an in-toto statement header bound to a
//! predicate.
//!
//! An [`Attestation`] starts empty, grows only through
//! [`Attestation::add_subjects`], and is read out with
//! [`Attestation::to_json`]. Encoding never mutates the value, so it can be
//! repeated and always yields the same bytes.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use std::collections::HashSet;
use std::io::Write;
use tracing::debug;

use crate::canonical;
use crate::error::{Error, Result};
use crate::hash;
use crate::intoto::{Predicate, Subject, STATEMENT_TYPE_V01};
use crate::vex::Vex;

/// An in-toto statement carrying a predicate `P`.
///
/// The statement-type field is written under the in-toto wire key `_type`,
/// not `type`, so the output is accepted by in-toto verifiers and signers.
/// Decoding checks the same invariants as building: `_type` must be
/// [`STATEMENT_TYPE_V01`], `predicateType` must equal `P::PREDICATE_TYPE`,
/// and every subject must carry a digest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attestation<P = Vex> {
    #[serde(rename = "_type")]
    statement_type: String,
    #[serde(rename = "predicateType")]
    predicate_type: String,
    subject: Vec<Subject>,
    predicate: P,
}

/// Wire shape before validation.
#[derive(Deserialize)]
struct RawAttestation<P> {
    #[serde(rename = "_type")]
    statement_type: String,
    #[serde(rename = "predicateType")]
    predicate_type: String,
    #[serde(default)]
    subject: Vec<Subject>,
    predicate: P,
}

impl<'de, P> Deserialize<'de> for Attestation<P>
where
    P: Predicate + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = RawAttestation::<P>::deserialize(deserializer)?;
        if raw.statement_type != STATEMENT_TYPE_V01 {
            return Err(D::Error::custom(format!(
                "unsupported statement type {:?}",
                raw.statement_type
            )));
        }
        if raw.predicate_type != P::PREDICATE_TYPE {
            return Err(D::Error::custom(format!(
                "predicate type {:?} does not match {:?}",
                raw.predicate_type,
                P::PREDICATE_TYPE
            )));
        }
        let mut att = Attestation::with_predicate(raw.predicate);
        att.add_subjects(raw.subject).map_err(D::Error::custom)?;
        Ok(att)
    }
}

impl<P: Predicate + Default> Attestation<P> {
    /// A new attestation with no subjects and an empty predicate.
    pub fn new() -> Self {
        Self::with_predicate(P::default())
    }
}

impl<P: Predicate + Default> Default for Attestation<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Predicate> Attestation<P> {
    /// A new attestation with no subjects wrapping an existing predicate.
    pub fn with_predicate(predicate: P) -> Self {
        Attestation {
            statement_type: STATEMENT_TYPE_V01.to_string(),
            predicate_type: P::PREDICATE_TYPE.to_string(),
            subject: Vec::new(),
            predicate,
        }
    }

    pub fn statement_type(&self) -> &str {
        &self.statement_type
    }

    pub fn predicate_type(&self) -> &str {
        &self.predicate_type
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subject
    }

    pub fn predicate(&self) -> &P {
        &self.predicate
    }

    pub fn predicate_mut(&mut self) -> &mut P {
        &mut self.predicate
    }

    /// Append subjects in order.
    ///
    /// The whole batch is checked first: if any subject has no digest the
    /// call fails naming it and nothing is appended.
    pub fn add_subjects<I>(&mut self, subjects: I) -> Result<()>
    where
        I: IntoIterator<Item = Subject>,
    {
        let batch: Vec<Subject> = subjects.into_iter().collect();
        if let Some(bad) = batch.iter().find(|s| s.digest.is_empty()) {
            return Err(Error::Validation {
                name: bad.name.clone(),
            });
        }
        debug!(count = batch.len(), "appending attestation subjects");
        self.subject.extend(batch);
        Ok(())
    }

    /// Write the attestation as JSON: two-space indent, HTML characters left
    /// unescaped, trailing newline.
    ///
    /// On error the writer may already hold a partial document.
    pub fn to_json<W: Write>(&self, mut w: W) -> Result<()> {
        {
            let mut ser = Serializer::with_formatter(&mut w, PrettyFormatter::with_indent(b"  "));
            self.serialize(&mut ser).map_err(Error::Encoding)?;
        }
        w.write_all(b"\n")?;
        debug!(subjects = self.subject.len(), "attestation encoded");
        Ok(())
    }

    /// Sorted-key, compact JSON encoding.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>> {
        canonical::canonical_bytes(self).map_err(Error::Encoding)
    }

    /// SHA-256 hex digest of [`Attestation::canonical_bytes`].
    pub fn digest(&self) -> Result<String> {
        Ok(hash::sha256_hex(&self.canonical_bytes()?))
    }
}

impl Attestation<Vex> {
    /// Product ids named by VEX statements that no subject name matches,
    /// first occurrence order, no duplicates.
    pub fn unattested_products(&self) -> Vec<&str> {
        let names: HashSet<&str> = self.subject.iter().map(|s| s.name.as_str()).collect();
        let mut seen = HashSet::new();
        self.predicate
            .product_ids()
            .filter(|id| !names.contains(id) && seen.insert(*id))
            .collect()
    }
}
