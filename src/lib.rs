//! # vexattest
//!
//! Builds in-toto attestations whose predicate is an OpenVEX document.
//!
//! ```no_run
//! use vexattest::{Attestation, Subject};
//!
//! let mut att: Attestation = Attestation::new();
//! att.add_subjects([Subject::new("pkg:a").with_digest("sha256", "abc123")])?;
//! att.to_json(std::io::stdout())?;
//! # Ok::<(), vexattest::Error>(())
//! ```
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`attestation`] | Statement + predicate document, subject validation, encoding |
//! | [`intoto`] | Statement type, subjects, the [`Predicate`] trait |
//! | [`vex`] | OpenVEX predicate model |
//! | [`canonical`] | Sorted-key compact JSON for digests |
//! | [`hash`] | SHA-256 / SHA-512 helpers |
//!
//! Nothing in this crate runs on load; every effect follows an explicit call.

pub mod attestation;
pub mod canonical;
pub mod error;
pub mod hash;
pub mod intoto;
pub mod vex;

pub use attestation::Attestation;
pub use error::{Error, Result};
pub use intoto::{DigestSet, Predicate, Subject, STATEMENT_TYPE_V01};
pub use vex::Vex;
