// vex/ — OpenVEX predicate carried by the attestation
//
// model.rs — Document and statement structures (serde) matching the
//            OpenVEX v0.2.0 JSON layout

pub mod model;

pub use model::{Product, Statement, Status, Vex, Vulnerability, CONTEXT, TYPE_URI};
