use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::intoto::Predicate;

/// Predicate type URI for OpenVEX documents.
pub const TYPE_URI: &str = "https://openvex.dev/ns";

/// JSON-LD context written into new documents.
pub const CONTEXT: &str = "https://openvex.dev/ns/v0.2.0";

// ── Document ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vex {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub author: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub role: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rfc3339_opt"
    )]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rfc3339_opt"
    )]
    pub last_updated: Option<DateTime<Utc>>,
    pub version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooling: Option<String>,
    #[serde(default)]
    pub statements: Vec<Statement>,
}

impl Vex {
    /// A fresh, empty document stamped with the current time.
    pub fn new() -> Self {
        Vex {
            context: CONTEXT.to_string(),
            id: String::new(),
            author: String::new(),
            role: String::new(),
            timestamp: Some(now_secs()),
            last_updated: None,
            version: 1,
            tooling: None,
            statements: Vec::new(),
        }
    }

    /// Every product `@id` named by the statements, in document order.
    pub fn product_ids(&self) -> impl Iterator<Item = &str> {
        self.statements
            .iter()
            .flat_map(|s| s.products.iter().map(|p| p.id.as_str()))
    }
}

impl Default for Vex {
    fn default() -> Self {
        Vex::new()
    }
}

impl Predicate for Vex {
    const PREDICATE_TYPE: &'static str = TYPE_URI;
}

// ── Statements ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub vulnerability: Vulnerability,
    pub products: Vec<Product>,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact_statement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_statement: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rfc3339_opt"
    )]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Statement {
    pub fn new(vulnerability: impl Into<String>, status: Status) -> Self {
        Statement {
            vulnerability: Vulnerability {
                name: vulnerability.into(),
                aliases: Vec::new(),
            },
            products: Vec::new(),
            status,
            status_notes: None,
            justification: None,
            impact_statement: None,
            action_statement: None,
            timestamp: None,
        }
    }

    pub fn with_product(mut self, id: impl Into<String>) -> Self {
        self.products.push(Product { id: id.into() });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vulnerability {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "@id")]
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    NotAffected,
    Affected,
    Fixed,
    UnderInvestigation,
}

fn now_secs() -> DateTime<Utc> {
    let now = Utc::now();
    // Whole seconds, so a decoded document re-encodes to the same text.
    DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now)
}

/// Optional timestamps as RFC 3339 strings with a `Z` suffix.
mod rfc3339_opt {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => {
                serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| {
            DateTime::parse_from_rfc3339(&s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(serde::de::Error::custom)
        })
        .transpose()
    }
}
