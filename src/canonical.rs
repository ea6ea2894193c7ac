// canonical.rs — Sorted-key compact JSON for attestation digests
//
// The value is lowered to serde_json::Value and re-serialized through
// `Sorted`, which walks objects in key order. serde_json's compact writer
// supplies the escaping, so strings come out exactly as in the pretty form
// (no HTML escaping) minus the whitespace.

use serde::{Serialize, Serializer};
use serde_json::Value;

/// Serialize a value to canonical JSON bytes.
pub fn canonical_bytes<T: Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
    let value = serde_json::to_value(value)?;
    serde_json::to_vec(&Sorted(&value))
}

/// Canonical text of an already-decoded value.
pub fn canonical_string(value: &Value) -> serde_json::Result<String> {
    serde_json::to_string(&Sorted(value))
}

/// Borrowed view of a `Value` that serializes object members by key.
struct Sorted<'a>(&'a Value);

impl Serialize for Sorted<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Object(map) => {
                let mut members: Vec<(&String, &Value)> = map.iter().collect();
                members.sort_unstable_by(|a, b| a.0.cmp(b.0));
                serializer.collect_map(members.into_iter().map(|(k, v)| (k, Sorted(v))))
            }
            Value::Array(items) => serializer.collect_seq(items.iter().map(Sorted)),
            scalar => scalar.serialize(serializer),
        }
    }
}
