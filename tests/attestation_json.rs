//! End-to-end checks of the encoded attestation through the public API.

use serde_json::Value;
use vexattest::vex::{Statement, Status, TYPE_URI};
use vexattest::{Attestation, Error, Subject, STATEMENT_TYPE_V01};

fn encode(att: &Attestation) -> Vec<u8> {
    let mut buf = Vec::new();
    att.to_json(&mut buf).unwrap();
    buf
}

fn top_level_keys(json: &[u8]) -> Vec<String> {
    // Decode into a map that keeps document order.
    let map: serde_json::Map<String, Value> = serde_json::from_slice(json).unwrap();
    let mut keys: Vec<(usize, String)> = map
        .keys()
        .map(|k| {
            let needle = format!("\"{}\":", k);
            let pos = std::str::from_utf8(json).unwrap().find(&needle).unwrap();
            (pos, k.clone())
        })
        .collect();
    keys.sort();
    keys.into_iter().map(|(_, k)| k).collect()
}

#[test]
fn single_subject_example() {
    let mut att: Attestation = Attestation::new();
    att.add_subjects([Subject::new("pkg:a").with_digest("sha256", "abc123")])
        .unwrap();

    let value: Value = serde_json::from_slice(&encode(&att)).unwrap();
    assert_eq!(value["_type"], STATEMENT_TYPE_V01);
    assert_eq!(value["predicateType"], TYPE_URI);
    assert_eq!(
        value["subject"],
        serde_json::json!([{ "name": "pkg:a", "digest": { "sha256": "abc123" } }])
    );
    assert_eq!(value["predicate"]["statements"], serde_json::json!([]));
}

#[test]
fn empty_digest_example() {
    let mut att: Attestation = Attestation::new();
    let before = encode(&att);

    let err = att.add_subjects([Subject::new("pkg:b")]).unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
    assert_eq!(err.to_string(), "subject pkg:b has no digests");
    assert!(att.subjects().is_empty());
    assert_eq!(encode(&att), before);
}

#[test]
fn keys_appear_in_statement_order() {
    let mut att: Attestation = Attestation::new();
    att.add_subjects([Subject::new("pkg:a").with_digest("sha256", "01")])
        .unwrap();
    let json = encode(&att);
    assert_eq!(
        top_level_keys(&json),
        ["_type", "predicateType", "subject", "predicate"]
    );
    assert!(std::str::from_utf8(&json).unwrap().starts_with("{\n  \"_type\""));
}

#[test]
fn decode_and_reencode_preserves_keys_and_subject_order() {
    let mut att: Attestation = Attestation::new();
    att.add_subjects([
        Subject::new("z-last-alphabetically").with_digest("sha256", "01"),
        Subject::new("a-first-alphabetically").with_digest("sha256", "02"),
    ])
    .unwrap();
    att.predicate_mut().statements.push(
        Statement::new("CVE-2024-0001", Status::UnderInvestigation)
            .with_product("z-last-alphabetically"),
    );

    let first = encode(&att);
    let decoded: Attestation = serde_json::from_slice(&first).unwrap();
    let second = encode(&decoded);

    assert_eq!(first, second);
    assert_eq!(top_level_keys(&second), top_level_keys(&first));
    let names: Vec<&str> = decoded.subjects().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["z-last-alphabetically", "a-first-alphabetically"]);
    assert!(decoded.unattested_products().is_empty());
}

#[test]
fn output_is_stable_and_newline_terminated() {
    let mut att: Attestation = Attestation::new();
    att.predicate_mut().author = "R&D <security@example.com>".to_string();

    let a = encode(&att);
    let b = encode(&att);
    assert_eq!(a, b);

    let text = String::from_utf8(a).unwrap();
    assert!(text.ends_with("}\n"));
    assert!(!text.ends_with("\n\n"));
    assert!(text.contains("R&D <security@example.com>"));
    assert!(!text.contains("\\u003c"));
}

#[test]
fn decoding_enforces_subject_digests() {
    let text = r#"{
      "_type": "https://in-toto.io/Statement/v0.1",
      "predicateType": "https://openvex.dev/ns",
      "subject": [
        {"name": "pkg:a", "digest": {"sha256": "01"}},
        {"name": "pkg:b", "digest": {}}
      ],
      "predicate": {"@context": "https://openvex.dev/ns/v0.2.0", "version": 1}
    }"#;
    let err = serde_json::from_str::<Attestation>(text).unwrap_err();
    assert!(err.to_string().contains("subject pkg:b has no digests"), "{err}");

    let bogus_type = text.replace("https://in-toto.io/Statement/v0.1", "bogus");
    assert!(serde_json::from_str::<Attestation>(&bogus_type).is_err());
}
