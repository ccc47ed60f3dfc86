//! Test helpers shared by the resource modules.

use pretty_assertions::assert_eq;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Decodes `raw`, re-encodes it and checks every key of `raw` comes back
/// with the same value, explicit nulls included. Keys absent from `raw`
/// may only come back as `null`.
pub(crate) fn assert_round_trip<T: DeserializeOwned + Serialize>(raw: &Value) -> T {
    let decoded: T = serde_json::from_value(raw.clone()).unwrap();
    let encoded = serde_json::to_value(&decoded).unwrap();
    assert_eq!(strip_unset(&encoded, raw), *raw);
    decoded
}

fn strip_unset(encoded: &Value, raw: &Value) -> Value {
    match (encoded, raw) {
        (Value::Object(out), Value::Object(expected)) => out
            .iter()
            .filter(|(key, value)| expected.contains_key(*key) || !value.is_null())
            .map(|(key, value)| {
                let value = match expected.get(key) {
                    Some(raw) => strip_unset(value, raw),
                    None => value.clone(),
                };
                (key.clone(), value)
            })
            .collect(),
        (Value::Array(out), Value::Array(expected)) if out.len() == expected.len() => out
            .iter()
            .zip(expected)
            .map(|(value, raw)| strip_unset(value, raw))
            .collect(),
        _ => encoded.clone(),
    }
}

#[test]
fn test_strip_unset_keeps_explicit_nulls() {
    let raw = serde_json::json!({"a": null, "b": [{"c": 1}]});
    let encoded = serde_json::json!({"a": null, "b": [{"c": 1, "d": null}], "e": null});
    assert_eq!(strip_unset(&encoded, &raw), raw);
}
