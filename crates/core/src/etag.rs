//! Strong entity-tag computation.
//!
//! A resource's tag is the SHA-256 hex digest of its canonical JSON form:
//! object keys sorted lexicographically, no insignificant whitespace, null
//! members dropped. chrono serializes timestamps as RFC 3339 UTC with a
//! trailing `Z`, so byte-identical field values always hash identically.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::CoreError;

/// Compute the strong ETag for a resource representation.
///
/// Returns the quoted lowercase hex digest, e.g. `"c0ffee..."`. Pure: the
/// same field values yield the same tag on every call, and any single field
/// difference (timestamp precision included) changes the tag.
pub fn compute<T: Serialize>(resource: &T) -> Result<String, CoreError> {
    let value = serde_json::to_value(resource)
        .map_err(|e| CoreError::Internal(format!("entity tag serialization failed: {e}")))?;
    let canonical = serde_json::to_string(&canonicalize(value))
        .map_err(|e| CoreError::Internal(format!("entity tag serialization failed: {e}")))?;
    Ok(format!("\"{}\"", sha256_hex(canonical.as_bytes())))
}

/// Compute a SHA-256 hex digest of the given bytes.
fn sha256_hex(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("{hash:x}")
}

/// Rewrite a JSON value into canonical shape: object members with null
/// values are removed and the remaining keys re-inserted in sorted order,
/// so compact serialization is deterministic regardless of how the source
/// map preserves insertion order.
fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<String, Value> = map
                .into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, canonicalize(v)))
                .collect();
            let mut out = serde_json::Map::with_capacity(sorted.len());
            for (k, v) in sorted {
                out.insert(k, v);
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde::Serialize;
    use serde_json::json;

    use super::*;
    use crate::types::Timestamp;

    #[derive(Serialize)]
    struct Resource {
        id: i64,
        name: String,
        created_by: Option<i64>,
        updated_at: Timestamp,
    }

    fn resource() -> Resource {
        Resource {
            id: 7,
            name: "Odeon".to_string(),
            created_by: None,
            updated_at: Utc.with_ymd_and_hms(2025, 1, 16, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn empty_input_produces_known_hash() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn identical_field_sets_produce_identical_tags() {
        let a = compute(&resource()).unwrap();
        let b = compute(&resource()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn any_field_change_changes_the_tag() {
        let base = compute(&resource()).unwrap();

        let mut renamed = resource();
        renamed.name = "Rialto".to_string();
        assert_ne!(compute(&renamed).unwrap(), base);

        let mut touched = resource();
        touched.updated_at = Utc.with_ymd_and_hms(2025, 1, 16, 12, 0, 1).unwrap();
        assert_ne!(compute(&touched).unwrap(), base);
    }

    #[test]
    fn tag_is_a_quoted_sha256_hex_digest() {
        let tag = compute(&resource()).unwrap();
        assert_eq!(tag.len(), 66, "64 hex chars plus two quotes");
        assert!(tag.starts_with('"') && tag.ends_with('"'));
        assert!(tag[1..65].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn null_members_do_not_affect_the_tag() {
        let with_null = compute(&json!({"a": 1, "b": null})).unwrap();
        let without = compute(&json!({"a": 1})).unwrap();
        assert_eq!(with_null, without);
    }

    #[test]
    fn key_order_does_not_affect_the_tag() {
        let ab = compute(&json!({"a": 1, "b": "x"})).unwrap();
        let ba = compute(&json!({"b": "x", "a": 1})).unwrap();
        assert_eq!(ab, ba);
    }

    #[test]
    fn canonical_form_is_sorted_and_compact() {
        let value = serde_json::to_value(json!({"b": {"z": 1, "a": null}, "a": [1, 2]})).unwrap();
        let canonical = serde_json::to_string(&canonicalize(value)).unwrap();
        assert_eq!(canonical, r#"{"a":[1,2],"b":{"z":1}}"#);
    }

    #[test]
    fn timestamps_render_with_trailing_z() {
        let value = serde_json::to_value(resource()).unwrap();
        assert_eq!(value["updated_at"], "2025-01-16T12:00:00Z");
    }
}
