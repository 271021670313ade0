//! Collapsing of single-reference `allOf` wrappers.
//!
//! utoipa wraps nullable references as
//! `{ "allOf": [{ "$ref": "..." }], "nullable": true }`; documentation viewers
//! render `{ "$ref": "...", "nullable": true }` much better.

use serde_json::{Map, Value};

use crate::types::ref_of;

/// Recursively replace every `{ allOf: [{ $ref }], ... }` with `{ $ref, ... }`.
///
/// Sibling keys of `allOf` are kept. Wrappers with more than one member, or
/// whose single member has no `$ref`, are left alone. Idempotent.
pub fn simplify_all_of_refs(value: &mut Value) {
    match value {
        Value::Object(map) => {
            // Children first, so a wrapper around a wrapper collapses in one pass.
            for child in map.values_mut() {
                simplify_all_of_refs(child);
            }
            if let Some(simplified) = simplify_wrapper(map) {
                *map = simplified;
            }
        }
        Value::Array(items) => {
            for item in items {
                simplify_all_of_refs(item);
            }
        }
        _ => {}
    }
}

fn simplify_wrapper(map: &Map<String, Value>) -> Option<Map<String, Value>> {
    let reference = match map.get("allOf")?.as_array()?.as_slice() {
        [single] => ref_of(single)?,
        _ => return None,
    };

    let mut simplified = Map::new();
    simplified.insert("$ref".to_string(), Value::String(reference.to_string()));
    for (key, value) in map {
        if key != "allOf" {
            simplified.insert(key.clone(), value.clone());
        }
    }
    Some(simplified)
}
