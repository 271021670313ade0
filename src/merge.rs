//! Overlay merging of schema fragments.

use serde_json::{Map, Value};

/// Merge `overlay` onto `base`, returning a new schema.
///
/// Overlay keys replace base keys wholesale, except:
/// - `properties`: when both sides are objects, the maps are unioned
///   (overlay entries win on name collision).
/// - `required`: when both sides are arrays, the result is the ordered
///   union of both, without duplicates.
///
/// A non-object base is treated as `{}`; a non-object overlay is ignored.
pub fn merge_objects(base: &Value, overlay: &Value) -> Value {
    let mut result = base.as_object().cloned().unwrap_or_default();

    let Some(overlay) = overlay.as_object() else {
        return Value::Object(result);
    };

    for (key, value) in overlay {
        let merged = match (key.as_str(), result.get(key), value) {
            ("properties", Some(Value::Object(existing)), Value::Object(extra)) => {
                Value::Object(merge_properties(existing, extra))
            }
            ("required", Some(Value::Array(existing)), Value::Array(extra)) => {
                Value::Array(merge_required(existing, extra))
            }
            _ => value.clone(),
        };
        result.insert(key.clone(), merged);
    }

    Value::Object(result)
}

fn merge_properties(base: &Map<String, Value>, overlay: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = base.clone();
    for (name, schema) in overlay {
        merged.insert(name.clone(), schema.clone());
    }
    merged
}

fn merge_required(base: &[Value], overlay: &[Value]) -> Vec<Value> {
    let mut merged: Vec<Value> = Vec::with_capacity(base.len() + overlay.len());
    for name in base.iter().chain(overlay) {
        if !merged.contains(name) {
            merged.push(name.clone());
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn overlay_wins_for_plain_keys() {
        let base = json!({ "type": "object", "title": "Base", "description": "d" });
        let overlay = json!({ "title": "Overlay" });
        let merged = merge_objects(&base, &overlay);
        assert_eq!(
            merged,
            json!({ "type": "object", "title": "Overlay", "description": "d" })
        );
    }

    #[test]
    fn properties_are_unioned() {
        let base = json!({ "properties": { "a": { "type": "string" }, "b": { "type": "string" } } });
        let overlay = json!({ "properties": { "b": { "type": "integer" }, "c": { "type": "boolean" } } });
        let merged = merge_objects(&base, &overlay);
        assert_eq!(
            merged["properties"],
            json!({
                "a": { "type": "string" },
                "b": { "type": "integer" },
                "c": { "type": "boolean" }
            })
        );
    }

    #[test]
    fn required_is_ordered_set_union() {
        let base = json!({ "required": ["a", "b"] });
        let overlay = json!({ "required": ["b", "type"] });
        let merged = merge_objects(&base, &overlay);
        assert_eq!(merged["required"], json!(["a", "b", "type"]));
    }

    #[test]
    fn required_only_on_overlay_is_copied() {
        let merged = merge_objects(&json!({}), &json!({ "required": ["type"] }));
        assert_eq!(merged["required"], json!(["type"]));
    }

    #[test]
    fn nested_keys_are_not_deep_merged() {
        let base = json!({ "items": { "type": "string", "format": "uuid" } });
        let overlay = json!({ "items": { "type": "integer" } });
        let merged = merge_objects(&base, &overlay);
        assert_eq!(merged["items"], json!({ "type": "integer" }));
    }

    #[test]
    fn base_is_not_mutated() {
        let base = json!({ "properties": { "a": { "type": "string" } } });
        let snapshot = base.clone();
        let _ = merge_objects(&base, &json!({ "properties": { "b": {} } }));
        assert_eq!(base, snapshot);
    }

    #[test]
    fn non_object_inputs() {
        assert_eq!(merge_objects(&json!(true), &json!({ "a": 1 })), json!({ "a": 1 }));
        assert_eq!(merge_objects(&json!({ "a": 1 }), &json!(null)), json!({ "a": 1 }));
    }
}
