//! Core types and JSON accessors for schema flattening.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Prefix of a local reference into the document's schema table.
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Input path used when none is given.
pub const DEFAULT_INPUT: &str = "api-spec.json";

/// Output path used when none is given.
pub const DEFAULT_OUTPUT: &str = "public/api-spec.json";

/// Returns the `$ref` string of a schema node, if any.
pub fn ref_of(value: &Value) -> Option<&str> {
    value.get("$ref").and_then(Value::as_str)
}

/// Returns the string `title` of a schema node, if any.
pub fn title_of(value: &Value) -> Option<&str> {
    value.get("title").and_then(Value::as_str)
}

/// Returns `key` as an array of schemas, if present and an array.
pub fn as_schema_array<'a>(value: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    value.get(key).and_then(Value::as_array)
}

/// Whether a schema is a discriminated union (`oneOf` array plus `discriminator` object).
pub fn is_discriminated_union(schema: &Value) -> bool {
    as_schema_array(schema, "oneOf").is_some()
        && schema
            .get("discriminator")
            .map(Value::is_object)
            .unwrap_or(false)
}

/// What to do when a generated schema name is already taken by a different schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Abort the transformation.
    #[default]
    Error,
    /// Append `_2`, `_3`, ... until the name is free.
    Rename,
    /// Replace the existing schema (last write wins).
    Overwrite,
}

impl CollisionPolicy {
    /// Parse a policy name.
    ///
    /// Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "error" => Some(CollisionPolicy::Error),
            "rename" => Some(CollisionPolicy::Rename),
            "overwrite" => Some(CollisionPolicy::Overwrite),
            _ => None,
        }
    }
}

/// Options for the in-memory transformation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformOptions {
    pub on_collision: CollisionPolicy,
}

impl TransformOptions {
    pub fn new(on_collision: CollisionPolicy) -> Self {
        Self { on_collision }
    }
}

/// Configuration for a full load/transform/store run.
#[derive(Debug, Clone)]
pub struct FlattenConfig {
    /// Document to read.
    pub input: PathBuf,
    /// Where the flattened document is written. Parent directories are created.
    pub output: PathBuf,
    /// Handling of synthetic schema name collisions.
    pub on_collision: CollisionPolicy,
}

impl Default for FlattenConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            on_collision: CollisionPolicy::default(),
        }
    }
}

impl FlattenConfig {
    /// Set the input path.
    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = input.into();
        self
    }

    /// Set the output path.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Set the collision policy.
    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.on_collision = policy;
        self
    }

    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions::new(self.on_collision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accessors_read_strings_only() {
        let schema = json!({ "$ref": "#/components/schemas/X", "title": 3 });
        assert_eq!(ref_of(&schema), Some("#/components/schemas/X"));
        assert_eq!(title_of(&schema), None);
        assert!(as_schema_array(&schema, "allOf").is_none());
    }

    #[test]
    fn union_detection_requires_both_keys() {
        assert!(is_discriminated_union(
            &json!({ "oneOf": [], "discriminator": { "propertyName": "type" } })
        ));
        assert!(!is_discriminated_union(&json!({ "oneOf": [] })));
        assert!(!is_discriminated_union(
            &json!({ "discriminator": { "propertyName": "type" } })
        ));
        assert!(!is_discriminated_union(
            &json!({ "oneOf": {}, "discriminator": { "propertyName": "type" } })
        ));
    }

    #[test]
    fn collision_policy_parse() {
        assert_eq!(CollisionPolicy::parse("error"), Some(CollisionPolicy::Error));
        assert_eq!(CollisionPolicy::parse("rename"), Some(CollisionPolicy::Rename));
        assert_eq!(
            CollisionPolicy::parse("overwrite"),
            Some(CollisionPolicy::Overwrite)
        );
        assert_eq!(CollisionPolicy::parse("merge"), None);
    }

    #[test]
    fn default_config_uses_fixed_paths() {
        let config = FlattenConfig::default();
        assert_eq!(config.input, PathBuf::from("api-spec.json"));
        assert_eq!(config.output, PathBuf::from("public/api-spec.json"));
        assert_eq!(config.on_collision, CollisionPolicy::Error);

        let config = config
            .with_input("in.json")
            .with_output("out/out.json")
            .with_collision_policy(CollisionPolicy::Rename);
        assert_eq!(config.input, PathBuf::from("in.json"));
        assert_eq!(config.transform_options().on_collision, CollisionPolicy::Rename);
    }
}
