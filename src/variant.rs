//! Classification and flattening of individual `oneOf` variants.

use serde_json::{Map, Value};

use crate::merge::merge_objects;
use crate::reference::{ref_name, resolve_ref};
use crate::types::{as_schema_array, ref_of, title_of};

/// Shape of a `oneOf` member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantKind {
    /// `allOf` combining a `$ref` with inline `properties`.
    Composed,
    /// A self-contained object schema with a `title`.
    Inline,
    /// Anything else; passed through untouched.
    Unrecognized,
}

/// Classify a `oneOf` member.
pub fn classify(variant: &Value) -> VariantKind {
    if let Some(all_of) = as_schema_array(variant, "allOf") {
        let has_ref = all_of.iter().any(|item| ref_of(item).is_some());
        let has_properties = all_of.iter().any(|item| item.get("properties").is_some());
        if has_ref && has_properties {
            return VariantKind::Composed;
        }
        return VariantKind::Unrecognized;
    }

    if variant.is_object() && title_of(variant).is_some() {
        VariantKind::Inline
    } else {
        VariantKind::Unrecognized
    }
}

/// Tag value of a variant fragment: `properties.<prop>.enum` with exactly one string.
pub fn discriminator_value<'a>(schema: &'a Value, property: &str) -> Option<&'a str> {
    let values = schema
        .get("properties")?
        .get(property)?
        .get("enum")?
        .as_array()?;
    match values.as_slice() {
        [Value::String(tag)] => Some(tag.as_str()),
        _ => None,
    }
}

/// A composed variant merged into a single object schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FlattenedVariant {
    /// Referenced schema overlaid with the inline fragments.
    pub schema: Value,
    /// Discriminator tag found in the inline fragments.
    pub tag: Option<String>,
    /// Name of the referenced schema, used when the variant has no title.
    pub ref_name: String,
}

/// Flatten a composed variant.
///
/// Returns `None` when the variant has no `allOf` reference or the reference
/// can't be resolved against `schemas`; the caller keeps the original variant.
pub fn flatten_composed(
    variant: &Value,
    schemas: &Map<String, Value>,
    discriminator_prop: &str,
) -> Option<FlattenedVariant> {
    let all_of = as_schema_array(variant, "allOf")?;

    let reference = all_of.iter().find_map(ref_of)?;
    let inline_items: Vec<&Value> = all_of.iter().filter(|item| ref_of(item).is_none()).collect();

    let Some(target) = resolve_ref(schemas, reference) else {
        tracing::warn!("could not resolve ref: {}", reference);
        return None;
    };

    let mut schema = target.clone();
    for item in &inline_items {
        schema = merge_objects(&schema, item);
    }

    if let (Some(title), Value::Object(map)) = (variant.get("title"), &mut schema) {
        map.insert("title".to_string(), title.clone());
    }

    let tag = inline_items
        .iter()
        .find_map(|item| discriminator_value(item, discriminator_prop))
        .map(String::from);

    Some(FlattenedVariant {
        schema,
        tag,
        ref_name: ref_name(reference).to_string(),
    })
}
