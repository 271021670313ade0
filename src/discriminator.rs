//! Rewriting of discriminated `oneOf` unions into flattened variants.

use serde_json::{Map, Value};

use crate::error::TransformError;
use crate::reference::schema_ref;
use crate::types::{as_schema_array, is_discriminated_union, title_of, CollisionPolicy};
use crate::variant::{classify, discriminator_value, flatten_composed, VariantKind};

/// Named schemas generated while rewriting unions.
///
/// Names are checked against the document's schema table and against earlier
/// generated schemas. Re-registering identical content under a taken name is
/// not a collision.
#[derive(Debug, Default)]
pub struct SyntheticSchemas {
    policy: CollisionPolicy,
    schemas: Map<String, Value>,
}

impl SyntheticSchemas {
    pub fn new(policy: CollisionPolicy) -> Self {
        Self {
            policy,
            schemas: Map::new(),
        }
    }

    /// Register `schema` under `name` and return the name it was stored under.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::NameCollision` under `CollisionPolicy::Error`
    /// when the name already holds a different schema.
    pub fn register(
        &mut self,
        union: &str,
        name: String,
        schema: Value,
        table: &Map<String, Value>,
    ) -> Result<String, TransformError> {
        let collides = self
            .existing(&name, table)
            .map(|current| *current != schema)
            .unwrap_or(false);

        if collides {
            match self.policy {
                CollisionPolicy::Error => {
                    return Err(TransformError::NameCollision {
                        name,
                        union: union.to_string(),
                    });
                }
                CollisionPolicy::Overwrite => {
                    tracing::warn!("overwriting schema {} generated from {}", name, union);
                }
                CollisionPolicy::Rename => {
                    let renamed = self.free_name(&name, &schema, table);
                    tracing::warn!("schema {} already exists, using {}", name, renamed);
                    self.schemas.insert(renamed.clone(), schema);
                    return Ok(renamed);
                }
            }
        }

        self.schemas.insert(name.clone(), schema);
        Ok(name)
    }

    fn existing<'a>(&'a self, name: &str, table: &'a Map<String, Value>) -> Option<&'a Value> {
        self.schemas.get(name).or_else(|| table.get(name))
    }

    // First `<name>_<n>` that is unused or already holds identical content.
    fn free_name(&self, name: &str, schema: &Value, table: &Map<String, Value>) -> String {
        (2..)
            .map(|n| format!("{}_{}", name, n))
            .find(|candidate| match self.existing(candidate, table) {
                None => true,
                Some(current) => current == schema,
            })
            .unwrap_or_else(|| name.to_string())
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.schemas.keys()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.schemas
    }
}

/// Rewrite one discriminated union.
///
/// Composed variants are flattened and inlined into `oneOf`; every variant
/// with a tag gets a named schema `<name>_<title>` and a discriminator mapping
/// entry. The result keeps only `oneOf`, `discriminator` and `description`.
/// Schemas without both `oneOf` and `discriminator` are returned unchanged.
///
/// # Errors
///
/// Returns `TransformError::NameCollision` when a generated name collides
/// and the collector's policy is `CollisionPolicy::Error`.
pub fn transform_discriminated_schema(
    name: &str,
    schema: &Value,
    schemas: &Map<String, Value>,
    generated: &mut SyntheticSchemas,
) -> Result<Value, TransformError> {
    if !is_discriminated_union(schema) {
        return Ok(schema.clone());
    }
    let variants = as_schema_array(schema, "oneOf").map(Vec::as_slice).unwrap_or_default();
    let property_name = schema["discriminator"]
        .get("propertyName")
        .cloned()
        .unwrap_or(Value::Null);
    let discriminator_prop = property_name.as_str().unwrap_or_default();

    tracing::info!("transforming schema: {}", name);

    let mut one_of = Vec::with_capacity(variants.len());
    let mut mapping = Map::new();

    for (index, variant) in variants.iter().enumerate() {
        match classify(variant) {
            VariantKind::Composed => {
                let Some(flat) = flatten_composed(variant, schemas, discriminator_prop) else {
                    one_of.push(variant.clone());
                    continue;
                };
                let suffix = title_of(variant).unwrap_or(flat.ref_name.as_str());
                let variant_name = format!("{}_{}", name, suffix);
                let stored =
                    generated.register(name, variant_name, flat.schema.clone(), schemas)?;
                tracing::debug!("flattened {}/oneOf/{} into {}", name, index, stored);

                one_of.push(flat.schema);
                if let Some(tag) = flat.tag {
                    mapping.insert(tag, Value::String(schema_ref(&stored)));
                }
            }
            VariantKind::Inline => {
                let tag = discriminator_value(variant, discriminator_prop);
                if let (Some(title), Some(tag)) = (title_of(variant), tag) {
                    let variant_name = format!("{}_{}", name, title);
                    let stored = generated.register(name, variant_name, variant.clone(), schemas)?;
                    tracing::debug!("named inline {}/oneOf/{} as {}", name, index, stored);
                    mapping.insert(tag.to_string(), Value::String(schema_ref(&stored)));
                }
                one_of.push(variant.clone());
            }
            VariantKind::Unrecognized => {
                tracing::warn!(
                    "{}/oneOf/{}: unrecognized variant shape, keeping as-is",
                    name,
                    index
                );
                one_of.push(variant.clone());
            }
        }
    }

    let mut discriminator = Map::new();
    discriminator.insert("propertyName".to_string(), property_name);
    if !mapping.is_empty() {
        discriminator.insert("mapping".to_string(), Value::Object(mapping));
    }

    let mut transformed = Map::new();
    transformed.insert("oneOf".to_string(), Value::Array(one_of));
    transformed.insert("discriminator".to_string(), Value::Object(discriminator));
    if let Some(description) = schema.get("description") {
        transformed.insert("description".to_string(), description.clone());
    }

    Ok(Value::Object(transformed))
}
