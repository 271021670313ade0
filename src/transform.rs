//! Whole-document transformation and the load/transform/store run.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::discriminator::{transform_discriminated_schema, SyntheticSchemas};
use crate::error::TransformError;
use crate::loader::{load_document, write_document};
use crate::simplify::simplify_all_of_refs;
use crate::types::{is_discriminated_union, FlattenConfig, TransformOptions};

/// Summary of one transformation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransformReport {
    /// Union schemas that were rewritten, in table order.
    pub transformed: Vec<String>,
    /// Names of the generated variant schemas, in generation order.
    pub synthesized: Vec<String>,
    /// Output schema count minus input schema count.
    pub added: usize,
}

/// A transformed document with its report.
#[derive(Debug, Clone)]
pub struct Transformed {
    pub document: Value,
    pub report: TransformReport,
}

/// Flatten every discriminated union in `components.schemas`.
///
/// The input is not modified. Steps, in order: rewrite each union (references
/// resolve against the table as it is being rewritten), add the generated
/// variant schemas, collapse single-reference `allOf` wrappers across the whole
/// document, and sort the schema table by name. A document without
/// `components.schemas` is only simplified.
///
/// # Errors
///
/// Returns `TransformError::NameCollision` when a generated schema name is
/// taken and `options.on_collision` is `CollisionPolicy::Error`.
pub fn transform_document(
    document: &Value,
    options: &TransformOptions,
) -> Result<Transformed, TransformError> {
    let mut result = document.clone();
    let mut report = TransformReport::default();

    if let Some(schemas) = schema_table_mut(&mut result) {
        let original_count = schemas.len();
        let mut generated = SyntheticSchemas::new(options.on_collision);

        let unions: Vec<String> = schemas
            .iter()
            .filter(|(_, schema)| is_discriminated_union(schema))
            .map(|(name, _)| name.clone())
            .collect();

        for name in &unions {
            let Some(schema) = schemas.get(name) else {
                continue;
            };
            let rewritten = transform_discriminated_schema(name, schema, schemas, &mut generated)?;
            schemas.insert(name.clone(), rewritten);
        }

        report.transformed = unions;
        report.synthesized = generated.names().cloned().collect();
        for (name, schema) in generated.into_inner() {
            schemas.insert(name, schema);
        }
        report.added = schemas.len().saturating_sub(original_count);
    }

    tracing::info!("simplifying allOf wrappers");
    simplify_all_of_refs(&mut result);

    if let Some(schemas) = schema_table_mut(&mut result) {
        sort_by_name(schemas);
    }

    Ok(Transformed {
        document: result,
        report,
    })
}

/// Load `config.input`, transform it, and write `config.output`.
///
/// Nothing is written if loading or transforming fails.
///
/// # Errors
///
/// Returns `TransformError` for missing or invalid input, name collisions
/// (see [`transform_document`]) and write failures.
pub fn run(config: &FlattenConfig) -> Result<TransformReport, TransformError> {
    tracing::info!("reading: {}", config.input.display());
    let document = load_document(&config.input)?;

    tracing::info!("transforming OpenAPI document");
    let Transformed { document, report } =
        transform_document(&document, &config.transform_options())?;

    tracing::info!("writing: {}", config.output.display());
    write_document(&config.output, &document)?;

    Ok(report)
}

fn schema_table_mut(document: &mut Value) -> Option<&mut Map<String, Value>> {
    document
        .get_mut("components")?
        .get_mut("schemas")?
        .as_object_mut()
}

fn sort_by_name(schemas: &mut Map<String, Value>) {
    let mut entries: Vec<(String, Value)> = std::mem::take(schemas).into_iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));
    schemas.extend(entries);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CollisionPolicy;
    use serde_json::json;

    fn schema_names(document: &Value) -> Vec<String> {
        document["components"]["schemas"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect()
    }

    #[test]
    fn sorts_schema_table() {
        let doc = json!({
            "components": { "schemas": { "b": {}, "C": {}, "a": {} } }
        });
        let out = transform_document(&doc, &TransformOptions::default()).unwrap();
        assert_eq!(schema_names(&out.document), ["C", "a", "b"]);
        assert_eq!(out.report.added, 0);
    }

    #[test]
    fn input_is_not_modified() {
        let doc = json!({
            "components": {
                "schemas": {
                    "U": {
                        "oneOf": [{ "type": "object", "title": "A", "properties": { "k": { "enum": ["a"] } } }],
                        "discriminator": { "propertyName": "k" }
                    }
                }
            }
        });
        let snapshot = doc.clone();
        let out = transform_document(&doc, &TransformOptions::default()).unwrap();
        assert_eq!(doc, snapshot);
        assert_eq!(out.report.synthesized, ["U_A"]);
        assert_eq!(out.report.added, 1);
    }

    #[test]
    fn document_without_schemas_is_only_simplified() {
        let doc = json!({
            "paths": {
                "/x": { "get": { "responses": { "200": {
                    "content": { "application/json": { "schema": {
                        "allOf": [{ "$ref": "#/components/schemas/X" }]
                    } } }
                } } } }
            }
        });
        let out = transform_document(&doc, &TransformOptions::default()).unwrap();
        assert_eq!(
            out.document["paths"]["/x"]["get"]["responses"]["200"]["content"]["application/json"]["schema"],
            json!({ "$ref": "#/components/schemas/X" })
        );
        assert!(out.document.get("components").is_none());
        assert_eq!(out.report, TransformReport::default());
    }

    #[test]
    fn collision_with_existing_schema_fails() {
        let doc = json!({
            "components": {
                "schemas": {
                    "U_A": { "type": "string" },
                    "U": {
                        "oneOf": [{ "type": "object", "title": "A", "properties": { "k": { "enum": ["a"] } } }],
                        "discriminator": { "propertyName": "k" }
                    }
                }
            }
        });
        let result = transform_document(&doc, &TransformOptions::new(CollisionPolicy::Error));
        assert!(matches!(result, Err(TransformError::NameCollision { .. })));

        let out = transform_document(&doc, &TransformOptions::new(CollisionPolicy::Rename)).unwrap();
        assert_eq!(schema_names(&out.document), ["U", "U_A", "U_A_2"]);
        assert_eq!(out.report.added, 1);
    }
}
