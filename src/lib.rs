//! OpenAPI discriminated-union flattener
//!
//! Rewrites OpenAPI 3 documents that describe tagged unions as
//! `oneOf` + `allOf` + `discriminator` (the shape produced for
//! `#[serde(tag = "type")]` enums) into fully inlined variants with an explicit
//! discriminator mapping, which documentation viewers render correctly.
//!
//! # Example
//!
//! ```
//! use openapi_flatten::{transform_document, TransformOptions};
//! use serde_json::json;
//!
//! let document = json!({
//!     "components": {
//!         "schemas": {
//!             "Format": {
//!                 "oneOf": [{
//!                     "allOf": [
//!                         { "$ref": "#/components/schemas/JsonFormat" },
//!                         { "type": "object", "properties": { "type": { "enum": ["json"] } } }
//!                     ],
//!                     "title": "Json"
//!                 }],
//!                 "discriminator": { "propertyName": "type" }
//!             },
//!             "JsonFormat": {
//!                 "type": "object",
//!                 "properties": { "pretty": { "type": "boolean" } }
//!             }
//!         }
//!     }
//! });
//!
//! let out = transform_document(&document, &TransformOptions::default()).unwrap();
//! let schemas = &out.document["components"]["schemas"];
//!
//! assert_eq!(
//!     schemas["Format"]["discriminator"]["mapping"]["json"],
//!     "#/components/schemas/Format_Json"
//! );
//! assert!(schemas["Format_Json"]["properties"].get("pretty").is_some());
//! assert_eq!(out.report.added, 1);
//! ```
//!
//! # Variant shapes
//!
//! | Shape | Recognized by | Output |
//! |-------|---------------|--------|
//! | composed | `allOf` with a `$ref` and inline `properties` | merged object, named `<Union>_<title>` |
//! | inline | object with a `title` | copied as-is, named `<Union>_<title>` |
//! | other | anything else | passed through, warning logged |
//!
//! Single-member `allOf` wrappers around a `$ref` are collapsed everywhere in
//! the document, keeping sibling keys such as `nullable`.

mod discriminator;
mod error;
mod loader;
mod merge;
mod reference;
mod simplify;
mod transform;
mod types;
mod variant;

pub use discriminator::{transform_discriminated_schema, SyntheticSchemas};
pub use error::TransformError;
pub use loader::{load_document, load_document_str, to_pretty_string, write_document};
pub use merge::merge_objects;
pub use reference::{ref_name, resolve_ref, schema_ref};
pub use simplify::simplify_all_of_refs;
pub use transform::{run, transform_document, TransformReport, Transformed};
pub use types::{
    CollisionPolicy, FlattenConfig, TransformOptions, DEFAULT_INPUT, DEFAULT_OUTPUT,
    SCHEMA_REF_PREFIX,
};
pub use variant::{classify, discriminator_value, flatten_composed, FlattenedVariant, VariantKind};
