//! Local `$ref` resolution against `components.schemas`.

use serde_json::{Map, Value};

use crate::types::SCHEMA_REF_PREFIX;

/// Look up a local schema reference in the schema table.
///
/// Returns `None` when the reference isn't of the form
/// `#/components/schemas/<name>` or the name isn't in the table.
/// References are followed exactly one level.
pub fn resolve_ref<'a>(schemas: &'a Map<String, Value>, reference: &str) -> Option<&'a Value> {
    let name = reference.strip_prefix(SCHEMA_REF_PREFIX)?;
    schemas.get(name)
}

/// Schema name a reference points to (the reference itself if it isn't local).
pub fn ref_name(reference: &str) -> &str {
    reference
        .strip_prefix(SCHEMA_REF_PREFIX)
        .unwrap_or(reference)
}

/// Build a local reference to a named schema.
pub fn schema_ref(name: &str) -> String {
    format!("{}{}", SCHEMA_REF_PREFIX, name)
}
