//! JSON Schema gate for catalog documents.
//!
//! The schema ships inside the binary (`schema/catalog.schema.json`) and is
//! parsed once per process. Catalog YAML is converted to a JSON value and
//! checked here before it is deserialized into typed records, so authors get
//! every shape violation with its document path in one report.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::sync::OnceLock;

const CATALOG_SCHEMA: &str = include_str!("../schema/catalog.schema.json");

/// Compiled catalog schema ready to validate documents.
pub(crate) struct CatalogSchema {
    compiled: JSONSchema,
}

impl CatalogSchema {
    pub(crate) fn load() -> Result<Self> {
        let raw = schema_value()?;
        let compiled = JSONSchema::compile(raw)
            .map_err(|err| anyhow!("compiling embedded catalog schema: {err}"))?;
        Ok(Self { compiled })
    }

    /// Validate `document`, collecting every violation into a single error.
    pub(crate) fn validate(&self, document: &Value, origin: &str) -> Result<()> {
        if let Err(errors) = self.compiled.validate(document) {
            let details = errors
                .map(|err| format!("{}: {err}", display_pointer(&err.instance_path.to_string())))
                .collect::<Vec<_>>()
                .join("\n");
            bail!("catalog {origin} failed schema validation:\n{details}");
        }
        Ok(())
    }
}

// The compiled validator borrows its schema for 'static, so the parsed value
// lives in a process-wide cell.
fn schema_value() -> Result<&'static Value> {
    static SCHEMA: OnceLock<Value> = OnceLock::new();
    if let Some(value) = SCHEMA.get() {
        return Ok(value);
    }
    let parsed: Value =
        serde_json::from_str(CATALOG_SCHEMA).context("parsing embedded catalog schema")?;
    Ok(SCHEMA.get_or_init(|| parsed))
}

fn display_pointer(pointer: &str) -> &str {
    if pointer.is_empty() { "/" } else { pointer }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(document: Value) -> Result<()> {
        CatalogSchema::load()?.validate(&document, "test")
    }

    #[test]
    fn accepts_minimal_documents() {
        check(json!({"annotations": []})).unwrap();
        check(json!({"labels": [{"name": "example.io/tier"}]})).unwrap();
        check(json!({"labels": null})).unwrap();
    }

    #[test]
    fn rejects_both_collections_in_one_document() {
        let err = check(json!({"annotations": [], "labels": []})).unwrap_err();
        assert!(err.to_string().contains("failed schema validation"));
    }

    #[test]
    fn rejects_unknown_fields_and_wrong_types() {
        let err = check(json!({"annotations": [{"name": "a.io/b", "hiden": true}]})).unwrap_err();
        assert!(err.to_string().contains("/annotations/0"));

        let err = check(json!({"annotations": [{"name": "a.io/b", "hidden": "yes"}]})).unwrap_err();
        assert!(err.to_string().contains("/annotations/0/hidden"));
    }

    #[test]
    fn rejects_entries_without_a_name() {
        assert!(check(json!({"labels": [{"description": "orphan"}]})).is_err());
    }

    #[test]
    fn rejects_non_object_documents() {
        assert!(check(Value::Null).is_err());
        assert!(check(json!(["annotations"])).is_err());
    }
}
