//! Deserializable representation of an annotation or label catalog document.
//!
//! The document is YAML with a single top-level `annotations` or `labels`
//! list. Loading goes through the JSON Schema in `schema/catalog.schema.json`
//! first so shape errors (unknown fields, wrong types, both collections in one
//! file) are reported before typed deserialization.

use crate::collection::CollectionKind;
use crate::schema_loader::CatalogSchema;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
/// One catalog entry exactly as authored; nothing is derived yet.
pub struct EntryRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub variable_name: Option<String>,
    #[serde(default)]
    pub feature_status: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub resources: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
/// Top-level catalog document; only the list matching the collection is read.
pub struct CatalogDocument {
    #[serde(default, deserialize_with = "present_entries")]
    pub annotations: Option<Vec<EntryRecord>>,
    #[serde(default, deserialize_with = "present_entries")]
    pub labels: Option<Vec<EntryRecord>>,
}

/// A key that is present with a null value is an empty list, not a missing one.
fn present_entries<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Vec<EntryRecord>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<Vec<EntryRecord>>::deserialize(deserializer)
        .map(|entries| Some(entries.unwrap_or_default()))
}

impl CatalogDocument {
    /// Take the entries for `kind`, failing when the document describes the
    /// other collection instead.
    pub fn into_entries(self, kind: CollectionKind) -> Result<Vec<EntryRecord>> {
        let selected = match kind {
            CollectionKind::Annotations => self.annotations,
            CollectionKind::Labels => self.labels,
        };
        match selected {
            Some(entries) => Ok(entries),
            None => bail!(
                "catalog document has no top-level '{}' list",
                kind.document_key()
            ),
        }
    }
}

/// Parse YAML catalog text and return the entries of `kind`.
///
/// `origin` names the source (a path or a bundled catalog) in error messages.
pub fn parse_catalog_str(yaml: &str, kind: CollectionKind, origin: &str) -> Result<Vec<EntryRecord>> {
    let value: Value =
        serde_yaml::from_str(yaml).with_context(|| format!("parsing catalog YAML {origin}"))?;
    CatalogSchema::load()?.validate(&value, origin)?;
    let document: CatalogDocument = serde_json::from_value(value)
        .with_context(|| format!("decoding catalog entries from {origin}"))?;
    document
        .into_entries(kind)
        .with_context(|| format!("reading {origin}"))
}

/// Read and parse a catalog document from disk without resolving entries.
pub fn load_catalog_from_path(path: &Path, kind: CollectionKind) -> Result<Vec<EntryRecord>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("unable to read input catalog {}", path.display()))?;
    parse_catalog_str(&data, kind, &path.display().to_string())
}
