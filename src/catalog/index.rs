//! Resolved, ordered view of a catalog.
//!
//! The index turns raw records into entries with identifiers and maturities,
//! builds the resource type registry, and sorts entries by key. It is strict
//! about empty keys, malformed keys, duplicate keys, colliding identifiers
//! and names that clash with the symbols every listing declares, so the
//! renderers never see ambiguous input.

use crate::catalog::identity::{
    DEFAULT_DOMAIN_SUFFIX, Identifier, Maturity, MetadataKey, resolve_identifier,
    resolve_maturity,
};
use crate::catalog::model::{EntryRecord, load_catalog_from_path, parse_catalog_str};
use crate::catalog::registry::{TypeRegistry, UNKNOWN_RESOURCE_TYPE};
use crate::collection::CollectionKind;
use anyhow::{Context, Result, bail};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{debug, info, warn};

/// Type, constant and function names every listing declares at package scope.
const LISTING_SYMBOLS: [&str; 8] = [
    UNKNOWN_RESOURCE_TYPE,
    "Alpha",
    "Beta",
    "Stable",
    "FeatureStatus",
    "ResourceTypes",
    "Instance",
    "AllResourceTypes",
];

#[derive(Clone, Debug, Eq, PartialEq)]
/// Knobs that influence how records are resolved into entries.
pub struct ResolveOptions {
    /// Suffix removed from key namespaces before deriving identifiers.
    pub domain_suffix: String,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            domain_suffix: DEFAULT_DOMAIN_SUFFIX.to_string(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
/// A catalog entry with every derived field filled in.
pub struct Entry {
    pub key: MetadataKey,
    pub identifier: Identifier,
    pub maturity: Maturity,
    pub description: String,
    pub hidden: bool,
    pub deprecated: bool,
    /// Resource tags in authored order with repeats removed.
    pub resources: Vec<String>,
}

#[derive(Clone, Debug)]
/// Entries sorted by key plus the registry of resource types they reference.
pub struct CatalogIndex {
    collection: CollectionKind,
    entries: Vec<Entry>,
    registry: TypeRegistry,
    by_key: BTreeMap<String, usize>,
}

impl CatalogIndex {
    /// Load a catalog document from disk and resolve it.
    pub fn load(path: &Path, kind: CollectionKind, options: &ResolveOptions) -> Result<Self> {
        let records = load_catalog_from_path(path, kind)?;
        Self::build(kind, records, options)
            .with_context(|| format!("validating catalog {}", path.display()))
    }

    /// Parse catalog YAML held in memory and resolve it.
    pub fn from_yaml(
        yaml: &str,
        kind: CollectionKind,
        options: &ResolveOptions,
        origin: &str,
    ) -> Result<Self> {
        let records = parse_catalog_str(yaml, kind, origin)?;
        Self::build(kind, records, options).with_context(|| format!("validating catalog {origin}"))
    }

    /// Resolve raw records into an ordered index.
    ///
    /// Records are validated in input order so error messages point at the
    /// authored position of the offending entry.
    pub fn build(
        kind: CollectionKind,
        records: Vec<EntryRecord>,
        options: &ResolveOptions,
    ) -> Result<Self> {
        let mut seen_keys: BTreeMap<String, usize> = BTreeMap::new();
        let mut seen_identifiers: BTreeMap<String, usize> = BTreeMap::new();
        let mut entries = Vec::with_capacity(records.len());

        for (idx, record) in records.into_iter().enumerate() {
            if record.name.is_empty() {
                bail!("entry {idx} is missing name");
            }
            let key = MetadataKey::parse(&record.name)
                .with_context(|| format!("entry {idx}: invalid name"))?;
            if let Some(previous) = seen_keys.insert(key.as_str().to_string(), idx) {
                bail!("entry {idx}: duplicate name '{key}' (first defined by entry {previous})");
            }

            let identifier = resolve_identifier(
                &key,
                record.variable_name.as_deref(),
                &options.domain_suffix,
            );
            if is_listing_symbol(identifier.as_str(), kind) {
                bail!(
                    "entry {idx} ('{key}'): identifier '{identifier}' clashes with a generated symbol; set variableName to rename it"
                );
            }
            if let Some(previous) = seen_identifiers.insert(identifier.as_str().to_string(), idx) {
                bail!(
                    "entry {idx} ('{key}'): identifier '{identifier}' collides with entry {previous}; set variableName to disambiguate"
                );
            }

            let maturity = resolve_maturity(&key, record.feature_status.as_deref())
                .with_context(|| format!("entry {idx} ('{key}'): invalid featureStatus"))?;
            debug!(%key, %identifier, %maturity, "resolved catalog entry");

            let resources = dedupe_preserving_order(record.resources);
            if let Some(tag) = resources.iter().find(|tag| is_listing_symbol(tag, kind)) {
                bail!("entry {idx} ('{key}'): resource '{tag}' clashes with a generated symbol");
            }
            if resources.is_empty() {
                warn!(%key, "catalog entry does not reference any resource type");
            }

            entries.push(Entry {
                key,
                identifier,
                maturity,
                description: record.description,
                hidden: record.hidden,
                deprecated: record.deprecated,
                resources,
            });
        }

        for (idx, entry) in entries.iter().enumerate() {
            for tag in &entry.resources {
                if let Some(owner) = seen_identifiers.get(tag.as_str()) {
                    bail!(
                        "entry {idx} ('{key}'): resource '{tag}' clashes with the identifier of entry {owner}",
                        key = entry.key
                    );
                }
            }
        }

        let registry = TypeRegistry::from_entries(&entries);
        entries.sort_by(|a, b| a.key.as_str().as_bytes().cmp(b.key.as_str().as_bytes()));
        let by_key = entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| (entry.key.as_str().to_string(), idx))
            .collect();

        info!(
            collection = kind.document_key(),
            entries = entries.len(),
            resource_types = registry.len(),
            "catalog resolved"
        );

        Ok(Self {
            collection: kind,
            entries,
            registry,
            by_key,
        })
    }

    pub fn collection(&self) -> CollectionKind {
        self.collection
    }

    /// Entries in ascending byte-wise key order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Resolve an entry by its full key.
    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.by_key.get(key).map(|idx| &self.entries[*idx])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_listing_symbol(name: &str, kind: CollectionKind) -> bool {
    LISTING_SYMBOLS.contains(&name)
        || name
            .strip_prefix("AllResource")
            .is_some_and(|rest| rest == kind.meta().name_plural)
}

fn dedupe_preserving_order(tags: Vec<String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    tags.into_iter()
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, resources: &[&str]) -> EntryRecord {
        EntryRecord {
            name: name.to_string(),
            resources: resources.iter().map(|r| r.to_string()).collect(),
            ..Default::default()
        }
    }

    fn build(records: Vec<EntryRecord>) -> Result<CatalogIndex> {
        CatalogIndex::build(CollectionKind::Annotations, records, &ResolveOptions::default())
    }

    #[test]
    fn sorts_entries_by_key_bytes() {
        let index = build(vec![
            record("vink.kubevm.io/zeta", &[]),
            record("Vink.kubevm.io/upper", &[]),
            record("cdi.kubevirt.io/alpha", &[]),
        ])
        .unwrap();
        let keys: Vec<_> = index.entries().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["Vink.kubevm.io/upper", "cdi.kubevirt.io/alpha", "vink.kubevm.io/zeta"]
        );
        assert_eq!(
            index.entry("cdi.kubevirt.io/alpha").map(|e| e.identifier.as_str()),
            Some("IoKubevirtCdiAlpha")
        );
    }

    #[test]
    fn registry_spans_all_entries() {
        let index = build(vec![
            record("a.io/one", &["VirtualMachineInstance"]),
            record("a.io/two", &["DataVolume", "DataVolume"]),
        ])
        .unwrap();
        assert_eq!(
            index.registry().names(),
            ["DataVolume", "VirtualMachineInstance"]
        );
        assert_eq!(index.entry("a.io/two").unwrap().resources, vec!["DataVolume"]);
    }

    #[test]
    fn rejects_empty_names_with_entry_index() {
        let err = build(vec![record("a.io/one", &[]), record("", &[])]).unwrap_err();
        assert_eq!(err.to_string(), "entry 1 is missing name");
    }

    #[test]
    fn rejects_malformed_keys() {
        let err = build(vec![record("no-separator", &[])]).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("entry 0"), "{message}");
        assert!(message.contains("exactly one '/'"), "{message}");
    }

    #[test]
    fn rejects_duplicate_keys() {
        let err = build(vec![record("a.io/one", &[]), record("a.io/one", &[])]).unwrap_err();
        assert!(err.to_string().contains("duplicate name 'a.io/one'"));
    }

    #[test]
    fn rejects_identifier_collisions() {
        let err = build(vec![record("a.io/one-two", &[]), record("a.io/one.two", &[])])
            .unwrap_err();
        assert!(err.to_string().contains("IoAOneTwo"));
    }

    #[test]
    fn rejects_unknown_feature_status() {
        let mut bad = record("a.io/one", &[]);
        bad.feature_status = Some("experimental".to_string());
        let err = build(vec![bad]).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("featureStatus"), "{message}");
        assert!(message.contains("experimental"), "{message}");
    }

    #[test]
    fn input_order_does_not_change_the_index() {
        let records = vec![
            record("b.io/two", &["Node"]),
            record("a.io/one", &["DataVolume"]),
            record("c.io/three", &["Node", "Pod"]),
        ];
        let mut reversed = records.clone();
        reversed.reverse();
        let forward = build(records).unwrap();
        let backward = build(reversed).unwrap();
        assert_eq!(forward.entries(), backward.entries());
        assert_eq!(forward.registry(), backward.registry());
    }

    #[test]
    fn rejects_unknown_as_a_resource_tag() {
        let err = build(vec![
            record("a.io/one", &["Pod"]),
            record("a.io/two", &["Unknown", "Pod"]),
        ])
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "entry 1 ('a.io/two'): resource 'Unknown' clashes with a generated symbol"
        );
    }

    #[test]
    fn rejects_tags_and_identifiers_named_like_generated_symbols() {
        let err = build(vec![record("a.io/one", &["Alpha"])]).unwrap_err();
        assert!(err.to_string().contains("resource 'Alpha'"), "{err}");

        for reserved in ["Beta", "Instance", "FeatureStatus", "AllResourceAnnotations"] {
            let mut renamed = record("a.io/one", &["Pod"]);
            renamed.variable_name = Some(reserved.to_string());
            let err = build(vec![renamed]).unwrap_err();
            assert!(err.to_string().starts_with("entry 0 ('a.io/one'): identifier"), "{err}");
            assert!(err.to_string().contains(reserved), "{err}");
        }

        // The accessor name depends on the collection.
        let mut labels_only = record("a.io/one", &["Pod"]);
        labels_only.variable_name = Some("AllResourceLabels".to_string());
        assert!(build(vec![labels_only]).is_ok());
    }

    #[test]
    fn rejects_tags_equal_to_an_entry_identifier() {
        let mut named = record("a.io/one", &["Pod"]);
        named.variable_name = Some("Pod".to_string());
        let err = build(vec![record("a.io/two", &["DataVolume"]), named]).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("resource 'Pod'"), "{message}");
        assert!(message.contains("identifier of entry 1"), "{message}");
    }

    #[test]
    fn empty_catalog_is_valid() {
        let index = build(Vec::new()).unwrap();
        assert!(index.is_empty());
        assert!(index.registry().is_empty());
    }
}
