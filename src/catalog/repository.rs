//! Holds resolved catalogs for lookup by collection.
//!
//! The crate ships pre-authored annotation and label catalogs. They are parsed
//! and resolved once per process into an immutable repository; callers only
//! ever receive shared references to it.

use crate::catalog::index::{CatalogIndex, Entry, ResolveOptions};
use crate::collection::CollectionKind;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::sync::OnceLock;

const BUNDLED_ANNOTATIONS: &str = include_str!("../../catalogs/annotations.yaml");
const BUNDLED_LABELS: &str = include_str!("../../catalogs/labels.yaml");

/// Raw YAML of the catalog bundled for `kind`.
pub fn bundled_catalog_source(kind: CollectionKind) -> &'static str {
    match kind {
        CollectionKind::Annotations => BUNDLED_ANNOTATIONS,
        CollectionKind::Labels => BUNDLED_LABELS,
    }
}

#[derive(Default)]
/// In-memory store of resolved catalogs keyed by `CollectionKind`.
pub struct CatalogRepository {
    catalogs: BTreeMap<CollectionKind, CatalogIndex>,
}

impl CatalogRepository {
    /// The bundled catalogs, resolved with default options on first use.
    pub fn bundled() -> Result<&'static CatalogRepository> {
        static BUNDLED: OnceLock<CatalogRepository> = OnceLock::new();
        if let Some(repo) = BUNDLED.get() {
            return Ok(repo);
        }
        let mut repo = CatalogRepository::default();
        for kind in CollectionKind::ALL {
            let origin = format!("bundled {kind} catalog");
            let index = CatalogIndex::from_yaml(
                bundled_catalog_source(kind),
                kind,
                &ResolveOptions::default(),
                &origin,
            )
            .with_context(|| format!("loading {origin}"))?;
            repo.register(index);
        }
        Ok(BUNDLED.get_or_init(|| repo))
    }

    /// Register a catalog, replacing any previous one of the same collection.
    pub fn register(&mut self, index: CatalogIndex) {
        self.catalogs.insert(index.collection(), index);
    }

    pub fn get(&self, kind: CollectionKind) -> Option<&CatalogIndex> {
        self.catalogs.get(&kind)
    }

    /// Resolve an entry inside a registered catalog.
    pub fn find_entry(&self, kind: CollectionKind, key: &str) -> Option<&Entry> {
        self.get(kind)?.entry(key)
    }
}
