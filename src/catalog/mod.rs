//! Catalog loading and resolution.
//!
//! `model` mirrors the YAML document, `identity` holds keys, identifiers and
//! maturities, `registry` builds the resource type table, and `index` ties
//! them together into the ordered view the renderers consume.
//! `CatalogRepository` exposes the catalogs bundled with the crate.

pub mod identity;
pub mod index;
pub mod model;
pub mod registry;
pub mod repository;

pub use identity::{
    DEFAULT_DOMAIN_SUFFIX, Identifier, Maturity, MetadataKey, derive_identifier,
    resolve_identifier, resolve_maturity,
};
pub use index::{CatalogIndex, Entry, ResolveOptions};
pub use model::{CatalogDocument, EntryRecord, load_catalog_from_path, parse_catalog_str};
pub use registry::{TypeRegistry, UNKNOWN_RESOURCE_TYPE};
pub use repository::{CatalogRepository, bundled_catalog_source};
