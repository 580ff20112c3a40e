//! Shared library for the metakeys generator.
//!
//! The crate reads a catalog of Kubernetes annotation or label keys and emits
//! the same registry as a Go listing and as a TypeScript listing. Loading and
//! resolution live in `catalog`, the two output grammars in `render`, and
//! `generator` strings the stages together for the `metakeys-gen` binary.
//! Public functions here form the contract that binary depends on.

pub mod catalog;
pub mod collection;
pub mod emit;
pub mod generator;
pub mod render;
pub(crate) mod schema_loader;

pub use catalog::{
    CatalogIndex, CatalogRepository, DEFAULT_DOMAIN_SUFFIX, Entry, EntryRecord, Identifier,
    Maturity, MetadataKey, ResolveOptions, TypeRegistry, derive_identifier, resolve_identifier,
    resolve_maturity,
};
pub use collection::{CollectionKind, CollectionMeta};
pub use emit::{RenderedOutput, write_all_or_nothing};
pub use generator::{
    CatalogSource, GenerationReport, GeneratorConfig, generate, go_package_name, render_outputs,
};
pub use render::{
    Grammar, GoGrammar, LiteralSyntax, RenderModel, TypeScriptGrammar, format_description,
    format_multi_line, format_single_line, render,
};
