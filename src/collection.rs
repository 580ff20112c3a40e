//! The two catalog collections the generator understands.
//!
//! Annotations and labels differ only in display metadata: which top-level
//! document key is read, how generated comments refer to an entry, and the
//! names of the emitted accessor functions.

use anyhow::{Result, bail};
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum CollectionKind {
    Annotations,
    Labels,
}

#[derive(Debug, Eq, PartialEq)]
/// Display metadata for one collection.
pub struct CollectionMeta {
    pub name: &'static str,
    pub name_plural: &'static str,
    pub name_lowercase: &'static str,
    pub name_lowercase_plural: &'static str,
    /// Reference page for the generated catalog.
    pub link: &'static str,
    /// Concept page explaining the collection type.
    pub concept_link: &'static str,
}

pub static ANNOTATIONS: CollectionMeta = CollectionMeta {
    name: "Annotation",
    name_plural: "Annotations",
    name_lowercase: "annotation",
    name_lowercase_plural: "annotations",
    link: "https://github.com/kubevm-io/vink/docs/reference/config/annotations/",
    concept_link: "https://kubernetes.io/docs/concepts/overview/working-with-objects/annotations/",
};

pub static LABELS: CollectionMeta = CollectionMeta {
    name: "Label",
    name_plural: "Labels",
    name_lowercase: "label",
    name_lowercase_plural: "labels",
    link: "https://github.com/kubevm-io/vink/docs/reference/config/labels/",
    concept_link: "https://kubernetes.io/docs/concepts/overview/working-with-objects/labels/",
};

impl CollectionKind {
    pub const ALL: [CollectionKind; 2] = [CollectionKind::Annotations, CollectionKind::Labels];

    /// Parse a `--collection_type` value. Singular spellings are accepted too.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "annotations" | "annotation" => Ok(CollectionKind::Annotations),
            "labels" | "label" => Ok(CollectionKind::Labels),
            other => bail!("unrecognized collection_type '{other}' (expected annotations|labels)"),
        }
    }

    pub fn meta(self) -> &'static CollectionMeta {
        match self {
            CollectionKind::Annotations => &ANNOTATIONS,
            CollectionKind::Labels => &LABELS,
        }
    }

    /// Top-level key holding this collection in a catalog document.
    pub fn document_key(self) -> &'static str {
        self.meta().name_lowercase_plural
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.document_key())
    }
}
