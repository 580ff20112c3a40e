//! Ordinal-indexed registry of the resource types a catalog references.
//!
//! Ordinal 0 is the implicit `Unknown` sentinel; the sorted, deduplicated tags
//! follow at 1..=N. Both generated listings enumerate from this one table so
//! ordinal *i* names the same tag in every output.

use crate::catalog::Entry;
use std::collections::BTreeSet;

/// Name reported for ordinal 0 and for any ordinal outside the registry.
pub const UNKNOWN_RESOURCE_TYPE: &str = "Unknown";

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TypeRegistry {
    names: Vec<String>,
}

impl TypeRegistry {
    pub fn from_entries(entries: &[Entry]) -> Self {
        Self::from_tags(entries.iter().flat_map(|entry| entry.resources.iter()))
    }

    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let unique: BTreeSet<String> = tags
            .into_iter()
            .map(|tag| tag.as_ref().to_string())
            .collect();
        Self {
            names: unique.into_iter().collect(),
        }
    }

    /// 1-based ordinal of `name`, or `None` when the catalog never uses it.
    pub fn ordinal(&self, name: &str) -> Option<usize> {
        self.names
            .binary_search_by(|candidate| candidate.as_str().cmp(name))
            .ok()
            .map(|idx| idx + 1)
    }

    /// Reverse lookup used by the generated stringification routines.
    pub fn name(&self, ordinal: usize) -> &str {
        ordinal
            .checked_sub(1)
            .and_then(|idx| self.names.get(idx))
            .map_or(UNKNOWN_RESOURCE_TYPE, String::as_str)
    }

    /// `(ordinal, name)` pairs in ordinal order, excluding the sentinel.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(idx, name)| (idx + 1, name.as_str()))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
