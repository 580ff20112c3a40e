use anyhow::{Result, bail};
use std::fmt;

/// Domain suffix stripped from key namespaces before identifier derivation.
pub const DEFAULT_DOMAIN_SUFFIX: &str = ".kubevm.io";

const KEY_SEPARATOR: char = '/';
const NAMESPACE_WORD_SEPARATORS: [char; 2] = ['.', '-'];
const LOCAL_WORD_SEPARATORS: [char; 3] = ['.', '_', '-'];

/// Validated metadata key of the form `namespace/local`
/// (e.g., `cdi.kubevirt.io/storage.bind.immediate.requested`).
///
/// Construction fails unless the raw string holds exactly one `/` with text
/// on both sides, so every downstream consumer can split without checking.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct MetadataKey {
    raw: String,
    split: usize,
}

impl MetadataKey {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            bail!("key must not be empty");
        }
        let separators = raw.matches(KEY_SEPARATOR).count();
        if separators != 1 {
            bail!(
                "key '{raw}' must contain exactly one '{KEY_SEPARATOR}' separating namespace and name (found {separators})"
            );
        }
        let Some(split) = raw.find(KEY_SEPARATOR) else {
            bail!("key '{raw}' is missing its namespace separator");
        };
        if split == 0 {
            bail!("key '{raw}' has an empty namespace");
        }
        if split + 1 == raw.len() {
            bail!("key '{raw}' has an empty name");
        }
        Ok(Self {
            raw: raw.to_string(),
            split,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn namespace(&self) -> &str {
        &self.raw[..self.split]
    }

    pub fn local(&self) -> &str {
        &self.raw[self.split + 1..]
    }
}

impl fmt::Display for MetadataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Name used to reference an entry in generated code.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Identifier(pub String);

impl Identifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stability classification of a catalog entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Maturity {
    Alpha,
    Beta,
    Stable,
}

impl Maturity {
    /// Every maturity in enumeration order; generated enums follow this order.
    pub const ALL: [Maturity; 3] = [Maturity::Alpha, Maturity::Beta, Maturity::Stable];

    pub fn as_str(&self) -> &'static str {
        match self {
            Maturity::Alpha => "Alpha",
            Maturity::Beta => "Beta",
            Maturity::Stable => "Stable",
        }
    }

    /// Case-insensitive match against the three known tokens.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|maturity| maturity.as_str().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for Maturity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive the canonical identifier for `key`.
///
/// Namespace words are reversed so the identifier reads from the most
/// specific domain label to the least specific one, then the local name
/// words follow in their original order:
/// `cdi.kubevirt.io/storage.bind` becomes `IoKubevirtCdiStorageBind`.
pub fn derive_identifier(key: &MetadataKey, domain_suffix: &str) -> Identifier {
    let mut namespace = key.namespace();
    if !domain_suffix.is_empty() {
        namespace = namespace.strip_suffix(domain_suffix).unwrap_or(namespace);
    }

    let mut identifier: String = namespace
        .split(NAMESPACE_WORD_SEPARATORS)
        .filter(|word| !word.is_empty())
        .rev()
        .map(capitalize_ascii)
        .collect();

    identifier.extend(
        key.local()
            .split(LOCAL_WORD_SEPARATORS)
            .filter(|word| !word.is_empty())
            .map(capitalize_ascii),
    );

    Identifier(identifier)
}

/// Use the explicit override verbatim when present, otherwise derive one.
pub fn resolve_identifier(
    key: &MetadataKey,
    explicit: Option<&str>,
    domain_suffix: &str,
) -> Identifier {
    match explicit.filter(|value| !value.is_empty()) {
        Some(value) => Identifier(value.to_string()),
        None => derive_identifier(key, domain_suffix),
    }
}

/// Resolve the maturity of an entry.
///
/// An explicit value must name one of the known tokens. Without one, a key
/// whose first `.`-delimited segment is a maturity token (`beta.example.io/x`)
/// takes that maturity; everything else is `Alpha`.
pub fn resolve_maturity(key: &MetadataKey, explicit: Option<&str>) -> Result<Maturity> {
    if let Some(value) = explicit.filter(|value| !value.is_empty()) {
        return match Maturity::parse(value) {
            Some(maturity) => Ok(maturity),
            None => bail!("unrecognized feature status '{value}' (expected alpha|beta|stable)"),
        };
    }

    let first_segment = key.as_str().split('.').next().unwrap_or_default();
    Ok(Maturity::parse(first_segment).unwrap_or(Maturity::Alpha))
}

fn capitalize_ascii(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        out.push(first.to_ascii_uppercase());
        out.extend(chars);
    }
    out
}
