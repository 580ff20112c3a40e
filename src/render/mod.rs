//! Renders a resolved catalog into generated source listings.
//!
//! Rendering is a pure function of the collection metadata, the type registry
//! and the ordered entries. Each output language is a `Grammar`: it owns the
//! layout of the listing and supplies a `LiteralSyntax` describing how string
//! literals are delimited, escaped and concatenated. The description
//! formatting algorithms below are shared by every grammar and only consult
//! the syntax for delimiters.

pub mod go;
pub mod typescript;

pub use go::GoGrammar;
pub use typescript::TypeScriptGrammar;

use crate::catalog::{CatalogIndex, Entry, TypeRegistry};
use crate::collection::CollectionMeta;
use anyhow::{Context, Result};
use std::fmt;
use tracing::debug;

/// Column budget for packed single-line descriptions.
pub const MAX_LINE_LENGTH: usize = 80;
/// Column at which wrapped description literals continue.
pub const DESCRIPTION_INDENT: usize = 24;
/// First line of every generated listing.
pub const GENERATED_HEADER: &str = "// GENERATED FILE -- DO NOT EDIT";

#[derive(Clone, Copy, Debug)]
/// String literal conventions of an output language.
pub struct LiteralSyntax {
    /// Delimiter of ordinary single-line literals.
    pub quote: char,
    /// Delimiter of raw/multi-line literals; doubles as the placeholder for
    /// quote characters inside single-line literals.
    pub raw_delimiter: char,
    /// Operator joining adjacent literals.
    pub concat: &'static str,
    /// Replacements applied to the body of a quoted literal, in order.
    pub quoted_escapes: &'static [(&'static str, &'static str)],
    /// Replacements applied to the body of a raw literal, in order.
    pub raw_escapes: &'static [(&'static str, &'static str)],
}

impl LiteralSyntax {
    /// Wrap `body` in quote delimiters. `body` must not contain the quote.
    pub fn quoted(&self, body: &str) -> String {
        wrap(self.quote, &apply_escapes(body, self.quoted_escapes))
    }

    /// Wrap `body` in raw delimiters. `body` must not contain the delimiter.
    pub fn raw(&self, body: &str) -> String {
        wrap(self.raw_delimiter, &apply_escapes(body, self.raw_escapes))
    }
}

/// Everything a grammar needs to lay out one listing.
pub struct RenderModel<'a> {
    pub collection: &'static CollectionMeta,
    pub registry: &'a TypeRegistry,
    pub entries: &'a [Entry],
    /// Package clause for grammars that need one.
    pub package: &'a str,
}

impl<'a> RenderModel<'a> {
    pub fn new(index: &'a CatalogIndex, package: &'a str) -> Self {
        Self {
            collection: index.collection().meta(),
            registry: index.registry(),
            entries: index.entries(),
            package,
        }
    }
}

/// An output language for the generated registry.
pub trait Grammar {
    /// Human-readable language name used in logs and errors.
    fn name(&self) -> &'static str;

    fn syntax(&self) -> &LiteralSyntax;

    /// Append the complete listing for `model` to `out`.
    fn write(&self, model: &RenderModel<'_>, out: &mut String) -> fmt::Result;
}

/// Render `model` with `grammar` into a fresh string.
pub fn render(grammar: &dyn Grammar, model: &RenderModel<'_>) -> Result<String> {
    let mut out = String::new();
    grammar
        .write(model, &mut out)
        .with_context(|| format!("rendering {} source", grammar.name()))?;
    debug!(grammar = grammar.name(), bytes = out.len(), "rendered listing");
    Ok(out)
}

/// Format a description as a literal expression, picking the multi-line form
/// when the text contains a line break.
pub fn format_description(text: &str, indent: usize, syntax: &LiteralSyntax) -> String {
    if text.contains('\n') {
        format_multi_line(text, syntax)
    } else {
        format_single_line(text, indent, syntax)
    }
}

/// Pack space-separated words into quoted literals no wider than
/// `MAX_LINE_LENGTH` columns once indented by `indent`.
///
/// Quote characters become the raw delimiter. A wrapped line keeps its
/// trailing space inside the literal, so concatenating the literals yields
/// the substituted input exactly. Text that fits produces a single literal.
pub fn format_single_line(text: &str, indent: usize, syntax: &LiteralSyntax) -> String {
    let substituted = text.replace(syntax.quote, syntax.raw_delimiter.encode_utf8(&mut [0; 4]));
    let continuation = " ".repeat(indent);

    let mut out = String::new();
    let mut line = String::new();
    let mut line_width = 0;
    let mut line_started = false;

    for word in substituted.split(' ') {
        let word_width = word.chars().count();
        if line_started && indent + line_width + word_width > MAX_LINE_LENGTH {
            line.push(' ');
            out.push_str(&syntax.quoted(&line));
            out.push_str(syntax.concat);
            out.push('\n');
            out.push_str(&continuation);
            line.clear();
            line_width = 0;
            line_started = false;
        }
        if line_started {
            line.push(' ');
            line_width += 1;
        }
        line.push_str(word);
        line_width += word_width;
        line_started = true;
    }

    out.push_str(&syntax.quoted(&line));
    out
}

/// Wrap text containing line breaks in a single raw literal.
///
/// Raw delimiters inside the text become quote characters. `\r\n` and lone
/// `\r` line endings become `\n`, since Go raw strings discard carriage
/// returns; every line is otherwise kept as written.
pub fn format_multi_line(text: &str, syntax: &LiteralSyntax) -> String {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let substituted =
        normalized.replace(syntax.raw_delimiter, syntax.quote.encode_utf8(&mut [0; 4]));
    syntax.raw(&substituted)
}

fn apply_escapes(body: &str, escapes: &[(&str, &str)]) -> String {
    escapes
        .iter()
        .fold(body.to_string(), |acc, (from, to)| acc.replace(from, to))
}

fn wrap(delimiter: char, body: &str) -> String {
    let mut out = String::with_capacity(body.len() + 2);
    out.push(delimiter);
    out.push_str(body);
    out.push(delimiter);
    out
}
