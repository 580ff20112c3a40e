//! Go listing: typed enums, an `Instance` struct, one package-level variable
//! per entry and the two accessors.

use super::{
    DESCRIPTION_INDENT, GENERATED_HEADER, Grammar, LiteralSyntax, RenderModel, format_description,
};
use crate::catalog::{Entry, Maturity, UNKNOWN_RESOURCE_TYPE};
use std::fmt::{self, Write};

const GO_SYNTAX: LiteralSyntax = LiteralSyntax {
    quote: '"',
    raw_delimiter: '`',
    concat: "+",
    quoted_escapes: &[("\\", "\\\\"), ("\"", "\\\""), ("\r", "\\r")],
    raw_escapes: &[],
};

/// Field comments and declarations of the generated `Instance` struct.
/// `{}` in a comment is replaced with the lower-case collection name.
const INSTANCE_FIELDS: [(&str, &str); 6] = [
    ("The name of the {}.", "Name string"),
    ("Description of the {}.", "Description string"),
    ("FeatureStatus of this {}.", "FeatureStatus FeatureStatus"),
    (
        "Hide the existence of this {} when outputting usage information.",
        "Hidden bool",
    ),
    (
        "Mark this {} as deprecated when generating usage information.",
        "Deprecated bool",
    ),
    ("The types of resources this {} applies to.", "Resources []ResourceTypes"),
];

#[derive(Clone, Copy, Debug, Default)]
pub struct GoGrammar;

impl Grammar for GoGrammar {
    fn name(&self) -> &'static str {
        "Go"
    }

    fn syntax(&self) -> &LiteralSyntax {
        &GO_SYNTAX
    }

    fn write(&self, model: &RenderModel<'_>, out: &mut String) -> fmt::Result {
        writeln!(out, "{GENERATED_HEADER}")?;
        writeln!(out)?;
        writeln!(out, "package {}", model.package)?;
        write_feature_status(out)?;
        write_resource_types(model, out)?;
        write_instance_type(model, out)?;
        write_variables(model, out)?;
        write_accessors(model, out)
    }
}

fn write_feature_status(out: &mut String) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "type FeatureStatus int")?;
    writeln!(out)?;
    writeln!(out, "const (")?;
    for (idx, maturity) in Maturity::ALL.iter().enumerate() {
        if idx == 0 {
            writeln!(out, "\t{maturity} FeatureStatus = iota")?;
        } else {
            writeln!(out, "\t{maturity}")?;
        }
    }
    writeln!(out, ")")?;
    writeln!(out)?;
    writeln!(out, "func (s FeatureStatus) String() string {{")?;
    writeln!(out, "\tswitch s {{")?;
    for maturity in Maturity::ALL {
        writeln!(out, "\tcase {maturity}:")?;
        writeln!(out, "\t\treturn {}", GO_SYNTAX.quoted(maturity.as_str()))?;
    }
    writeln!(out, "\t}}")?;
    writeln!(out, "\treturn \"Unknown\"")?;
    writeln!(out, "}}")
}

fn write_resource_types(model: &RenderModel<'_>, out: &mut String) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "type ResourceTypes int")?;
    writeln!(out)?;
    writeln!(out, "const (")?;
    writeln!(out, "\t{UNKNOWN_RESOURCE_TYPE} ResourceTypes = iota")?;
    for (_, name) in model.registry.iter() {
        writeln!(out, "\t{name}")?;
    }
    writeln!(out, ")")?;
    writeln!(out)?;
    writeln!(out, "func (r ResourceTypes) String() string {{")?;
    writeln!(out, "\tswitch r {{")?;
    for (ordinal, name) in model.registry.iter() {
        writeln!(out, "\tcase {ordinal}:")?;
        writeln!(out, "\t\treturn {}", GO_SYNTAX.quoted(name))?;
    }
    writeln!(out, "\t}}")?;
    writeln!(out, "\treturn {}", GO_SYNTAX.quoted(UNKNOWN_RESOURCE_TYPE))?;
    writeln!(out, "}}")
}

fn write_instance_type(model: &RenderModel<'_>, out: &mut String) -> fmt::Result {
    let collection = model.collection;
    writeln!(out)?;
    writeln!(out, "// Instance describes a single resource {}.", collection.name_lowercase)?;
    writeln!(out, "//")?;
    writeln!(out, "// Reference: {}", collection.link)?;
    writeln!(out, "// Concept: {}", collection.concept_link)?;
    writeln!(out, "type Instance struct {{")?;
    for (idx, (comment, field)) in INSTANCE_FIELDS.iter().enumerate() {
        if idx > 0 {
            writeln!(out)?;
        }
        writeln!(out, "\t// {}", comment.replace("{}", collection.name_lowercase))?;
        writeln!(out, "\t{field}")?;
    }
    writeln!(out, "}}")
}

fn write_variables(model: &RenderModel<'_>, out: &mut String) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "var (")?;
    for (idx, entry) in model.entries.iter().enumerate() {
        if idx > 0 {
            writeln!(out)?;
        }
        write_variable(entry, out)?;
    }
    writeln!(out, ")")
}

fn write_variable(entry: &Entry, out: &mut String) -> fmt::Result {
    let description = format_description(&entry.description, DESCRIPTION_INDENT, &GO_SYNTAX);
    writeln!(out, "\t{} = Instance{{", entry.identifier)?;
    writeln!(out, "\t\tName:          {},", GO_SYNTAX.quoted(entry.key.as_str()))?;
    writeln!(out, "\t\tDescription:   {description},")?;
    writeln!(out, "\t\tFeatureStatus: {},", entry.maturity)?;
    writeln!(out, "\t\tHidden:        {},", entry.hidden)?;
    writeln!(out, "\t\tDeprecated:    {},", entry.deprecated)?;
    writeln!(out, "\t\tResources: []ResourceTypes{{")?;
    for resource in &entry.resources {
        writeln!(out, "\t\t\t{resource},")?;
    }
    writeln!(out, "\t\t}},")?;
    writeln!(out, "\t}}")
}

fn write_accessors(model: &RenderModel<'_>, out: &mut String) -> fmt::Result {
    writeln!(out)?;
    writeln!(
        out,
        "func AllResource{}() []*Instance {{",
        model.collection.name_plural
    )?;
    writeln!(out, "\treturn []*Instance{{")?;
    for entry in model.entries {
        writeln!(out, "\t\t&{},", entry.identifier)?;
    }
    writeln!(out, "\t}}")?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(out, "func AllResourceTypes() []string {{")?;
    writeln!(out, "\treturn []string{{")?;
    for (_, name) in model.registry.iter() {
        writeln!(out, "\t\t{},", GO_SYNTAX.quoted(name))?;
    }
    writeln!(out, "\t}}")?;
    writeln!(out, "}}")
}
