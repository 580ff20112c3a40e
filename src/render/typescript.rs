//! TypeScript listing: numeric enums with string conversion helpers, an
//! `Instance` interface, a frozen map of entries and the two accessors.

use super::{
    DESCRIPTION_INDENT, GENERATED_HEADER, Grammar, LiteralSyntax, RenderModel, format_description,
};
use crate::catalog::{Entry, Maturity, UNKNOWN_RESOURCE_TYPE};
use std::fmt::{self, Write};

const TS_SYNTAX: LiteralSyntax = LiteralSyntax {
    quote: '"',
    raw_delimiter: '`',
    concat: "+",
    quoted_escapes: &[("\\", "\\\\"), ("\"", "\\\""), ("\r", "\\r")],
    raw_escapes: &[("\\", "\\\\"), ("${", "\\${")],
};

const INSTANCE_FIELDS: [&str; 6] = [
    "name: string;",
    "description: string;",
    "featureStatus: FeatureStatus;",
    "hidden: boolean;",
    "deprecated: boolean;",
    "resources: ResourceTypes[];",
];

#[derive(Clone, Copy, Debug, Default)]
pub struct TypeScriptGrammar;

impl Grammar for TypeScriptGrammar {
    fn name(&self) -> &'static str {
        "TypeScript"
    }

    fn syntax(&self) -> &LiteralSyntax {
        &TS_SYNTAX
    }

    fn write(&self, model: &RenderModel<'_>, out: &mut String) -> fmt::Result {
        writeln!(out, "{GENERATED_HEADER}")?;
        write_feature_status(out)?;
        write_resource_types(model, out)?;
        write_instance_type(model, out)?;
        write_instances(model, out)?;
        write_accessors(model, out)
    }
}

fn write_feature_status(out: &mut String) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "export enum FeatureStatus {{")?;
    for maturity in Maturity::ALL {
        writeln!(out, "  {maturity},")?;
    }
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(
        out,
        "export function featureStatusToString(status: FeatureStatus): string {{"
    )?;
    writeln!(out, "  switch (status) {{")?;
    for maturity in Maturity::ALL {
        writeln!(out, "    case FeatureStatus.{maturity}:")?;
        writeln!(out, "      return {};", TS_SYNTAX.quoted(maturity.as_str()))?;
    }
    writeln!(out, "    default:")?;
    writeln!(out, "      return \"Unknown\";")?;
    writeln!(out, "  }}")?;
    writeln!(out, "}}")
}

fn write_resource_types(model: &RenderModel<'_>, out: &mut String) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "export enum ResourceTypes {{")?;
    writeln!(out, "  {UNKNOWN_RESOURCE_TYPE},")?;
    for (_, name) in model.registry.iter() {
        writeln!(out, "  {name},")?;
    }
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(
        out,
        "export function resourceTypesToString(type: ResourceTypes): string {{"
    )?;
    writeln!(out, "  switch (type) {{")?;
    for (ordinal, name) in model.registry.iter() {
        writeln!(out, "    case {ordinal}:")?;
        writeln!(out, "      return {};", TS_SYNTAX.quoted(name))?;
    }
    writeln!(out, "    default:")?;
    writeln!(out, "      return {};", TS_SYNTAX.quoted(UNKNOWN_RESOURCE_TYPE))?;
    writeln!(out, "  }}")?;
    writeln!(out, "}}")
}

fn write_instance_type(model: &RenderModel<'_>, out: &mut String) -> fmt::Result {
    let collection = model.collection;
    writeln!(out)?;
    writeln!(out, "/**")?;
    writeln!(out, " * Instance describes a single resource {}.", collection.name_lowercase)?;
    writeln!(out, " *")?;
    writeln!(out, " * Reference: {}", collection.link)?;
    writeln!(out, " * Concept: {}", collection.concept_link)?;
    writeln!(out, " */")?;
    writeln!(out, "export interface Instance {{")?;
    for field in INSTANCE_FIELDS {
        writeln!(out, "  {field}")?;
    }
    writeln!(out, "}}")
}

fn write_instances(model: &RenderModel<'_>, out: &mut String) -> fmt::Result {
    writeln!(out)?;
    writeln!(
        out,
        "export const instances: {{ readonly [key: string]: Instance }} = {{"
    )?;
    for entry in model.entries {
        write_instance(entry, out)?;
    }
    writeln!(out, "}};")
}

fn write_instance(entry: &Entry, out: &mut String) -> fmt::Result {
    let description = format_description(&entry.description, DESCRIPTION_INDENT, &TS_SYNTAX);
    writeln!(out, "  {}: {{", entry.identifier)?;
    writeln!(out, "    name: {},", TS_SYNTAX.quoted(entry.key.as_str()))?;
    writeln!(out, "    description: {description},")?;
    writeln!(out, "    featureStatus: FeatureStatus.{},", entry.maturity)?;
    writeln!(out, "    hidden: {},", entry.hidden)?;
    writeln!(out, "    deprecated: {},", entry.deprecated)?;
    writeln!(out, "    resources: [")?;
    for resource in &entry.resources {
        writeln!(out, "      ResourceTypes.{resource},")?;
    }
    writeln!(out, "    ],")?;
    writeln!(out, "  }},")
}

fn write_accessors(model: &RenderModel<'_>, out: &mut String) -> fmt::Result {
    writeln!(out)?;
    writeln!(
        out,
        "export function allResource{}(): Instance[] {{",
        model.collection.name_plural
    )?;
    writeln!(out, "  return [")?;
    for entry in model.entries {
        writeln!(out, "    instances.{},", entry.identifier)?;
    }
    writeln!(out, "  ];")?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(out, "export function allResourceTypes(): string[] {{")?;
    writeln!(out, "  return [")?;
    for (_, name) in model.registry.iter() {
        writeln!(out, "    {},", TS_SYNTAX.quoted(name))?;
    }
    writeln!(out, "  ];")?;
    writeln!(out, "}}")
}
