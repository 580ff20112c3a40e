//! End-to-end generation: load, resolve, render both listings, persist.

use crate::catalog::{
    CatalogIndex, CatalogRepository, DEFAULT_DOMAIN_SUFFIX, ResolveOptions,
    bundled_catalog_source,
};
use crate::collection::CollectionKind;
use crate::emit::{RenderedOutput, write_all_or_nothing};
use crate::render::{GoGrammar, RenderModel, TypeScriptGrammar, render};
use anyhow::{Context, Result, anyhow, bail};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

const GO_KEYWORDS: [&str; 25] = [
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var",
];

#[derive(Clone, Debug, Eq, PartialEq)]
/// Where the catalog document comes from.
pub enum CatalogSource {
    File(PathBuf),
    /// The catalog shipped with the crate for the selected collection.
    Bundled,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratorConfig {
    pub source: CatalogSource,
    pub collection: CollectionKind,
    pub output_go: PathBuf,
    pub output_ts: PathBuf,
    /// Overrides the package clause derived from the Go output directory.
    pub go_package: Option<String>,
    pub domain_suffix: String,
}

impl GeneratorConfig {
    /// Bundled annotations with default resolution options.
    pub fn new(output_go: impl Into<PathBuf>, output_ts: impl Into<PathBuf>) -> Self {
        Self {
            source: CatalogSource::Bundled,
            collection: CollectionKind::Annotations,
            output_go: output_go.into(),
            output_ts: output_ts.into(),
            go_package: None,
            domain_suffix: DEFAULT_DOMAIN_SUFFIX.to_string(),
        }
    }

    fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            domain_suffix: self.domain_suffix.clone(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
/// Summary of a successful run.
pub struct GenerationReport {
    pub collection: CollectionKind,
    pub entries: usize,
    pub resource_types: usize,
    pub go_package: String,
    pub go_path: PathBuf,
    pub ts_path: PathBuf,
}

/// Run the whole pipeline. Nothing is written unless every stage succeeds.
pub fn generate(config: &GeneratorConfig) -> Result<GenerationReport> {
    let index = load_index(config)?;
    let go_package = go_package_name(&config.output_go, config.go_package.as_deref())?;
    let (go, ts) = render_outputs(&index, &go_package)?;

    write_all_or_nothing(&[
        RenderedOutput::new(&config.output_go, go),
        RenderedOutput::new(&config.output_ts, ts),
    ])?;

    let report = GenerationReport {
        collection: index.collection(),
        entries: index.len(),
        resource_types: index.registry().len(),
        go_package,
        go_path: config.output_go.clone(),
        ts_path: config.output_ts.clone(),
    };
    info!(
        collection = %report.collection,
        entries = report.entries,
        resource_types = report.resource_types,
        package = %report.go_package,
        "generation complete"
    );
    Ok(report)
}

/// Render the Go and TypeScript listings for one resolved catalog.
pub fn render_outputs(index: &CatalogIndex, go_package: &str) -> Result<(String, String)> {
    let model = RenderModel::new(index, go_package);
    let go = render(&GoGrammar, &model)?;
    let ts = render(&TypeScriptGrammar, &model)?;
    Ok((go, ts))
}

fn load_index(config: &GeneratorConfig) -> Result<Cow<'static, CatalogIndex>> {
    let options = config.resolve_options();
    let kind = config.collection;
    match &config.source {
        CatalogSource::File(path) => {
            info!(path = %path.display(), collection = %kind, "loading catalog");
            CatalogIndex::load(path, kind, &options).map(Cow::Owned)
        }
        CatalogSource::Bundled if options == ResolveOptions::default() => {
            info!(collection = %kind, "using bundled catalog");
            CatalogRepository::bundled()?
                .get(kind)
                .map(Cow::Borrowed)
                .ok_or_else(|| anyhow!("no bundled catalog for {kind}"))
        }
        CatalogSource::Bundled => {
            info!(collection = %kind, suffix = %options.domain_suffix, "resolving bundled catalog");
            let origin = format!("bundled {kind} catalog");
            CatalogIndex::from_yaml(bundled_catalog_source(kind), kind, &options, &origin)
                .map(Cow::Owned)
        }
    }
}

/// Package clause for the Go listing.
///
/// Defaults to the name of the directory that will contain the Go output.
pub fn go_package_name(output_go: &Path, explicit: Option<&str>) -> Result<String> {
    let name = match explicit {
        Some(name) => name.to_string(),
        None => {
            let absolute = std::path::absolute(output_go)
                .with_context(|| format!("resolving {}", output_go.display()))?;
            absolute
                .parent()
                .and_then(Path::file_name)
                .map(|name| name.to_string_lossy().into_owned())
                .ok_or_else(|| {
                    anyhow!(
                        "cannot derive a Go package from {}; pass --go_package",
                        output_go.display()
                    )
                })?
        }
    };
    if !is_go_identifier(&name) {
        bail!("'{name}' is not a valid Go package name");
    }
    Ok(name)
}

fn is_go_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first == '_' || first.is_alphabetic())
        && chars.all(|c| c == '_' || c.is_alphanumeric())
        && !GO_KEYWORDS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn package_defaults_to_output_directory() {
        let name = go_package_name(Path::new("/src/apis/annotations/annotations.gen.go"), None)
            .unwrap();
        assert_eq!(name, "annotations");
    }

    #[test]
    fn explicit_package_wins_and_is_validated() {
        let path = Path::new("/tmp/some-dir/out.go");
        assert_eq!(go_package_name(path, Some("labels")).unwrap(), "labels");
        assert!(go_package_name(path, None).is_err());
        assert!(go_package_name(path, Some("type")).is_err());
        assert!(go_package_name(path, Some("9lives")).is_err());
        assert!(go_package_name(path, Some("")).is_err());
    }

    #[test]
    fn renders_both_listings_from_one_index() {
        let repo = CatalogRepository::bundled().unwrap();
        let index = repo.get(CollectionKind::Annotations).unwrap();
        let (go, ts) = render_outputs(index, "annotations").unwrap();
        assert!(go.contains("package annotations"));
        assert!(go.contains("func AllResourceAnnotations() []*Instance {"));
        assert!(ts.contains("export function allResourceAnnotations(): Instance[] {"));
    }

    #[test]
    fn generates_from_a_file_catalog() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("labels.yaml");
        fs::write(
            &input,
            "labels:\n  - name: team.example.com/owner\n    resources: [Pod]\n",
        )
        .unwrap();
        let out_dir = dir.path().join("labels");
        fs::create_dir(&out_dir).unwrap();

        let mut config =
            GeneratorConfig::new(out_dir.join("labels.gen.go"), out_dir.join("labels.gen.ts"));
        config.source = CatalogSource::File(input);
        config.collection = CollectionKind::Labels;
        config.domain_suffix = ".example.com".to_string();

        let report = generate(&config).unwrap();
        assert_eq!(report.entries, 1);
        assert_eq!(report.resource_types, 1);
        assert_eq!(report.go_package, "labels");
        let go = fs::read_to_string(out_dir.join("labels.gen.go")).unwrap();
        assert!(go.contains("\tTeamOwner = Instance{"), "{go}");
    }

    #[test]
    fn custom_suffix_re_resolves_the_bundled_catalog() {
        let dir = TempDir::new().unwrap();
        let mut config = GeneratorConfig::new(dir.path().join("a.go"), dir.path().join("a.ts"));
        config.go_package = Some("annotations".to_string());
        config.domain_suffix = String::new();
        generate(&config).unwrap();
        let go = fs::read_to_string(dir.path().join("a.go")).unwrap();
        assert!(go.contains("\tIoKubevmVinkHost = Instance{"), "{go}");
    }
}
