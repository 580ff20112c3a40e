//! Generate Go and TypeScript registries from an annotation or label catalog.
//!
//! Usage:
//!   metakeys-gen --input annotations.yaml \
//!       --output_go apis/annotations/annotations.gen.go \
//!       --output_ts web/annotations.gen.ts
//!   metakeys-gen --collection_type labels --output_go labels/labels.gen.go --output_ts labels.gen.ts
//!
//! Without `--input` the catalog bundled for the collection is used. Set
//! `RUST_LOG=info` (or `debug`) to trace each stage on stderr.

use anyhow::Result;
use clap::Parser;
use metakeys::{
    CatalogSource, CollectionKind, DEFAULT_DOMAIN_SUFFIX, GeneratorConfig, generate,
};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(name = "metakeys-gen")]
#[command(about = "Generate Go and TypeScript registries of Kubernetes metadata keys")]
struct Cli {
    /// Catalog YAML to read; the bundled catalog is used when omitted.
    #[arg(long = "input")]
    input: Option<PathBuf>,
    /// Destination of the Go listing.
    #[arg(long = "output_go")]
    output_go: PathBuf,
    /// Destination of the TypeScript listing.
    #[arg(long = "output_ts")]
    output_ts: PathBuf,
    /// Collection to generate: annotations or labels.
    #[arg(long = "collection_type", default_value = "annotations")]
    collection_type: String,
    /// Go package clause; defaults to the directory containing --output_go.
    #[arg(long = "go_package")]
    go_package: Option<String>,
    /// Namespace suffix removed before deriving identifiers.
    #[arg(long = "domain_suffix", default_value = DEFAULT_DOMAIN_SUFFIX)]
    domain_suffix: String,
}

impl Cli {
    fn into_config(self) -> Result<GeneratorConfig> {
        Ok(GeneratorConfig {
            source: self.input.map_or(CatalogSource::Bundled, CatalogSource::File),
            collection: CollectionKind::parse(&self.collection_type)?,
            output_go: self.output_go,
            output_ts: self.output_ts,
            go_package: self.go_package,
            domain_suffix: self.domain_suffix,
        })
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    init_tracing();
    let config = Cli::parse().into_config()?;
    generate(&config)?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}
