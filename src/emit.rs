//! Persists rendered listings.
//!
//! Every listing is first written in full to a temporary file in its
//! destination directory. Destinations are only replaced once all temporary
//! files are complete, so a failure while writing leaves every existing
//! output untouched.

use anyhow::{Context, Result, bail};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

#[derive(Clone, Debug, Eq, PartialEq)]
/// A rendered listing and the path it belongs at.
pub struct RenderedOutput {
    pub path: PathBuf,
    pub contents: String,
}

impl RenderedOutput {
    pub fn new(path: impl Into<PathBuf>, contents: String) -> Self {
        Self {
            path: path.into(),
            contents,
        }
    }
}

/// Write every output or none of them.
pub fn write_all_or_nothing(outputs: &[RenderedOutput]) -> Result<()> {
    reject_shared_destinations(outputs)?;

    let mut staged = Vec::with_capacity(outputs.len());
    for output in outputs {
        let file = stage(output)?;
        debug!(path = %output.path.display(), bytes = output.contents.len(), "staged output");
        staged.push((file, &output.path));
    }

    for (file, path) in staged {
        file.persist(path)
            .map_err(|err| err.error)
            .with_context(|| format!("replacing {}", path.display()))?;
        info!(path = %path.display(), "wrote generated listing");
    }
    Ok(())
}

fn reject_shared_destinations(outputs: &[RenderedOutput]) -> Result<()> {
    let mut seen: BTreeMap<PathBuf, &Path> = BTreeMap::new();
    for output in outputs {
        let absolute = std::path::absolute(&output.path)
            .with_context(|| format!("resolving output path {}", output.path.display()))?;
        if let Some(previous) = seen.insert(absolute, &output.path) {
            bail!(
                "output paths {} and {} refer to the same file",
                previous.display(),
                output.path.display()
            );
        }
    }
    Ok(())
}

fn stage(output: &RenderedOutput) -> Result<NamedTempFile> {
    let dir = match output.path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temporary file in {}", dir.display()))?;
    file.write_all(output.contents.as_bytes())
        .and_then(|()| file.flush())
        .with_context(|| format!("writing staged copy of {}", output.path.display()))?;
    set_readable(&file)
        .with_context(|| format!("setting permissions for {}", output.path.display()))?;
    Ok(file)
}

#[cfg(unix)]
fn set_readable(file: &NamedTempFile) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.as_file()
        .set_permissions(std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_readable(_file: &NamedTempFile) -> std::io::Result<()> {
    Ok(())
}
