#![allow(dead_code)]

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// Three annotations authored out of key order. Covers an explicit identifier,
// an explicit and an inferred maturity, a multi-line description and a
// description long enough to wrap.
pub const ANNOTATIONS_FIXTURE: &str = r#"annotations:
  - name: vink.kubevm.io/virtualmachine.binding
    description: |-
      Binds the virtual machine to a DataVolume.
      Set to "auto" to pick one.
    featureStatus: beta
    resources:
      - VirtualMachine
      - DataVolume

  - name: cdi.kubevirt.io/storage.bind.immediate.requested
    description: Indicates that CDI should bind the storage immediately instead of waiting for the first consumer.
    hidden: true
    resources:
      - DataVolume

  - name: stable.kubevm.io/legacy-flag
    variableName: LegacyFlag
    description: Older toggle kept for compatibility.
    deprecated: true
    resources:
      - VirtualMachineInstance
"#;

// Same entries as ANNOTATIONS_FIXTURE in a different order.
pub const ANNOTATIONS_FIXTURE_REORDERED: &str = r#"annotations:
  - name: stable.kubevm.io/legacy-flag
    variableName: LegacyFlag
    description: Older toggle kept for compatibility.
    deprecated: true
    resources:
      - VirtualMachineInstance

  - name: cdi.kubevirt.io/storage.bind.immediate.requested
    description: Indicates that CDI should bind the storage immediately instead of waiting for the first consumer.
    hidden: true
    resources:
      - DataVolume

  - name: vink.kubevm.io/virtualmachine.binding
    description: |-
      Binds the virtual machine to a DataVolume.
      Set to "auto" to pick one.
    featureStatus: beta
    resources:
      - VirtualMachine
      - DataVolume
"#;

pub const LABELS_FIXTURE: &str = r#"labels:
  - name: vink.kubevm.io/virtualmachine.os
    description: Operating system family of the virtual machine.
    resources:
      - VirtualMachine
"#;

// Second entry has two separators in its key.
pub const MALFORMED_KEY_FIXTURE: &str = r#"annotations:
  - name: vink.kubevm.io/fine
    resources: [VirtualMachine]
  - name: vink.kubevm.io/not/fine
    resources: [VirtualMachine]
"#;

/// Scratch directory holding catalogs and generated outputs for one test.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: TempDir::new().context("failed to create workspace")?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_catalog(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(name);
        fs::write(&path, contents)
            .with_context(|| format!("failed to write catalog {}", path.display()))?;
        Ok(path)
    }

    /// Create (if needed) a directory whose name becomes the Go package.
    pub fn package_dir(&self, package: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(package);
        fs::create_dir_all(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        Ok(path)
    }
}

/// Byte offsets of `needles` in `haystack`, panicking when one is absent.
pub fn positions(haystack: &str, needles: &[&str]) -> Vec<usize> {
    needles
        .iter()
        .map(|needle| {
            haystack
                .find(needle)
                .unwrap_or_else(|| panic!("missing {needle:?} in:\n{haystack}"))
        })
        .collect()
}
