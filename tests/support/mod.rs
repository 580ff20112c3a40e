#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

pub fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

pub fn generator_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_metakeys-gen"))
}

/// Command for the generator with logging silenced unless a test opts in.
pub fn generator_command(workdir: &Path) -> Command {
    let mut cmd = Command::new(generator_binary());
    cmd.current_dir(workdir).env_remove("RUST_LOG");
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to spawn {:?}", cmd.get_program()))?;
    if !output.status.success() {
        bail!(
            "command {:?} exited with {:?}: {}",
            cmd.get_program(),
            output.status.code(),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(output)
}

/// Run a command that is expected to fail and return its output.
pub fn run_expecting_failure(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to spawn {:?}", cmd.get_program()))?;
    if output.status.success() {
        bail!("command {:?} unexpectedly succeeded", cmd.get_program());
    }
    Ok(output)
}
