//! Bundling the entry script into the Surfingkeys artifact.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::TaskError;
use crate::tool::{ToolCommand, ToolRunner};

/// Inputs for a bundle run, relative to `root`.
#[derive(Debug, Clone)]
pub struct BundleSpec<'a> {
    pub root: &'a Path,
    pub entry: &'a Path,
    pub out_dir: &'a Path,
    pub artifact: &'a str,
}

/// Run `bundler` on the entry script and rename its output to the artifact.
///
/// The bundler is expected to write `<out_dir>/<entry file name>`. Arguments
/// may use `{root}`, `{entry}` and `{out_dir}`.
pub fn bundle(
    runner: &impl ToolRunner,
    bundler: &ToolCommand,
    spec: &BundleSpec<'_>,
) -> Result<PathBuf, TaskError> {
    let out_dir = spec.root.join(spec.out_dir);
    fs::create_dir_all(&out_dir).map_err(|e| TaskError::io("create", &out_dir, e))?;

    let root = spec.root.to_string_lossy();
    let entry = spec.entry.to_string_lossy();
    let out = spec.out_dir.to_string_lossy();

    let command = bundler.expand(&[("root", &*root), ("entry", &*entry), ("out_dir", &*out)]);

    tracing::info!("Bundling {}", entry);
    let status = runner.run(&command, spec.root)?;
    if !status.success {
        return Err(TaskError::ToolFailed {
            program: command.display(),
            status: status.describe(),
        });
    }

    let entry_name = spec
        .entry
        .file_name()
        .ok_or_else(|| TaskError::MissingFile(spec.entry.display().to_string()))?;
    let bundled = out_dir.join(entry_name);
    if !bundled.is_file() {
        return Err(TaskError::MissingFile(bundled.display().to_string()));
    }

    let artifact = out_dir.join(spec.artifact);
    fs::rename(&bundled, &artifact).map_err(|e| TaskError::io("rename", &bundled, e))?;

    Ok(artifact)
}
