//! Install command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use surfkit_tasks::{Pipeline, PipelineConfig};

use crate::config::load_config;

/// Run the install command.
pub async fn run(config: &Path, dir: Option<PathBuf>) -> Result<()> {
    let pipeline_config = install_config(config, dir)?;

    let result = Pipeline::new(pipeline_config).install()?;

    tracing::info!(
        "Reload Surfingkeys to pick up {} (built in {}ms)",
        result.installed.display(),
        result.build.duration_ms
    );

    Ok(())
}

/// Load the config and apply a `--dir` override. A relative override is
/// resolved against the project root, like `[install] dir`.
fn install_config(config: &Path, dir: Option<PathBuf>) -> Result<PipelineConfig> {
    let mut pipeline_config = load_config(config)?;
    if let Some(dir) = dir {
        pipeline_config.install_dir = Some(pipeline_config.root.join(dir));
    }

    Ok(pipeline_config)
}
