//! Build command.

use std::path::Path;

use anyhow::Result;

/// Run the build command.
pub async fn run(config: &Path) -> Result<()> {
    tracing::info!("Building Surfingkeys config...");

    let result = super::pipeline(config)?.build()?;

    tracing::info!(
        "Built {} in {}ms",
        result.artifact.display(),
        result.duration_ms
    );

    Ok(())
}
