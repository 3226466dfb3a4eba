//! Private config bootstrap command.

use std::path::Path;

use anyhow::Result;
use surfkit_tasks::PrivateConfig;

/// Run the check-priv command.
pub async fn run(config: &Path) -> Result<()> {
    let pipeline = super::pipeline(config)?;

    match pipeline.check_private()? {
        PrivateConfig::Created(path) => {
            tracing::info!("Edit {} to add your private settings", path.display());
        }
        PrivateConfig::Existing(path) => {
            tracing::debug!("{} already exists", path.display());
        }
    }

    Ok(())
}
