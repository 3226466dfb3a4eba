//! Clean command.

use std::path::Path;

use anyhow::Result;

/// Run the clean command.
pub async fn run(config: &Path) -> Result<()> {
    super::pipeline(config)?.clean()?;
    Ok(())
}
