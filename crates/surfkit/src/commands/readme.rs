//! README generation command.

use std::path::Path;

use anyhow::Result;
use surfkit_readme::Freshness;

/// Run the readme command.
pub async fn run(config: &Path, check: bool) -> Result<()> {
    let pipeline = super::pipeline(config)?;

    if !check {
        pipeline.readme()?;
        return Ok(());
    }

    let output = pipeline.config().readme_config().output_path();
    match pipeline.check_readme()? {
        Freshness::Fresh => {
            tracing::info!("{} is up to date", output.display());
            Ok(())
        }
        Freshness::Stale => anyhow::bail!(
            "{} is out of date. Run 'surfkit readme' to regenerate it.",
            output.display()
        ),
    }
}
