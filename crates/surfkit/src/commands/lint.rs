//! Lint command.

use std::path::Path;

use anyhow::Result;
use surfkit_tasks::LintOutcome;

/// Run the lint command.
///
/// Lint problems are reported by the linter itself and do not fail the
/// command, matching how `build` treats them.
pub async fn run(config: &Path) -> Result<()> {
    if super::pipeline(config)?.lint()? == LintOutcome::Clean {
        tracing::info!("Lint passed");
    }

    Ok(())
}
