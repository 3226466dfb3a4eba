//! Initialize surfkit in a Surfingkeys config repository.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::load_config;

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing surfkit...");

    // Create default config
    if !config_path.exists() || yes {
        fs::write(config_path, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        tracing::info!("Created {}", config_path.display());
    } else {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
    }

    let config = load_config(config_path)?;
    let readme = config.readme_config();

    // Create README template
    let template_path = readme.template_path();
    if !template_path.exists() || yes {
        fs::write(&template_path, DEFAULT_TEMPLATE)
            .with_context(|| format!("Failed to write {}", template_path.display()))?;
        tracing::info!("Created {}", template_path.display());
    }

    // Create screenshots directory
    let screenshots = readme.screenshots_path();
    if !screenshots.exists() {
        fs::create_dir_all(&screenshots).context("Failed to create screenshots directory")?;
        tracing::info!("Created {}", screenshots.display());
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'surfkit install' to build and install your config.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# surfkit configuration

[project]
# Scripts that make up the config (linted and watched)
scripts = ["conf.priv.js", "completions.json", "conf.js", "actions.js", "help.js", "keys.js", "util.js"]

# Bundler entry point
entry = "conf.js"

[private]
# Private settings, created from the example when missing
config = "conf.priv.js"
example = "conf.priv.example.js"

[readme]
template = "README.tmpl.md"
output = "README.md"
screenshots = "assets/screenshots"
completions = "completions.json"

[build]
dir = "build"
artifact = ".surfingkeys"
clean = ["build", ".cache", ".parcel-cache"]
bundler = { program = "npx", args = ["parcel", "build", "{entry}", "--dist-dir", "{out_dir}", "--no-source-maps"] }

[lint]
command = { program = "npx", args = ["eslint"] }

[install]
# Defaults to your home directory
# dir = "/path/to/dir"
"#;

const DEFAULT_TEMPLATE: &str = r#"<!--{{DISCLAIMER}}-->
# Surfingkeys Configuration

## Search Completions

<!--{{COMPL_COUNT}}--> search engines are available from the omnibar.

| Alias | Name | Domain | Screenshot |
| :---- | :--- | :----- | :--------- |
<!--{{COMPL_TABLE}}-->

## Screenshots

<!--{{SCREENSHOTS}}-->
"#;
