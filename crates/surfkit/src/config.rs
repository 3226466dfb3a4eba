//! Configuration file (surfkit.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use surfkit_tasks::{PipelineConfig, ToolCommand};

/// Configuration file structure. Every key is optional.
#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    project: ProjectConfig,
    private: PrivateSettings,
    readme: ReadmeSettings,
    build: BuildSettings,
    lint: LintSettings,
    install: InstallSettings,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct ProjectConfig {
    /// Scripts that make up the configuration
    scripts: Option<Vec<PathBuf>>,
    /// Bundler entry point
    entry: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct PrivateSettings {
    config: Option<PathBuf>,
    example: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct ReadmeSettings {
    template: Option<PathBuf>,
    output: Option<PathBuf>,
    screenshots: Option<PathBuf>,
    completions: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct BuildSettings {
    dir: Option<PathBuf>,
    artifact: Option<String>,
    clean: Option<Vec<PathBuf>>,
    bundler: Option<ToolCommand>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct LintSettings {
    command: Option<ToolCommand>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct InstallSettings {
    dir: Option<PathBuf>,
}

impl ConfigFile {
    /// Parse a config file's contents.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Apply the file's settings over the defaults. Relative paths are
    /// resolved against `root`.
    pub fn into_pipeline_config(self, root: PathBuf) -> PipelineConfig {
        let mut config = PipelineConfig {
            root,
            ..Default::default()
        };

        if let Some(scripts) = self.project.scripts {
            config.scripts = scripts;
        }
        if let Some(entry) = self.project.entry {
            config.entry = entry;
        }

        if let Some(path) = self.private.config {
            config.private_config = path;
        }
        if let Some(path) = self.private.example {
            config.private_example = path;
        }

        if let Some(path) = self.readme.template {
            config.readme.template = path;
        }
        if let Some(path) = self.readme.output {
            config.readme.output = path;
        }
        if let Some(path) = self.readme.screenshots {
            config.readme.screenshots = path;
        }
        if let Some(path) = self.readme.completions {
            config.readme.completions = path;
        }

        if let Some(dir) = self.build.dir {
            config.build_dir = dir;
        }
        if let Some(artifact) = self.build.artifact {
            config.artifact = artifact;
        }
        if let Some(clean) = self.build.clean {
            config.clean = clean;
        }
        if let Some(bundler) = self.build.bundler {
            config.bundler = bundler;
        }

        if let Some(linter) = self.lint.command {
            config.linter = linter;
        }

        config.install_dir = self.install.dir.map(|dir| config.root.join(dir));

        config
    }
}

/// Load the pipeline configuration for `path`.
///
/// A missing file means defaults; a file that exists but is malformed is an
/// error. The project root is the directory containing the config file.
pub fn load_config(path: &Path) -> Result<PipelineConfig> {
    let root = project_root(path);

    if !path.exists() {
        tracing::debug!("No {} found, using defaults", path.display());
        return Ok(ConfigFile::default().into_pipeline_config(root));
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file = ConfigFile::parse(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    tracing::info!("Loaded config from {}", path.display());

    Ok(file.into_pipeline_config(root))
}

fn project_root(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
