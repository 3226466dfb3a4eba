//! The build pipeline.
//!
//! `build` runs check-priv, clean, lint, readme and bundle in that order and
//! stops at the first failure. `install` runs `build` and then copies the
//! artifact into place.

use std::path::PathBuf;
use std::time::Instant;

use surfkit_readme::{Freshness, GenerateResult, ReadmeConfig, ReadmeGenerator};

use crate::bundle::{bundle, BundleSpec};
use crate::clean::clean;
use crate::error::TaskError;
use crate::install::{install_artifact, install_dir};
use crate::lint::{lint, LintOutcome};
use crate::private::{ensure_private_config, PrivateConfig};
use crate::tool::{ProcessRunner, ToolCommand, ToolRunner};

/// Configuration for the build pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Project root, all other paths are relative to it
    pub root: PathBuf,

    /// Scripts that make up the configuration (linted and watched)
    pub scripts: Vec<PathBuf>,

    /// Script the bundler starts from
    pub entry: PathBuf,

    /// Private config created on demand
    pub private_config: PathBuf,

    /// Committed example the private config is copied from
    pub private_example: PathBuf,

    /// Bundler output directory
    pub build_dir: PathBuf,

    /// File name of the bundled artifact
    pub artifact: String,

    /// Paths removed by `clean`
    pub clean: Vec<PathBuf>,

    /// Bundler invocation
    pub bundler: ToolCommand,

    /// Linter invocation, the scripts are appended
    pub linter: ToolCommand,

    /// Install directory, the home directory if unset
    pub install_dir: Option<PathBuf>,

    /// README generation settings (the root is taken from this config)
    pub readme: ReadmeConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            scripts: [
                "conf.priv.js",
                "completions.json",
                "conf.js",
                "actions.js",
                "help.js",
                "keys.js",
                "util.js",
            ]
            .into_iter()
            .map(PathBuf::from)
            .collect(),
            entry: PathBuf::from("conf.js"),
            private_config: PathBuf::from("conf.priv.js"),
            private_example: PathBuf::from("conf.priv.example.js"),
            build_dir: PathBuf::from("build"),
            artifact: ".surfingkeys".to_string(),
            clean: ["build", ".cache", ".parcel-cache"]
                .into_iter()
                .map(PathBuf::from)
                .collect(),
            bundler: ToolCommand::new(
                "npx",
                [
                    "parcel",
                    "build",
                    "{entry}",
                    "--dist-dir",
                    "{out_dir}",
                    "--no-source-maps",
                ],
            ),
            linter: ToolCommand::new("npx", ["eslint"]),
            install_dir: None,
            readme: ReadmeConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// README settings rooted at the project root.
    pub fn readme_config(&self) -> ReadmeConfig {
        ReadmeConfig {
            root: self.root.clone(),
            ..self.readme.clone()
        }
    }

    /// Location of the bundled artifact.
    pub fn artifact_path(&self) -> PathBuf {
        self.root.join(&self.build_dir).join(&self.artifact)
    }
}

/// Result of a build.
#[derive(Debug)]
pub struct BuildResult {
    pub private: PrivateConfig,

    /// Number of paths removed by clean
    pub cleaned: usize,

    pub lint: LintOutcome,

    pub readme: GenerateResult,

    /// Bundled artifact
    pub artifact: PathBuf,

    /// Total build time in milliseconds
    pub duration_ms: u64,
}

/// Result of an install.
#[derive(Debug)]
pub struct InstallResult {
    pub build: BuildResult,

    /// Installed artifact
    pub installed: PathBuf,
}

/// Runs the pipeline tasks for one project.
pub struct Pipeline<R = ProcessRunner> {
    config: PipelineConfig,
    runner: R,
}

impl Pipeline<ProcessRunner> {
    /// Create a pipeline that runs tools as child processes.
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_runner(config, ProcessRunner::new())
    }
}

impl<R: ToolRunner> Pipeline<R> {
    /// Create a pipeline with a custom tool runner.
    pub fn with_runner(config: PipelineConfig, runner: R) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Create the private config from its example if it is missing.
    pub fn check_private(&self) -> Result<PrivateConfig, TaskError> {
        ensure_private_config(
            &self.config.root.join(&self.config.private_config),
            &self.config.root.join(&self.config.private_example),
        )
    }

    /// Remove build outputs and caches.
    pub fn clean(&self) -> Result<usize, TaskError> {
        let removed = clean(&self.config.root, &self.config.clean)?;
        tracing::info!("Cleaned {} paths", removed);
        Ok(removed)
    }

    /// Lint the scripts.
    pub fn lint(&self) -> Result<LintOutcome, TaskError> {
        lint(
            &self.runner,
            &self.config.linter,
            &self.config.root,
            &self.config.scripts,
        )
    }

    /// Regenerate the README.
    pub fn readme(&self) -> Result<GenerateResult, TaskError> {
        let result = ReadmeGenerator::new(self.config.readme_config()).generate()?;

        tracing::info!(
            "Generated {} with {} completions and {} screenshots in {}ms",
            result.output.display(),
            result.completions,
            result.screenshots,
            result.duration_ms
        );

        Ok(result)
    }

    /// Compare the README on disk with a fresh render.
    pub fn check_readme(&self) -> Result<Freshness, TaskError> {
        Ok(ReadmeGenerator::new(self.config.readme_config()).check()?)
    }

    /// Bundle the entry script into the artifact.
    pub fn bundle(&self) -> Result<PathBuf, TaskError> {
        let artifact = bundle(
            &self.runner,
            &self.config.bundler,
            &BundleSpec {
                root: &self.config.root,
                entry: &self.config.entry,
                out_dir: &self.config.build_dir,
                artifact: &self.config.artifact,
            },
        )?;

        tracing::info!("Bundled {}", artifact.display());
        Ok(artifact)
    }

    /// Run check-priv, clean, lint, readme and bundle.
    pub fn build(&self) -> Result<BuildResult, TaskError> {
        let start = Instant::now();

        let private = self.check_private()?;
        let cleaned = self.clean()?;
        let lint = self.lint()?;
        let readme = self.readme()?;
        let artifact = self.bundle()?;

        Ok(BuildResult {
            private,
            cleaned,
            lint,
            readme,
            artifact,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Build, then copy the artifact into the install directory.
    pub fn install(&self) -> Result<InstallResult, TaskError> {
        let dir = install_dir(self.config.install_dir.as_deref())?;
        let build = self.build()?;

        let installed = install_artifact(&build.artifact, &dir)?;
        tracing::info!("Installed {}", installed.display());

        Ok(InstallResult { build, installed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::testing::ScriptedRunner;
    use crate::tool::ToolStatus;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::Path;
    use tempfile::{tempdir, TempDir};

    const TEMPLATE: &str = "<!--{{DISCLAIMER}}-->\n<!--{{COMPL_COUNT}}-->\n<!--{{COMPL_TABLE}}-->\n<!--{{SCREENSHOTS}}-->\n";

    fn project() -> (TempDir, PipelineConfig) {
        let temp = tempdir().unwrap();
        let root = temp.path();

        fs::write(root.join("conf.js"), "// entry").unwrap();
        fs::write(root.join("conf.priv.example.js"), "// example").unwrap();
        fs::write(root.join("README.tmpl.md"), TEMPLATE).unwrap();
        fs::write(
            root.join("completions.json"),
            r#"{"d": {"alias": "d", "name": "DuckDuckGo", "search": "https://duckduckgo.com/"}}"#,
        )
        .unwrap();
        fs::create_dir_all(root.join("assets/screenshots")).unwrap();
        fs::create_dir_all(root.join(".parcel-cache")).unwrap();

        let config = PipelineConfig {
            root: root.to_path_buf(),
            install_dir: Some(root.join("home")),
            linter: ToolCommand::new("eslint", Vec::<String>::new()),
            bundler: ToolCommand::new("parcel", ["{entry}", "{out_dir}"]),
            ..Default::default()
        };

        (temp, config)
    }

    /// Lints successfully and fakes parcel by copying the entry.
    fn fake_tools() -> ScriptedRunner {
        ScriptedRunner::new(|command, cwd: &Path| {
            if command.program == "parcel" {
                let out = cwd.join(&command.args[1]).join(&command.args[0]);
                fs::copy(cwd.join(&command.args[0]), out).unwrap();
            }
            ToolStatus::success()
        })
    }

    #[test]
    fn builds_and_installs() {
        let (temp, config) = project();
        let pipeline = Pipeline::with_runner(config, fake_tools());

        let result = pipeline.install().unwrap();

        assert_eq!(
            result.build.private,
            PrivateConfig::Created(temp.path().join("conf.priv.js"))
        );
        assert_eq!(result.build.cleaned, 1);
        assert_eq!(result.build.lint, LintOutcome::Clean);
        assert_eq!(result.build.readme.completions, 1);
        assert_eq!(result.installed, temp.path().join("home/.surfingkeys"));
        assert_eq!(fs::read_to_string(&result.installed).unwrap(), "// entry");
        assert!(fs::read_to_string(temp.path().join("README.md"))
            .unwrap()
            .contains("| `d` | `DuckDuckGo` | `duckduckgo.com` |  |"));
        assert_eq!(pipeline.runner.programs(), vec!["eslint", "parcel"]);
    }

    #[test]
    fn lint_problems_do_not_stop_the_build() {
        let (_temp, config) = project();
        let runner = ScriptedRunner::new(|command, cwd: &Path| {
            if command.program == "eslint" {
                return ToolStatus::failure(1);
            }
            let out = cwd.join(&command.args[1]).join(&command.args[0]);
            fs::copy(cwd.join(&command.args[0]), out).unwrap();
            ToolStatus::success()
        });
        let pipeline = Pipeline::with_runner(config, runner);

        let result = pipeline.build().unwrap();

        assert_eq!(result.lint, LintOutcome::Problems { code: Some(1) });
        assert!(result.artifact.exists());
    }

    #[test]
    fn readme_failure_aborts_before_bundling() {
        let (temp, config) = project();
        fs::remove_file(temp.path().join("README.tmpl.md")).unwrap();
        let pipeline = Pipeline::with_runner(config, fake_tools());

        let result = pipeline.build();

        assert!(matches!(result, Err(TaskError::Readme(_))));
        assert_eq!(pipeline.runner.programs(), vec!["eslint"]);
    }

    #[test]
    fn check_readme_reports_freshness() {
        let (_temp, config) = project();
        let pipeline = Pipeline::with_runner(config, fake_tools());

        assert_eq!(pipeline.check_readme().unwrap(), Freshness::Stale);
        pipeline.readme().unwrap();
        assert_eq!(pipeline.check_readme().unwrap(), Freshness::Fresh);
    }
}
