//! README generator.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::completion::{CompletionError, CompletionSource, FileSource};
use crate::screenshots::{ScreenshotError, ScreenshotIndex};
use crate::table::{render_sections, RenderError};
use crate::template::{render_disclaimer, scan_markers, substitute, Placeholder};

/// Configuration for generating the README.
#[derive(Debug, Clone)]
pub struct ReadmeConfig {
    /// Project root, all other paths are relative to it
    pub root: PathBuf,

    /// Template containing the placeholder markers
    pub template: PathBuf,

    /// Generated document
    pub output: PathBuf,

    /// Screenshots directory (also used verbatim in image links)
    pub screenshots: PathBuf,

    /// Completion metadata file
    pub completions: PathBuf,
}

impl Default for ReadmeConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            template: PathBuf::from("README.tmpl.md"),
            output: PathBuf::from("README.md"),
            screenshots: PathBuf::from("assets/screenshots"),
            completions: PathBuf::from("completions.json"),
        }
    }
}

impl ReadmeConfig {
    pub fn template_path(&self) -> PathBuf {
        self.root.join(&self.template)
    }

    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.output)
    }

    pub fn completions_path(&self) -> PathBuf {
        self.root.join(&self.completions)
    }

    pub fn screenshots_path(&self) -> PathBuf {
        self.root.join(&self.screenshots)
    }
}

/// A rendered README that has not been written yet.
#[derive(Debug, Clone)]
pub struct RenderedReadme {
    /// Full document text
    pub content: String,

    /// Number of completions in the table
    pub completions: usize,

    /// Number of screenshot files discovered
    pub screenshots: usize,
}

/// Result of a generate operation.
#[derive(Debug)]
pub struct GenerateResult {
    /// Number of completions in the table
    pub completions: usize,

    /// Number of screenshot files discovered
    pub screenshots: usize,

    /// Total generation time in milliseconds
    pub duration_ms: u64,

    /// Written document
    pub output: PathBuf,
}

/// Whether the README on disk matches what would be generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Fresh,
    Stale,
}

/// Errors that can occur during generation.
#[derive(Debug, thiserror::Error)]
pub enum ReadmeError {
    #[error("Failed to read template {path}: {message}")]
    TemplateRead { path: String, message: String },

    #[error(transparent)]
    Completions(#[from] CompletionError),

    #[error(transparent)]
    Screenshots(#[from] ScreenshotError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Failed to render disclaimer: {0}")]
    Disclaimer(String),

    #[error("Failed to read {path}: {message}")]
    OutputRead { path: String, message: String },

    #[error("Failed to write {path}: {message}")]
    WriteError { path: String, message: String },
}

/// README generator.
pub struct ReadmeGenerator {
    config: ReadmeConfig,
}

impl ReadmeGenerator {
    /// Create a new generator.
    pub fn new(config: ReadmeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReadmeConfig {
        &self.config
    }

    /// Render the README using the configured completions file.
    pub fn render(&self) -> Result<RenderedReadme, ReadmeError> {
        self.render_with(&FileSource::new(self.config.completions_path()))
    }

    /// Render the README from an arbitrary completion source.
    ///
    /// Nothing is written; every input is read and validated first.
    pub fn render_with(&self, source: &impl CompletionSource) -> Result<RenderedReadme, ReadmeError> {
        let completions = source.load()?;
        let screenshots = ScreenshotIndex::scan(&self.config.root, &self.config.screenshots)?;

        let template_path = self.config.template_path();
        let template =
            fs::read_to_string(&template_path).map_err(|e| ReadmeError::TemplateRead {
                path: template_path.display().to_string(),
                message: e.to_string(),
            })?;

        let report = scan_markers(&template);
        for placeholder in &report.missing {
            tracing::warn!(
                "Template {} has no {} marker",
                template_path.display(),
                placeholder.marker()
            );
        }
        for placeholder in &report.duplicated {
            tracing::warn!(
                "Template {} has {} more than once",
                template_path.display(),
                placeholder.marker()
            );
        }
        for name in &report.unknown {
            tracing::warn!(
                "Template {} has unknown marker <!--{{{{{}}}}}-->",
                template_path.display(),
                name
            );
        }

        let sections = render_sections(&completions, &screenshots)?;
        let disclaimer = render_disclaimer(&template_source_name(&self.config.template))
            .map_err(|e| ReadmeError::Disclaimer(e.to_string()))?;
        let count = completions.len().to_string();

        let content = substitute(
            &template,
            &[
                (Placeholder::Disclaimer, &disclaimer),
                (Placeholder::Count, &count),
                (Placeholder::Table, &sections.table),
                (Placeholder::Screenshots, &sections.screenshots),
            ],
        );

        Ok(RenderedReadme {
            content,
            completions: completions.len(),
            screenshots: screenshots.len(),
        })
    }

    /// Render and write the README using the configured completions file.
    pub fn generate(&self) -> Result<GenerateResult, ReadmeError> {
        self.generate_with(&FileSource::new(self.config.completions_path()))
    }

    /// Render and write the README from an arbitrary completion source.
    pub fn generate_with(
        &self,
        source: &impl CompletionSource,
    ) -> Result<GenerateResult, ReadmeError> {
        let start = Instant::now();

        let rendered = self.render_with(source)?;

        let output = self.config.output_path();
        fs::write(&output, &rendered.content).map_err(|e| ReadmeError::WriteError {
            path: output.display().to_string(),
            message: e.to_string(),
        })?;

        Ok(GenerateResult {
            completions: rendered.completions,
            screenshots: rendered.screenshots,
            duration_ms: start.elapsed().as_millis() as u64,
            output,
        })
    }

    /// Compare the README on disk against a fresh render without writing.
    pub fn check(&self) -> Result<Freshness, ReadmeError> {
        let rendered = self.render()?;

        let output = self.config.output_path();
        let existing = match fs::read_to_string(&output) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                return Err(ReadmeError::OutputRead {
                    path: output.display().to_string(),
                    message: e.to_string(),
                })
            }
        };

        if existing.as_deref() == Some(rendered.content.as_str()) {
            Ok(Freshness::Fresh)
        } else {
            Ok(Freshness::Stale)
        }
    }
}

/// Template name shown in the disclaimer.
fn template_source_name(template: &Path) -> String {
    template
        .file_name()
        .and_then(|f| f.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| template.display().to_string())
}
