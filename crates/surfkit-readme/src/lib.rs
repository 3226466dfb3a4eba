//! README generator for Surfingkeys configuration repositories.
//!
//! Fills the placeholder markers of a README template with a table of search
//! completions and the screenshots that belong to them.

pub mod completion;
pub mod generator;
pub mod screenshots;
pub mod table;
pub mod template;

pub use completion::{Completion, CompletionError, CompletionSource, CompletionTable, FileSource};
pub use generator::{
    Freshness, GenerateResult, ReadmeConfig, ReadmeError, ReadmeGenerator, RenderedReadme,
};
pub use screenshots::{Screenshot, ScreenshotError, ScreenshotIndex};
pub use table::{render_sections, RenderError, Sections};
pub use template::{MarkerReport, Placeholder};
