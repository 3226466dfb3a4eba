//! Build pipeline tasks for Surfingkeys configuration repositories.
//!
//! Each task is a plain function over the filesystem. External tools (the
//! bundler and the linter) are reached through the [`ToolRunner`] trait so the
//! pipeline can be driven without them in tests.

pub mod bundle;
pub mod clean;
pub mod error;
pub mod install;
pub mod lint;
pub mod pipeline;
pub mod private;
pub mod tool;

pub use error::TaskError;
pub use lint::LintOutcome;
pub use pipeline::{BuildResult, InstallResult, Pipeline, PipelineConfig};
pub use private::PrivateConfig;
pub use tool::{ProcessRunner, ToolCommand, ToolRunner, ToolStatus};
