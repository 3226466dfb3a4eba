//! Task errors.

use std::io;
use std::path::Path;

use surfkit_readme::ReadmeError;

/// Errors that can occur while running a pipeline task.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("Failed to {action} {path}: {message}")]
    Io {
        action: &'static str,
        path: String,
        message: String,
    },

    #[error("File not found: {0}")]
    MissingFile(String),

    #[error("Failed to start {program}: {message}")]
    ToolSpawn { program: String, message: String },

    #[error("{program} exited with {status}")]
    ToolFailed { program: String, status: String },

    #[error("Could not determine the home directory; set [install] dir in the config")]
    HomeDirUnavailable,

    #[error(transparent)]
    Readme(#[from] ReadmeError),
}

impl TaskError {
    pub(crate) fn io(action: &'static str, path: &Path, err: io::Error) -> Self {
        Self::Io {
            action,
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}
