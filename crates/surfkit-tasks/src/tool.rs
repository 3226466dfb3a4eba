//! External tool invocation.
//!
//! The bundler and the linter are opaque programs. Tasks describe them with a
//! [`ToolCommand`] and run them through a [`ToolRunner`].

use std::path::Path;
use std::process::Command;

use serde::Deserialize;

use crate::error::TaskError;

/// A program and its arguments.
///
/// Arguments may contain `{name}` variables that are filled in by
/// [`ToolCommand::expand`].
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ToolCommand {
    /// Executable name or path
    pub program: String,

    /// Arguments passed before any task-specific ones
    #[serde(default)]
    pub args: Vec<String>,
}

impl ToolCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Replace `{name}` in every argument with the matching value.
    pub fn expand(&self, vars: &[(&str, &str)]) -> Self {
        let args = self
            .args
            .iter()
            .map(|arg| {
                vars.iter().fold(arg.clone(), |arg, (name, value)| {
                    arg.replace(&format!("{{{}}}", name), value)
                })
            })
            .collect();

        Self {
            program: self.program.clone(),
            args,
        }
    }

    /// Append extra arguments.
    pub fn with_args<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(extra.into_iter().map(Into::into));
        self
    }

    /// Command line for log output.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Exit status of a tool run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolStatus {
    pub success: bool,

    /// Exit code, `None` if the process was terminated by a signal
    pub code: Option<i32>,
}

impl ToolStatus {
    pub fn success() -> Self {
        Self {
            success: true,
            code: Some(0),
        }
    }

    pub fn failure(code: i32) -> Self {
        Self {
            success: false,
            code: Some(code),
        }
    }

    /// Human-readable status for error messages.
    pub fn describe(&self) -> String {
        match self.code {
            Some(code) => format!("exit code {}", code),
            None => "a signal".to_string(),
        }
    }
}

/// Runs external tools.
pub trait ToolRunner: Send + Sync {
    /// Run `command` in `cwd` and wait for it to finish.
    ///
    /// Returns an error only if the process could not be started; a non-zero
    /// exit is reported through [`ToolStatus`].
    fn run(&self, command: &ToolCommand, cwd: &Path) -> Result<ToolStatus, TaskError>;
}

/// Runs tools as child processes sharing this process's stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ToolRunner for ProcessRunner {
    fn run(&self, command: &ToolCommand, cwd: &Path) -> Result<ToolStatus, TaskError> {
        tracing::debug!("Running {} in {}", command.display(), cwd.display());

        let status = Command::new(&command.program)
            .args(&command.args)
            .current_dir(cwd)
            .status()
            .map_err(|e| TaskError::ToolSpawn {
                program: command.program.clone(),
                message: e.to_string(),
            })?;

        Ok(ToolStatus {
            success: status.success(),
            code: status.code(),
        })
    }
}
