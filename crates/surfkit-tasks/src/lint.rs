//! Script linting.

use std::path::{Path, PathBuf};

use crate::error::TaskError;
use crate::tool::{ToolCommand, ToolRunner};

/// Result of a lint run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintOutcome {
    /// Linter passed, or there was nothing to lint
    Clean,

    /// Linter reported problems. The build carries on.
    Problems { code: Option<i32> },
}

/// Extensions handed to the linter. Data files such as `completions.json`
/// are watched but never linted.
const SCRIPT_EXTENSIONS: &[&str] = &["js", "mjs", "cjs"];

/// Run `linter` over the scripts that exist under `root`.
///
/// Non-script files are skipped. Scripts that are missing are skipped with a
/// warning. A failing lint is
/// reported but is not an error; only a linter that cannot be started is.
pub fn lint(
    runner: &impl ToolRunner,
    linter: &ToolCommand,
    root: &Path,
    scripts: &[PathBuf],
) -> Result<LintOutcome, TaskError> {
    let files: Vec<String> = scripts
        .iter()
        .filter(|script| {
            let lintable = is_script(script);
            if !lintable {
                tracing::debug!("Not linting data file: {}", script.display());
            }
            lintable
        })
        .filter(|script| {
            let exists = root.join(script).exists();
            if !exists {
                tracing::warn!("Skipping missing script: {}", script.display());
            }
            exists
        })
        .map(|script| script.to_string_lossy().into_owned())
        .collect();

    if files.is_empty() {
        tracing::debug!("No scripts to lint");
        return Ok(LintOutcome::Clean);
    }

    let command = linter.clone().with_args(files);
    let status = runner.run(&command, root)?;

    if status.success {
        Ok(LintOutcome::Clean)
    } else {
        tracing::warn!(
            "{} reported problems ({})",
            linter.program,
            status.describe()
        );
        Ok(LintOutcome::Problems { code: status.code })
    }
}

fn is_script(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SCRIPT_EXTENSIONS.contains(&e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::testing::ScriptedRunner;
    use crate::tool::ToolStatus;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn lints_existing_scripts_only() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("conf.js"), "").unwrap();
        fs::write(temp.path().join("keys.js"), "").unwrap();
        let runner = ScriptedRunner::succeeding();

        let outcome = lint(
            &runner,
            &ToolCommand::new("npx", ["eslint"]),
            temp.path(),
            &[
                PathBuf::from("conf.js"),
                PathBuf::from("missing.js"),
                PathBuf::from("keys.js"),
            ],
        )
        .unwrap();

        assert_eq!(outcome, LintOutcome::Clean);
        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls[0].args, vec!["eslint", "conf.js", "keys.js"]);
    }

    #[test]
    fn does_not_lint_completions_data() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("conf.js"), "").unwrap();
        fs::write(temp.path().join("completions.json"), "{}").unwrap();
        let runner = ScriptedRunner::succeeding();

        lint(
            &runner,
            &ToolCommand::new("npx", ["eslint"]),
            temp.path(),
            &[PathBuf::from("completions.json"), PathBuf::from("conf.js")],
        )
        .unwrap();

        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls[0].args, vec!["eslint", "conf.js"]);
    }

    #[test]
    fn problems_are_not_errors() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("conf.js"), "").unwrap();
        let runner = ScriptedRunner::new(|_, _| ToolStatus::failure(1));

        let outcome = lint(
            &runner,
            &ToolCommand::new("eslint", Vec::<String>::new()),
            temp.path(),
            &[PathBuf::from("conf.js")],
        )
        .unwrap();

        assert_eq!(outcome, LintOutcome::Problems { code: Some(1) });
    }

    #[test]
    fn skips_linter_without_scripts() {
        let temp = tempdir().unwrap();
        let runner = ScriptedRunner::succeeding();

        let outcome = lint(
            &runner,
            &ToolCommand::new("eslint", Vec::<String>::new()),
            temp.path(),
            &[PathBuf::from("conf.js")],
        )
        .unwrap();

        assert_eq!(outcome, LintOutcome::Clean);
        assert!(runner.programs().is_empty());
    }
}
