//! Installing the artifact where Surfingkeys can load it.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::TaskError;

/// Directory the artifact is installed into: the override if given, the
/// user's home directory otherwise.
pub fn install_dir(override_dir: Option<&Path>) -> Result<PathBuf, TaskError> {
    match override_dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => dirs::home_dir().ok_or(TaskError::HomeDirUnavailable),
    }
}

/// Copy `artifact` into `dir`, keeping its file name.
pub fn install_artifact(artifact: &Path, dir: &Path) -> Result<PathBuf, TaskError> {
    if !artifact.is_file() {
        return Err(TaskError::MissingFile(artifact.display().to_string()));
    }

    let name = artifact
        .file_name()
        .ok_or_else(|| TaskError::MissingFile(artifact.display().to_string()))?;

    fs::create_dir_all(dir).map_err(|e| TaskError::io("create", dir, e))?;

    let target = dir.join(name);
    fs::copy(artifact, &target).map_err(|e| TaskError::io("copy", artifact, e))?;

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn copies_artifact() {
        let temp = tempdir().unwrap();
        let artifact = temp.path().join("build/.surfingkeys");
        fs::create_dir_all(artifact.parent().unwrap()).unwrap();
        fs::write(&artifact, "settings").unwrap();
        let home = temp.path().join("home");

        let installed = install_artifact(&artifact, &home).unwrap();

        assert_eq!(installed, home.join(".surfingkeys"));
        assert_eq!(fs::read_to_string(installed).unwrap(), "settings");
        assert!(artifact.exists());
    }

    #[test]
    fn errors_without_artifact() {
        let temp = tempdir().unwrap();

        let result = install_artifact(&temp.path().join(".surfingkeys"), temp.path());

        assert!(matches!(result, Err(TaskError::MissingFile(_))));
    }

    #[test]
    fn prefers_override_dir() {
        let dir = install_dir(Some(Path::new("/opt/surfingkeys"))).unwrap();

        assert_eq!(dir, PathBuf::from("/opt/surfingkeys"));
    }
}
