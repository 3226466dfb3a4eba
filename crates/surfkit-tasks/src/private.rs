//! Private configuration bootstrap.
//!
//! `conf.priv.js` holds API keys and is not committed. On a fresh checkout it
//! is created from the committed example.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::TaskError;

/// Outcome of [`ensure_private_config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrivateConfig {
    /// The private config already existed and was left alone
    Existing(PathBuf),

    /// The private config was created from the example
    Created(PathBuf),
}

/// Create `config` from `example` unless it already exists.
///
/// The copy uses exclusive create, so an existing file is never overwritten.
pub fn ensure_private_config(config: &Path, example: &Path) -> Result<PrivateConfig, TaskError> {
    if config.exists() {
        return Ok(PrivateConfig::Existing(config.to_path_buf()));
    }

    let mut source = match File::open(example) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(TaskError::MissingFile(example.display().to_string()));
        }
        Err(e) => return Err(TaskError::io("read", example, e)),
    };

    tracing::info!(
        "Creating {} based on {}",
        config.display(),
        example.display()
    );

    let mut target = match OpenOptions::new().write(true).create_new(true).open(config) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Ok(PrivateConfig::Existing(config.to_path_buf()));
        }
        Err(e) => return Err(TaskError::io("create", config, e)),
    };

    if let Err(e) = io::copy(&mut source, &mut target) {
        // Do not leave a half-written private config behind.
        drop(target);
        let _ = fs::remove_file(config);
        return Err(TaskError::io("write", config, e));
    }

    Ok(PrivateConfig::Created(config.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_from_example_when_missing() {
        let temp = tempdir().unwrap();
        let config = temp.path().join("conf.priv.js");
        let example = temp.path().join("conf.priv.example.js");
        fs::write(&example, "module.exports = { keys: {} }\n").unwrap();

        let result = ensure_private_config(&config, &example).unwrap();

        assert_eq!(result, PrivateConfig::Created(config.clone()));
        assert_eq!(
            fs::read_to_string(&config).unwrap(),
            "module.exports = { keys: {} }\n"
        );
    }

    #[test]
    fn keeps_existing_config() {
        let temp = tempdir().unwrap();
        let config = temp.path().join("conf.priv.js");
        let example = temp.path().join("conf.priv.example.js");
        fs::write(&config, "mine").unwrap();
        fs::write(&example, "example").unwrap();

        let result = ensure_private_config(&config, &example).unwrap();

        assert_eq!(result, PrivateConfig::Existing(config.clone()));
        assert_eq!(fs::read_to_string(&config).unwrap(), "mine");
    }

    #[test]
    fn errors_when_example_missing() {
        let temp = tempdir().unwrap();

        let result = ensure_private_config(
            &temp.path().join("conf.priv.js"),
            &temp.path().join("conf.priv.example.js"),
        );

        assert!(matches!(result, Err(TaskError::MissingFile(_))));
        assert!(!temp.path().join("conf.priv.js").exists());
    }
}
