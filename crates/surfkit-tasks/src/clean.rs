//! Removal of build outputs and bundler caches.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::TaskError;

/// Remove each of `paths` under `root`, files or directories alike.
///
/// Paths that do not exist are skipped. Returns the number removed.
pub fn clean(root: &Path, paths: &[PathBuf]) -> Result<usize, TaskError> {
    let mut removed = 0;

    for path in paths {
        let full = root.join(path);

        let metadata = match fs::symlink_metadata(&full) {
            Ok(m) => m,
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(e) => return Err(TaskError::io("inspect", &full, e)),
        };

        if metadata.is_dir() {
            fs::remove_dir_all(&full).map_err(|e| TaskError::io("remove", &full, e))?;
        } else {
            fs::remove_file(&full).map_err(|e| TaskError::io("remove", &full, e))?;
        }

        tracing::debug!("Removed {}", full.display());
        removed += 1;
    }

    Ok(removed)
}
