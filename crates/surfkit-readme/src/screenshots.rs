//! Screenshot discovery and grouping.
//!
//! Screenshots live in a flat directory and are named `<alias>.png` or
//! `<alias>-<n>.png`. Every file sharing an alias belongs to one group.

use std::collections::HashMap;
use std::path::Path;

use walkdir::WalkDir;

/// A screenshot file belonging to a completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screenshot {
    /// Alias parsed from the file name
    pub alias: String,

    /// Link path relative to the project root, always `/`-separated
    pub link: String,
}

/// Screenshots grouped by alias.
#[derive(Debug, Clone, Default)]
pub struct ScreenshotIndex {
    groups: HashMap<String, Vec<Screenshot>>,
    total: usize,
}

/// Errors that can occur when scanning screenshots.
#[derive(Debug, thiserror::Error)]
pub enum ScreenshotError {
    #[error("Screenshots directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("Failed to read screenshots directory: {0}")]
    ReadError(String),
}

impl ScreenshotIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan `root/dir` for screenshots.
    ///
    /// `dir` is kept relative so it can be used verbatim in README links.
    /// Files are visited in [`ordinal_key`] order, so ordinals within a group
    /// do not depend on the filesystem's listing order.
    pub fn scan(root: &Path, dir: &Path) -> Result<Self, ScreenshotError> {
        let full = root.join(dir);
        if !full.is_dir() {
            return Err(ScreenshotError::DirectoryNotFound(full.display().to_string()));
        }

        let prefix = link_prefix(dir);
        let mut index = Self::new();

        for entry in WalkDir::new(&full)
            .min_depth(1)
            .max_depth(1)
            .sort_by(|a, b| {
                let a = a.file_name().to_string_lossy();
                let b = b.file_name().to_string_lossy();
                ordinal_key(&a).cmp(&ordinal_key(&b))
            })
        {
            let entry = entry.map_err(|e| ScreenshotError::ReadError(e.to_string()))?;

            if entry.file_type().is_dir() {
                continue;
            }

            let Some(file_name) = entry.file_name().to_str() else {
                tracing::warn!("Skipping non UTF-8 screenshot: {}", entry.path().display());
                continue;
            };

            let link = if prefix.is_empty() {
                file_name.to_string()
            } else {
                format!("{}/{}", prefix, file_name)
            };

            index.push(Screenshot {
                alias: alias_of(file_name).to_string(),
                link,
            });
        }

        Ok(index)
    }

    /// Add a screenshot to the end of its alias group.
    pub fn push(&mut self, screenshot: Screenshot) {
        self.groups
            .entry(screenshot.alias.clone())
            .or_default()
            .push(screenshot);
        self.total += 1;
    }

    /// Screenshots for an alias, in ordinal order. Empty if there are none.
    pub fn group(&self, alias: &str) -> &[Screenshot] {
        self.groups.get(alias).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of screenshots discovered, including orphans.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Parse the alias from a screenshot file name.
///
/// The `.png` extension is stripped and everything from the first hyphen on is
/// dropped: `gh-2.png` -> `gh`.
pub fn alias_of(file_name: &str) -> &str {
    let stem = file_name.strip_suffix(".png").unwrap_or(file_name);
    stem.split('-').next().unwrap_or(stem)
}

/// Sort key placing `<alias>.png` first, then numeric suffixes ascending,
/// then any other suffix by name.
pub fn ordinal_key(file_name: &str) -> (&str, u64, &str) {
    let stem = file_name.strip_suffix(".png").unwrap_or(file_name);
    match stem.split_once('-') {
        None => (stem, 0, ""),
        Some((alias, rest)) => (alias, rest.parse().unwrap_or(u64::MAX), rest),
    }
}

fn link_prefix(dir: &Path) -> String {
    dir.to_string_lossy()
        .replace('\\', "/")
        .trim_end_matches('/')
        .to_string()
}
