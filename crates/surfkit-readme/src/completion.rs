//! Completion metadata loading.
//!
//! A completion is a search integration exposed by the Surfingkeys config.
//! The README lists every completion in a table keyed by its alias.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// A single completion entry.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Completion {
    /// Short key typed in the omnibar
    pub alias: String,

    /// Human-readable name
    pub name: String,

    /// Search URL, the hostname is shown in the README table
    pub search: String,
}

impl Completion {
    /// Create a new completion entry.
    pub fn new(alias: impl Into<String>, name: impl Into<String>, search: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            name: name.into(),
            search: search.into(),
        }
    }
}

/// All completions, keyed by their table key.
///
/// Iteration is always in ascending key order so rendering is deterministic.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct CompletionTable {
    entries: BTreeMap<String, Completion>,
}

impl CompletionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a completion under the given key, replacing any previous entry.
    pub fn insert(&mut self, key: impl Into<String>, completion: Completion) {
        self.entries.insert(key.into(), completion);
    }

    /// Number of completions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, completion)` pairs in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Completion)> {
        self.entries.iter().map(|(k, c)| (k.as_str(), c))
    }
}

impl<K: Into<String>> FromIterator<(K, Completion)> for CompletionTable {
    fn from_iter<I: IntoIterator<Item = (K, Completion)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, c)| (k.into(), c)).collect(),
        }
    }
}

/// Errors that can occur when loading completions.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("Failed to read completions {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("Failed to parse completions {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Unsupported completions format: {0} (expected .json, .yaml, .yml or .toml)")]
    UnsupportedFormat(String),
}

/// A source of completion metadata.
pub trait CompletionSource {
    /// Load the full completion table.
    fn load(&self) -> Result<CompletionTable, CompletionError>;
}

impl CompletionSource for CompletionTable {
    fn load(&self) -> Result<CompletionTable, CompletionError> {
        Ok(self.clone())
    }
}

/// Supported on-disk formats for completion metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    Toml,
}

impl Format {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Some(Self::Json),
            Some("yaml") | Some("yml") => Some(Self::Yaml),
            Some("toml") => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Completions stored in a JSON, YAML or TOML data file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CompletionSource for FileSource {
    fn load(&self) -> Result<CompletionTable, CompletionError> {
        let path_str = self.path.display().to_string();

        let format = Format::from_path(&self.path)
            .ok_or_else(|| CompletionError::UnsupportedFormat(path_str.clone()))?;

        let content = fs::read_to_string(&self.path).map_err(|e| CompletionError::ReadError {
            path: path_str.clone(),
            message: e.to_string(),
        })?;

        let parsed: Result<CompletionTable, String> = match format {
            Format::Json => serde_json::from_str(&content).map_err(|e| e.to_string()),
            Format::Yaml => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
            Format::Toml => toml::from_str(&content).map_err(|e| e.to_string()),
        };

        let table = parsed.map_err(|message| CompletionError::ParseError {
            path: path_str.clone(),
            message,
        })?;

        tracing::debug!("Loaded {} completions from {}", table.len(), path_str);

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn iterates_in_sorted_key_order() {
        let table: CompletionTable = [
            ("g", Completion::new("g", "Google", "https://www.google.com/search")),
            ("d", Completion::new("d", "DuckDuckGo", "https://duckduckgo.com/")),
            ("am", Completion::new("am", "Amazon", "https://www.amazon.com/s")),
        ]
        .into_iter()
        .collect();

        let keys: Vec<&str> = table.iter().map(|(k, _)| k).collect();

        assert_eq!(keys, vec!["am", "d", "g"]);
    }

    #[test]
    fn loads_json_and_ignores_extra_fields() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("completions.json");
        fs::write(
            &path,
            r#"{
  "gh": {
    "alias": "gh",
    "name": "github",
    "search": "https://github.com/search?q=",
    "compl": "https://api.github.com/search/repositories?q="
  }
}"#,
        )
        .unwrap();

        let table = FileSource::new(&path).load().unwrap();

        assert_eq!(table.len(), 1);
        let (key, entry) = table.iter().next().unwrap();
        assert_eq!(key, "gh");
        assert_eq!(entry.name, "github");
    }

    #[test]
    fn loads_yaml() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("completions.yml");
        fs::write(
            &path,
            "d:\n  alias: d\n  name: DuckDuckGo\n  search: https://duckduckgo.com/\n",
        )
        .unwrap();

        let table = FileSource::new(&path).load().unwrap();

        assert_eq!(table.len(), 1);
    }

    #[test]
    fn loads_toml() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("completions.toml");
        fs::write(
            &path,
            "[d]\nalias = \"d\"\nname = \"DuckDuckGo\"\nsearch = \"https://duckduckgo.com/\"\n",
        )
        .unwrap();

        let table = FileSource::new(&path).load().unwrap();

        assert_eq!(table.len(), 1);
    }

    #[test]
    fn errors_on_missing_search_field() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("completions.json");
        fs::write(&path, r#"{"d": {"alias": "d", "name": "DuckDuckGo"}}"#).unwrap();

        let result = FileSource::new(&path).load();

        assert!(matches!(result, Err(CompletionError::ParseError { .. })));
    }

    #[test]
    fn errors_on_missing_file() {
        let temp = tempdir().unwrap();

        let result = FileSource::new(temp.path().join("completions.json")).load();

        assert!(matches!(result, Err(CompletionError::ReadError { .. })));
    }

    #[test]
    fn rejects_unknown_extension() {
        let result = FileSource::new("completions.js").load();

        assert!(matches!(result, Err(CompletionError::UnsupportedFormat(_))));
    }
}
