//! File watching for rebuilds.

use std::path::{Path, PathBuf};
use std::sync::mpsc;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

/// Events emitted by the file watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// A configuration script or the completions data changed
    ScriptChanged(PathBuf),

    /// The README template changed
    TemplateChanged(PathBuf),

    /// A screenshot was added, removed or modified
    ScreenshotChanged(PathBuf),

    /// The surfkit config file changed
    ConfigChanged(PathBuf),
}

/// The files a project cares about, as absolute paths.
#[derive(Debug, Clone, Default)]
pub struct WatchSet {
    root: PathBuf,
    scripts: Vec<PathBuf>,
    templates: Vec<PathBuf>,
    screenshots: Option<PathBuf>,
    config: Option<PathBuf>,
}

impl WatchSet {
    /// Create a set rooted at `root`. Relative paths added later are resolved
    /// against it.
    pub fn new(root: &Path) -> Self {
        let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
        Self {
            root,
            ..Default::default()
        }
    }

    pub fn scripts<I, P>(mut self, scripts: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let resolved: Vec<PathBuf> = scripts
            .into_iter()
            .map(|p| self.resolve(p.as_ref()))
            .collect();
        self.scripts.extend(resolved);
        self
    }

    pub fn template(mut self, template: impl AsRef<Path>) -> Self {
        let resolved = self.resolve(template.as_ref());
        self.templates.push(resolved);
        self
    }

    pub fn screenshots(mut self, dir: impl AsRef<Path>) -> Self {
        self.screenshots = Some(self.resolve(dir.as_ref()));
        self
    }

    pub fn config(mut self, config: impl AsRef<Path>) -> Self {
        self.config = Some(self.resolve(config.as_ref()));
        self
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Directories to watch non-recursively so every file in the set is seen.
    pub fn watch_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = vec![self.root.clone()];

        let parents = self
            .scripts
            .iter()
            .chain(&self.templates)
            .chain(&self.config)
            .filter_map(|p| p.parent().map(Path::to_path_buf));

        for dir in parents.chain(self.screenshots.clone()) {
            if !dirs.contains(&dir) {
                dirs.push(dir);
            }
        }

        dirs
    }

    /// Map a changed path to the event it represents, if any.
    pub fn classify(&self, path: &Path) -> Option<WatchEvent> {
        if self.config.as_deref() == Some(path) {
            return Some(WatchEvent::ConfigChanged(path.to_path_buf()));
        }

        if self.templates.iter().any(|t| t == path) {
            return Some(WatchEvent::TemplateChanged(path.to_path_buf()));
        }

        if self.scripts.iter().any(|s| s == path) {
            return Some(WatchEvent::ScriptChanged(path.to_path_buf()));
        }

        if let Some(dir) = &self.screenshots {
            if path.parent() == Some(dir.as_path()) {
                return Some(WatchEvent::ScreenshotChanged(path.to_path_buf()));
            }
        }

        None
    }
}

/// Errors from the watch backend.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("Failed to start file watcher: {0}")]
    Backend(String),

    #[error("Failed to watch {path}: {message}")]
    Watch { path: String, message: String },
}

/// File watcher for detecting source changes.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Start watching every directory of `set`.
    ///
    /// Returns the watcher and a channel of classified events. Events stop
    /// when the watcher is dropped.
    pub fn new(set: WatchSet) -> Result<(Self, async_mpsc::Receiver<WatchEvent>), WatchError> {
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(|e| WatchError::Backend(e.to_string()))?;

        for dir in set.watch_dirs() {
            if dir.exists() {
                watcher
                    .watch(&dir, RecursiveMode::NonRecursive)
                    .map_err(|e| WatchError::Watch {
                        path: dir.display().to_string(),
                        message: e.to_string(),
                    })?;
                tracing::debug!("Watching {}", dir.display());
            } else {
                tracing::warn!("Not watching missing directory {}", dir.display());
            }
        }

        std::thread::spawn(move || {
            while let Ok(event) = sync_rx.recv() {
                if !is_change(&event.kind) {
                    continue;
                }

                for path in event.paths {
                    if let Some(e) = set.classify(&path) {
                        if async_tx.blocking_send(e).is_err() {
                            return;
                        }
                    }
                }
            }
        });

        Ok((Self { _watcher: watcher }, async_rx))
    }
}

fn is_change(kind: &notify::EventKind) -> bool {
    use notify::EventKind;

    matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    fn project_set(root: &Path) -> WatchSet {
        WatchSet::new(root)
            .scripts(["conf.js", "completions.json"])
            .template("README.tmpl.md")
            .screenshots("assets/screenshots")
            .config("surfkit.toml")
    }

    #[test]
    fn classifies_project_files() {
        let temp = tempdir().unwrap();
        let set = project_set(temp.path());
        let root = temp.path().canonicalize().unwrap();

        assert_eq!(
            set.classify(&root.join("conf.js")),
            Some(WatchEvent::ScriptChanged(root.join("conf.js")))
        );
        assert_eq!(
            set.classify(&root.join("README.tmpl.md")),
            Some(WatchEvent::TemplateChanged(root.join("README.tmpl.md")))
        );
        assert_eq!(
            set.classify(&root.join("assets/screenshots/gh.png")),
            Some(WatchEvent::ScreenshotChanged(
                root.join("assets/screenshots/gh.png")
            ))
        );
        assert_eq!(
            set.classify(&root.join("surfkit.toml")),
            Some(WatchEvent::ConfigChanged(root.join("surfkit.toml")))
        );
        assert_eq!(set.classify(&root.join("README.md")), None);
    }

    #[test]
    fn watches_root_and_screenshot_dirs_once() {
        let temp = tempdir().unwrap();
        let root = temp.path().canonicalize().unwrap();

        let dirs = project_set(temp.path()).watch_dirs();

        assert_eq!(dirs, vec![root.clone(), root.join("assets/screenshots")]);
    }

    #[tokio::test]
    async fn watches_file_changes() {
        let temp = tempdir().unwrap();
        let script = temp.path().canonicalize().unwrap().join("conf.js");

        // Create the watcher first (so it catches file creation)
        let (watcher, mut rx) = FileWatcher::new(project_set(temp.path())).unwrap();

        // Give inotify time to set up
        tokio::time::sleep(Duration::from_millis(100)).await;

        fs::write(&script, "// changed").unwrap();

        let event = tokio::time::timeout(Duration::from_secs(3), rx.recv()).await;

        drop(watcher);

        assert!(event.is_ok(), "timeout waiting for file watch event");
        assert_eq!(event.unwrap(), Some(WatchEvent::ScriptChanged(script)));
    }

    #[tokio::test]
    async fn ignores_unrelated_files() {
        let temp = tempdir().unwrap();

        let (watcher, mut rx) = FileWatcher::new(project_set(temp.path())).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        fs::write(temp.path().join("notes.txt"), "x").unwrap();

        let event = tokio::time::timeout(Duration::from_millis(500), rx.recv()).await;
        drop(watcher);

        assert!(event.is_err(), "unrelated file should not produce an event");
    }
}
