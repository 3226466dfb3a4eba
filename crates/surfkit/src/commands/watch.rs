//! Watch command.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use surfkit_tasks::{Pipeline, PipelineConfig, TaskError};
use surfkit_watch::{next_plan, FileWatcher, WatchPlan, WatchSet, DEFAULT_SETTLE};

/// Run the watch command until interrupted.
pub async fn run(config_path: &Path) -> Result<()> {
    let mut pipeline = Arc::new(super::pipeline(config_path)?);

    let set = watch_set(pipeline.config(), config_path);
    let (watcher, mut rx) = FileWatcher::new(set)?;

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    loop {
        let plan = tokio::select! {
            plan = next_plan(&mut rx, DEFAULT_SETTLE) => plan,
            _ = tokio::signal::ctrl_c() => break,
        };

        let Some(plan) = plan else {
            tracing::warn!("File watcher stopped");
            break;
        };

        if plan.reload_config {
            match super::pipeline(config_path) {
                Ok(reloaded) => {
                    tracing::info!("Reloaded {}", config_path.display());
                    pipeline = Arc::new(reloaded);
                }
                Err(e) => {
                    tracing::error!("Keeping previous config: {:#}", e);
                    continue;
                }
            }
        }

        let current = Arc::clone(&pipeline);
        match tokio::task::spawn_blocking(move || run_plan(&current, plan)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!("{}", e),
            Err(e) => tracing::error!("Rebuild task failed: {}", e),
        }
    }

    drop(watcher);
    Ok(())
}

/// Files watched for a project. The config file sits in the project root.
fn watch_set(config: &PipelineConfig, config_path: &Path) -> WatchSet {
    let mut set = WatchSet::new(&config.root)
        .scripts(&config.scripts)
        .template(&config.readme.template)
        .screenshots(&config.readme.screenshots);

    if let Some(name) = config_path.file_name() {
        set = set.config(name);
    }

    set
}

/// `install` regenerates the README as part of `build`, so it covers both.
fn run_plan(pipeline: &Pipeline, plan: WatchPlan) -> Result<(), TaskError> {
    if plan.install {
        pipeline.install()?;
    } else if plan.readme {
        pipeline.readme()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use surfkit_watch::WatchEvent;
    use tempfile::tempdir;

    #[test]
    fn watches_configured_files() {
        let temp = tempdir().unwrap();
        let root = temp.path().canonicalize().unwrap();
        let config = PipelineConfig {
            root: temp.path().to_path_buf(),
            ..Default::default()
        };

        let set = watch_set(&config, &temp.path().join("surfkit.toml"));

        assert_eq!(
            set.classify(&root.join("keys.js")),
            Some(WatchEvent::ScriptChanged(root.join("keys.js")))
        );
        assert_eq!(
            set.classify(&root.join("completions.json")),
            Some(WatchEvent::ScriptChanged(root.join("completions.json")))
        );
        assert_eq!(
            set.classify(&root.join("surfkit.toml")),
            Some(WatchEvent::ConfigChanged(root.join("surfkit.toml")))
        );
        assert_eq!(set.classify(&root.join("build/.surfingkeys")), None);
    }
}
