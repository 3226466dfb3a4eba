//! Coalescing bursts of watch events into one rebuild.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::watcher::WatchEvent;

/// How long to keep collecting events after the first one arrives.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(200);

/// Work to do in response to a batch of changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchPlan {
    /// Reload the surfkit config before running anything else
    pub reload_config: bool,

    /// Regenerate the README
    pub readme: bool,

    /// Rebuild and reinstall the artifact
    pub install: bool,
}

impl WatchPlan {
    /// Fold one event into the plan.
    pub fn add(&mut self, event: &WatchEvent) {
        match event {
            WatchEvent::ScriptChanged(_) => {
                self.readme = true;
                self.install = true;
            }
            WatchEvent::TemplateChanged(_) | WatchEvent::ScreenshotChanged(_) => {
                self.readme = true;
            }
            WatchEvent::ConfigChanged(_) => {
                self.reload_config = true;
                self.readme = true;
                self.install = true;
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.reload_config && !self.readme && !self.install
    }
}

impl<'a> FromIterator<&'a WatchEvent> for WatchPlan {
    fn from_iter<I: IntoIterator<Item = &'a WatchEvent>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), |mut plan, event| {
            plan.add(event);
            plan
        })
    }
}

/// Wait for the next change and collect everything that follows within
/// `settle` of the previous event.
///
/// Returns `None` once the channel is closed and drained.
pub async fn next_plan(
    rx: &mut mpsc::Receiver<WatchEvent>,
    settle: Duration,
) -> Option<WatchPlan> {
    let first = rx.recv().await?;

    let mut plan = WatchPlan::default();
    plan.add(&first);
    tracing::debug!("Change detected: {:?}", first);

    while let Ok(Some(event)) = tokio::time::timeout(settle, rx.recv()).await {
        tracing::debug!("Change detected: {:?}", event);
        plan.add(&event);
    }

    Some(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn template_only_regenerates_readme() {
        let plan: WatchPlan = [WatchEvent::TemplateChanged(PathBuf::from("README.tmpl.md"))]
            .iter()
            .collect();

        assert_eq!(
            plan,
            WatchPlan {
                reload_config: false,
                readme: true,
                install: false,
            }
        );
    }

    #[test]
    fn script_change_reinstalls() {
        let plan: WatchPlan = [
            WatchEvent::ScreenshotChanged(PathBuf::from("gh.png")),
            WatchEvent::ScriptChanged(PathBuf::from("keys.js")),
        ]
        .iter()
        .collect();

        assert!(plan.readme);
        assert!(plan.install);
        assert!(!plan.reload_config);
    }

    #[test]
    fn config_change_reloads_everything() {
        let plan: WatchPlan = [WatchEvent::ConfigChanged(PathBuf::from("surfkit.toml"))]
            .iter()
            .collect();

        assert!(plan.reload_config && plan.readme && plan.install);
    }

    #[tokio::test]
    async fn coalesces_burst_into_one_plan() {
        let (tx, mut rx) = mpsc::channel(10);
        tx.send(WatchEvent::TemplateChanged(PathBuf::from("a")))
            .await
            .unwrap();
        tx.send(WatchEvent::ScriptChanged(PathBuf::from("b")))
            .await
            .unwrap();

        let plan = next_plan(&mut rx, Duration::from_millis(50)).await.unwrap();
        assert!(plan.readme && plan.install);

        drop(tx);
        assert_eq!(next_plan(&mut rx, Duration::from_millis(50)).await, None);
    }
}
