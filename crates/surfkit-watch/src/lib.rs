//! Source watching for Surfingkeys configuration rebuilds.
//!
//! Watches the scripts, the README template, the screenshots and the surfkit
//! config, and turns bursts of changes into a single [`WatchPlan`].

pub mod plan;
pub mod watcher;

pub use plan::{next_plan, WatchPlan, DEFAULT_SETTLE};
pub use watcher::{FileWatcher, WatchError, WatchEvent, WatchSet};
