//! Subcommand implementations.

use std::path::Path;

use anyhow::Result;
use surfkit_tasks::Pipeline;

use crate::config::load_config;

pub mod build;
pub mod check_priv;
pub mod clean;
pub mod init;
pub mod install;
pub mod lint;
pub mod readme;
pub mod watch;

/// Load the config at `config_path` and create a pipeline for it.
fn pipeline(config_path: &Path) -> Result<Pipeline> {
    Ok(Pipeline::new(load_config(config_path)?))
}
