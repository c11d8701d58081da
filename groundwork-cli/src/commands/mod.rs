//! CLI command implementations.

pub mod check;
pub mod config;
pub mod topology;

use std::path::Path;

use groundwork::app::{AppConfig, Globals};
use groundwork::cache::InProcessFactory;
use groundwork::config::load_raw_config;
use tracing::debug;

use crate::error::CliError;

/// Load a config file and run the real bootstrap against it.
///
/// Distributed tiers are satisfied by in-process memory backends, so this
/// validates everything except actual cluster reachability.
pub(crate) fn bootstrap_from_file(path: &Path) -> Result<Globals, CliError> {
    let raw = load_raw_config(path)?;
    debug!(path = %path.display(), keys = raw.len(), "configuration loaded");
    let globals = Globals::bootstrap(AppConfig::new(raw), &InProcessFactory::default())?;
    Ok(globals)
}
