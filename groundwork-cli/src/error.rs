//! CLI error type.

use std::fmt;

use groundwork::app::BootstrapError;
use groundwork::config::ConfigError;

/// Errors surfaced to the CLI user.
#[derive(Debug)]
pub enum CliError {
    /// Reading or coercing the configuration file failed.
    Config(ConfigError),

    /// The bootstrap sequence rejected the configuration.
    Bootstrap(BootstrapError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "{}", e),
            CliError::Bootstrap(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Bootstrap(e) => Some(e),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<BootstrapError> for CliError {
    fn from(e: BootstrapError) -> Self {
        CliError::Bootstrap(e)
    }
}
