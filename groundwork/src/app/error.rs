//! Bootstrap error type.

use std::fmt;

use crate::cache::CacheBackendError;
use crate::config::ConfigError;

/// Errors that abort process startup.
///
/// Every variant is fatal: the process must not serve traffic after any of
/// them. The stages are tagged so operators can tell a config typo from an
/// unreachable cache cluster at a glance.
#[derive(Debug)]
pub enum BootstrapError {
    /// Configuration coercion or validation failed.
    Config(ConfigError),

    /// A distributed cache tier could not be constructed.
    CacheConnect {
        role: &'static str,
        source: CacheBackendError,
    },
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootstrapError::Config(e) => {
                write!(f, "Configuration error: {}", e)
            }
            BootstrapError::CacheConnect { role, source } => {
                write!(f, "Failed to build '{}' cache tier: {}", role, source)
            }
        }
    }
}

impl std::error::Error for BootstrapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BootstrapError::Config(e) => Some(e),
            BootstrapError::CacheConnect { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for BootstrapError {
    fn from(e: ConfigError) -> Self {
        BootstrapError::Config(e)
    }
}
