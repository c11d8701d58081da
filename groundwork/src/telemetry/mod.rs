//! Logging initialization.
//!
//! The library itself only emits `tracing` events; installing a subscriber
//! is the embedding process's call. This module provides the standard
//! setup used by the CLI and by service binaries: env-filter driven, with
//! the `debug` configuration flag selecting the default verbosity the way
//! the application has always mapped it (debug → everything, otherwise
//! warnings and up).

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides everything; otherwise `debug` selects between
/// `debug` and `warn` default levels. Calling this twice is a no-op: the
/// second installation fails quietly, which keeps tests that share a
/// process from fighting over the global.
pub fn init(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
