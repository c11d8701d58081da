//! Configuration ingestion and typed coercion.
//!
//! All configuration enters the process as a flat mapping of string keys to
//! string values ([`RawConfig`]). A [`ConfigSchema`] declares which keys are
//! integers, floats, booleans, or comma-delimited tuples; coercion produces a
//! [`TypedConfig`] that the rest of the bootstrap consumes. Keys absent from
//! every schema set pass through as opaque strings.
//!
//! Coercion failures are fatal: a malformed value for a typed key must abort
//! process startup rather than being defaulted or retried.
//!
//! # Example
//!
//! ```ignore
//! use groundwork::config::{ConfigSchema, RawConfig, TypedConfig};
//!
//! let mut raw = RawConfig::new();
//! raw.insert("debug".into(), "true".into());
//! raw.insert("memcaches".into(), "10.0.0.1:11211, 10.0.0.2:11211".into());
//!
//! let typed = TypedConfig::coerce(&raw, &ConfigSchema::web_defaults())?;
//! assert_eq!(typed.bool_flag("debug"), Some(true));
//! assert_eq!(typed.tuple("memcaches").len(), 2);
//! ```

mod error;
mod file;
mod schema;
mod typed;

pub use error::ConfigError;
pub use file::load_raw_config;
pub use schema::{ConfigSchema, ValueKind};
pub use typed::{split_list, split_list_on, TypedConfig};

use std::collections::BTreeMap;

/// Flat string-to-string configuration as read from the environment or an
/// INI file, before any coercion.
///
/// A `BTreeMap` keeps iteration deterministic, which matters for the
/// topology resolver's `db_table_*` scan.
pub type RawConfig = BTreeMap<String, String>;
