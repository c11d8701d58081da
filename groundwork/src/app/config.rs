//! Bootstrap input configuration.

use crate::config::{ConfigSchema, RawConfig};

/// Default size of the process-private cache tier (256 MB).
pub const DEFAULT_LOCAL_CACHE_BYTES: u64 = 256 * 1024 * 1024;

/// Everything [`crate::app::Globals::bootstrap`] needs besides the backend
/// factory: the raw configuration map, the coercion schema, and local
/// sizing knobs that are wiring concerns rather than deployment config.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Flat string configuration as loaded from file or environment.
    pub raw: RawConfig,

    /// Schema driving typed coercion.
    pub schema: ConfigSchema,

    /// Maximum size of the process-private cache tier, in bytes.
    pub local_cache_max_bytes: u64,
}

impl AppConfig {
    /// Create a config with the stock web schema and default sizing.
    pub fn new(raw: RawConfig) -> Self {
        Self {
            raw,
            schema: ConfigSchema::web_defaults(),
            local_cache_max_bytes: DEFAULT_LOCAL_CACHE_BYTES,
        }
    }

    /// Override the coercion schema.
    pub fn with_schema(mut self, schema: ConfigSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Override the local cache tier size.
    pub fn with_local_cache_size(mut self, max_bytes: u64) -> Self {
        self.local_cache_max_bytes = max_bytes;
        self
    }
}
