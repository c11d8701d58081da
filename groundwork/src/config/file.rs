//! INI-file loading into a raw configuration map.
//!
//! Deployment configuration lives in flat `key = value` INI files. Sections
//! are ignored for keying purposes: all properties merge into one flat map,
//! with later sections overriding earlier ones on key collision. This keeps
//! a single namespace for the bootstrap regardless of how operators group
//! their files.

use std::path::Path;

use ini::Ini;

use super::error::ConfigError;
use super::RawConfig;

/// Load a flat raw configuration map from an INI file.
///
/// # Errors
///
/// Returns [`ConfigError::File`] if the file cannot be read or parsed.
pub fn load_raw_config<P: AsRef<Path>>(path: P) -> Result<RawConfig, ConfigError> {
    let ini = Ini::load_from_file(path.as_ref())?;

    let mut raw = RawConfig::new();
    for (_section, properties) in ini.iter() {
        for (key, value) in properties.iter() {
            raw.insert(key.to_string(), value.to_string());
        }
    }

    Ok(raw)
}
