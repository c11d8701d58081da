//! `groundwork config` - dump the coerced configuration.

use std::path::Path;

use groundwork::config::{load_raw_config, ConfigSchema, TypedConfig, ValueKind};

use crate::error::CliError;

/// Print every configuration key with its declared kind and coerced value.
///
/// This runs coercion only, not the full bootstrap, so it works on partial
/// files that are missing cache node lists.
pub fn run(config_path: &Path) -> Result<(), CliError> {
    let raw = load_raw_config(config_path)?;
    let schema = ConfigSchema::web_defaults();
    let typed = TypedConfig::coerce(&raw, &schema)?;

    for key in raw.keys() {
        match schema.kind_of(key) {
            ValueKind::Int => {
                // coerce() succeeded, so the lookup cannot miss
                if let Some(value) = typed.int(key) {
                    println!("{key} = {value}  (int)");
                }
            }
            ValueKind::Float => {
                if let Some(value) = typed.float(key) {
                    println!("{key} = {value}  (float)");
                }
            }
            ValueKind::Bool => match typed.bool_flag(key) {
                Some(value) => println!("{key} = {value}  (bool)"),
                None => println!("{key} = unset  (bool)"),
            },
            ValueKind::Tuple => {
                let items = typed.tuple(key);
                println!("{key} = [{}]  (tuple, {})", items.join(", "), items.len());
            }
            ValueKind::Str => {
                if let Some(value) = typed.str_value(key) {
                    println!("{key} = {value:?}");
                }
            }
        }
    }

    Ok(())
}
