//! Typed configuration produced by coercion.

use std::collections::{BTreeMap, HashMap};

use super::error::ConfigError;
use super::schema::{ConfigSchema, ValueKind};
use super::RawConfig;

/// Split a comma-delimited configuration value into an ordered list.
///
/// Segments are trimmed and empty segments are dropped, so `"a, b ,c"`
/// yields `["a", "b", "c"]` and `""` yields an empty list.
pub fn split_list(value: &str) -> Vec<String> {
    split_list_on(value, ',')
}

/// [`split_list`] with an explicit delimiter.
pub fn split_list_on(value: &str, delim: char) -> Vec<String> {
    value
        .split(delim)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Coerce a raw string to the three-valued boolean.
///
/// `"true"` (case-insensitive) is true, any other non-empty string is
/// false, and an empty string is absent. The distinction between false and
/// absent is deliberate: callers that need "unset" to mean something other
/// than "off" can observe it.
fn to_bool(value: &str) -> Option<bool> {
    if value.is_empty() {
        None
    } else {
        Some(value.eq_ignore_ascii_case("true"))
    }
}

/// Configuration after coercion: per-type maps plus a passthrough map for
/// keys the schema does not declare.
///
/// The `extra` map is ordered so scans over key families (the topology
/// resolver's `db_table_*` prefix scan) are deterministic.
#[derive(Debug, Clone, Default)]
pub struct TypedConfig {
    ints: HashMap<String, i64>,
    floats: HashMap<String, f64>,
    bools: HashMap<String, Option<bool>>,
    tuples: HashMap<String, Vec<String>>,
    extra: BTreeMap<String, String>,
}

impl TypedConfig {
    /// Coerce a raw configuration map against a schema.
    ///
    /// Every key in `raw` is bound: declared keys to their typed map,
    /// everything else to the passthrough string map.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidInt`] or [`ConfigError::InvalidFloat`]
    /// when a declared key's value fails to parse. Bad configuration must
    /// fail process startup loudly; nothing here is defaulted or retried.
    pub fn coerce(raw: &RawConfig, schema: &ConfigSchema) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for (key, value) in raw {
            match schema.kind_of(key) {
                ValueKind::Int => {
                    let parsed =
                        value
                            .trim()
                            .parse::<i64>()
                            .map_err(|_| ConfigError::InvalidInt {
                                key: key.clone(),
                                value: value.clone(),
                            })?;
                    config.ints.insert(key.clone(), parsed);
                }
                ValueKind::Float => {
                    let parsed =
                        value
                            .trim()
                            .parse::<f64>()
                            .map_err(|_| ConfigError::InvalidFloat {
                                key: key.clone(),
                                value: value.clone(),
                            })?;
                    config.floats.insert(key.clone(), parsed);
                }
                ValueKind::Bool => {
                    config.bools.insert(key.clone(), to_bool(value.trim()));
                }
                ValueKind::Tuple => {
                    config.tuples.insert(key.clone(), split_list(value));
                }
                ValueKind::Str => {
                    config.extra.insert(key.clone(), value.clone());
                }
            }
        }

        Ok(config)
    }

    /// Look up an integer key.
    pub fn int(&self, key: &str) -> Option<i64> {
        self.ints.get(key).copied()
    }

    /// Look up a float key.
    pub fn float(&self, key: &str) -> Option<f64> {
        self.floats.get(key).copied()
    }

    /// Look up a boolean key.
    ///
    /// Returns `Some(true)` / `Some(false)` for present values and `None`
    /// when the key was absent or empty (the third value).
    pub fn bool_flag(&self, key: &str) -> Option<bool> {
        self.bools.get(key).copied().flatten()
    }

    /// Look up a tuple key. Absent keys read as the empty list.
    pub fn tuple(&self, key: &str) -> &[String] {
        self.tuples.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Look up an undeclared (passthrough string) key.
    pub fn str_value(&self, key: &str) -> Option<&str> {
        self.extra.get(key).map(String::as_str)
    }

    /// Iterate passthrough string keys in sorted order.
    pub fn extra(&self) -> impl Iterator<Item = (&str, &str)> {
        self.extra.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> ConfigSchema {
        ConfigSchema::web_defaults()
    }

    fn raw(pairs: &[(&str, &str)]) -> RawConfig {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_int_coercion() {
        let typed = TypedConfig::coerce(&raw(&[("page_cache_time", "90")]), &schema()).unwrap();
        assert_eq!(typed.int("page_cache_time"), Some(90));
    }

    #[test]
    fn test_int_coercion_failure_is_fatal() {
        let result = TypedConfig::coerce(&raw(&[("page_cache_time", "soon")]), &schema());
        assert!(matches!(
            result,
            Err(ConfigError::InvalidInt { key, .. }) if key == "page_cache_time"
        ));
    }

    #[test]
    fn test_float_coercion() {
        let typed = TypedConfig::coerce(&raw(&[("min_promote_bid", "0.5")]), &schema()).unwrap();
        assert_eq!(typed.float("min_promote_bid"), Some(0.5));
    }

    #[test]
    fn test_float_coercion_failure_is_fatal() {
        let result = TypedConfig::coerce(&raw(&[("min_promote_bid", "cheap")]), &schema());
        assert!(matches!(result, Err(ConfigError::InvalidFloat { .. })));
    }

    #[test]
    fn test_bool_true_is_case_insensitive() {
        for value in ["true", "True", "TRUE", "tRuE"] {
            let typed = TypedConfig::coerce(&raw(&[("debug", value)]), &schema()).unwrap();
            assert_eq!(typed.bool_flag("debug"), Some(true), "value {value:?}");
        }
    }

    #[test]
    fn test_bool_other_nonempty_is_false() {
        for value in ["false", "yes", "1", "on"] {
            let typed = TypedConfig::coerce(&raw(&[("debug", value)]), &schema()).unwrap();
            assert_eq!(typed.bool_flag("debug"), Some(false), "value {value:?}");
        }
    }

    #[test]
    fn test_bool_empty_and_absent_are_none() {
        let typed = TypedConfig::coerce(&raw(&[("debug", "")]), &schema()).unwrap();
        assert_eq!(typed.bool_flag("debug"), None);

        let typed = TypedConfig::coerce(&raw(&[]), &schema()).unwrap();
        assert_eq!(typed.bool_flag("debug"), None);
    }

    #[test]
    fn test_tuple_trims_and_drops_empties() {
        let typed = TypedConfig::coerce(&raw(&[("admins", "a, b ,c")]), &schema()).unwrap();
        assert_eq!(typed.tuple("admins"), ["a", "b", "c"]);

        let typed = TypedConfig::coerce(&raw(&[("admins", "")]), &schema()).unwrap();
        assert!(typed.tuple("admins").is_empty());

        let typed = TypedConfig::coerce(&raw(&[("admins", "a,,b,")]), &schema()).unwrap();
        assert_eq!(typed.tuple("admins"), ["a", "b"]);
    }

    #[test]
    fn test_split_list_on_alternate_delimiter() {
        assert_eq!(split_list_on("a; b ;c", ';'), ["a", "b", "c"]);
        assert_eq!(split_list_on("a,b", ';'), ["a,b"]);
        assert!(split_list_on("", ';').is_empty());
    }

    #[test]
    fn test_unknown_keys_pass_through_as_strings() {
        let typed = TypedConfig::coerce(&raw(&[("media_domain", "cdn.example.com")]), &schema())
            .unwrap();
        assert_eq!(typed.str_value("media_domain"), Some("cdn.example.com"));
        assert_eq!(typed.int("media_domain"), None);
    }

    #[test]
    fn test_extra_iterates_sorted() {
        let typed = TypedConfig::coerce(
            &raw(&[("zeta", "1"), ("alpha", "2"), ("mid", "3")]),
            &schema(),
        )
        .unwrap();
        let keys: Vec<&str> = typed.extra().map(|(k, _)| k).collect();
        assert_eq!(keys, ["alpha", "mid", "zeta"]);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn tuple_segments_are_trimmed_and_nonempty(
                parts in prop::collection::vec("[a-z0-9:.]{1,12}", 0..8),
                pad in "[ \t]{0,3}",
            ) {
                let joined = parts
                    .iter()
                    .map(|p| format!("{pad}{p}{pad}"))
                    .collect::<Vec<_>>()
                    .join(",");
                prop_assert_eq!(split_list(&joined), parts);
            }

            #[test]
            fn bool_never_panics(value in ".{0,24}") {
                let _ = to_bool(&value);
            }
        }
    }
}
