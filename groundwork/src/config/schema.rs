//! Per-type key declarations driving configuration coercion.

use std::collections::BTreeSet;

use super::error::ConfigError;

/// The coercion target for a configuration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Signed integer.
    Int,
    /// Floating point.
    Float,
    /// Three-valued boolean (`Some(true)`, `Some(false)`, or absent).
    Bool,
    /// Ordered comma-delimited list of strings.
    Tuple,
    /// Opaque passthrough string (any key not declared in a set).
    Str,
}

/// Four disjoint sets of key names, one per coercion target.
///
/// Any key absent from all four sets is treated as an opaque string.
/// Disjointness is validated at construction: a key may appear in at most
/// one set.
#[derive(Debug, Clone, Default)]
pub struct ConfigSchema {
    int_keys: BTreeSet<String>,
    float_keys: BTreeSet<String>,
    bool_keys: BTreeSet<String>,
    tuple_keys: BTreeSet<String>,
}

impl ConfigSchema {
    /// Build a schema from four key lists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SchemaOverlap`] if any key appears in more
    /// than one list.
    pub fn new<I1, I2, I3, I4, S>(
        ints: I1,
        floats: I2,
        bools: I3,
        tuples: I4,
    ) -> Result<Self, ConfigError>
    where
        I1: IntoIterator<Item = S>,
        I2: IntoIterator<Item = S>,
        I3: IntoIterator<Item = S>,
        I4: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let int_keys: BTreeSet<String> = ints.into_iter().map(Into::into).collect();
        let float_keys: BTreeSet<String> = floats.into_iter().map(Into::into).collect();
        let bool_keys: BTreeSet<String> = bools.into_iter().map(Into::into).collect();
        let tuple_keys: BTreeSet<String> = tuples.into_iter().map(Into::into).collect();

        let sets = [&int_keys, &float_keys, &bool_keys, &tuple_keys];
        for (i, a) in sets.iter().enumerate() {
            for b in &sets[i + 1..] {
                if let Some(key) = a.intersection(b).next() {
                    return Err(ConfigError::SchemaOverlap(key.clone()));
                }
            }
        }

        Ok(Self {
            int_keys,
            float_keys,
            bool_keys,
            tuple_keys,
        })
    }

    /// The stock schema for the web application's configuration surface.
    ///
    /// These are the keys the bootstrap itself understands; deployments add
    /// arbitrary extra keys, which pass through as strings. Spellings are
    /// historical, uppercase and all: existing deployment files must keep
    /// coercing the same way.
    pub fn web_defaults() -> Self {
        // The lists are disjoint by inspection; new() cannot fail on them.
        Self::new(
            [
                "page_cache_time",
                "render_cache_time",
                "RATELIMIT",
                "HOT_PAGE_AGE",
                "MODWINDOW",
                "num_comments",
                "max_comments",
                "num_workers",
                "num_query_queue_workers",
            ],
            ["min_promote_bid", "max_promote_bid"],
            [
                "debug",
                "translator",
                "sqlprinting",
                "template_debug",
                "uncompressedJS",
                "enable_doquery",
                "use_query_cache",
                "write_query_queue",
                "show_awards",
                "css_killswitch",
                "db_create_tables",
                "disallow_db_writes",
                "allow_shutdown",
            ],
            [
                "memcaches",
                "permacaches",
                "rendercaches",
                "rec_cache",
                "databases",
                "admins",
                "sponsors",
                "monitored_servers",
                "agents",
            ],
        )
        .expect("default schema key sets are disjoint")
    }

    /// Determine the coercion target for a key.
    pub fn kind_of(&self, key: &str) -> ValueKind {
        if self.int_keys.contains(key) {
            ValueKind::Int
        } else if self.float_keys.contains(key) {
            ValueKind::Float
        } else if self.bool_keys.contains(key) {
            ValueKind::Bool
        } else if self.tuple_keys.contains(key) {
            ValueKind::Tuple
        } else {
            ValueKind::Str
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_lookup() {
        let schema = ConfigSchema::web_defaults();
        assert_eq!(schema.kind_of("page_cache_time"), ValueKind::Int);
        assert_eq!(schema.kind_of("min_promote_bid"), ValueKind::Float);
        assert_eq!(schema.kind_of("debug"), ValueKind::Bool);
        assert_eq!(schema.kind_of("memcaches"), ValueKind::Tuple);
        assert_eq!(schema.kind_of("media_domain"), ValueKind::Str);
    }

    #[test]
    fn test_historical_spellings_are_declared() {
        let schema = ConfigSchema::web_defaults();
        assert_eq!(schema.kind_of("HOT_PAGE_AGE"), ValueKind::Int);
        assert_eq!(schema.kind_of("MODWINDOW"), ValueKind::Int);
        assert_eq!(schema.kind_of("RATELIMIT"), ValueKind::Int);
        assert_eq!(schema.kind_of("uncompressedJS"), ValueKind::Bool);
        assert_eq!(schema.kind_of("translator"), ValueKind::Bool);
        assert_eq!(schema.kind_of("css_killswitch"), ValueKind::Bool);
        assert_eq!(schema.kind_of("show_awards"), ValueKind::Bool);
        assert_eq!(schema.kind_of("sponsors"), ValueKind::Tuple);

        // The snake_case respellings were never config keys.
        assert_eq!(schema.kind_of("hot_page_age"), ValueKind::Str);
        assert_eq!(schema.kind_of("uncompressed_js"), ValueKind::Str);
    }

    #[test]
    fn test_overlapping_sets_rejected() {
        let result = ConfigSchema::new(
            vec!["shared_key"],
            vec![],
            vec!["shared_key"],
            vec![],
        );
        assert!(matches!(result, Err(ConfigError::SchemaOverlap(k)) if k == "shared_key"));
    }

    #[test]
    fn test_empty_schema_is_all_strings() {
        let schema = ConfigSchema::default();
        assert_eq!(schema.kind_of("anything"), ValueKind::Str);
    }
}
