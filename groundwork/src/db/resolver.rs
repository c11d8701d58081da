//! Topology resolution from coerced configuration.
//!
//! Resolution is an explicit two-phase build: engines are all constructed
//! (and the distinguished slots resolved) before any table binding is
//! examined, and table keys are scanned in sorted order. This makes
//! engine-before-table ordering structural rather than an accident of map
//! iteration, and an undeclared engine name fails at the exact table that
//! references it.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::config::{split_list, ConfigError, TypedConfig};

use super::engine::{Engine, EngineRef};
use super::topology::{DbTopology, TableBinding, TableKind};

const TABLE_PREFIX: &str = "db_table_";

/// Resolve the database topology from configuration.
///
/// An empty `databases` list yields an empty topology, not an error: that
/// is a deliberate lenient case supporting cache-only deployments.
///
/// # Errors
///
/// Any malformed declaration is a fatal [`ConfigError`]: a missing
/// `<name>_db` tuple, wrong tuple arity, a missing or undeclared
/// `type_db` / `rel_type_db`, a table with an unknown kind, a relation
/// without two endpoints, or a table referencing an engine that was never
/// declared.
pub fn resolve(config: &TypedConfig) -> Result<DbTopology, ConfigError> {
    let databases = config.tuple("databases");
    if databases.is_empty() {
        debug!("no databases declared; building empty topology");
        return Ok(DbTopology::default());
    }

    // Phase one: every declared engine, then the distinguished slots.
    let mut engines: BTreeMap<String, EngineRef> = BTreeMap::new();
    for db_name in databases {
        let key = format!("{db_name}_db");
        let raw = config
            .str_value(&key)
            .ok_or_else(|| ConfigError::MissingKey(key.clone()))?;
        let fields = split_list(raw);
        let engine = Engine::from_params(db_name, &fields)?;
        engines.insert(db_name.clone(), Arc::new(engine));
    }

    let type_engine = distinguished(config, &engines, "type_db")?;
    let relation_type_engine = distinguished(config, &engines, "rel_type_db")?;

    // Phase two: table bindings, scanned in sorted key order.
    let mut tables: BTreeMap<String, TableBinding> = BTreeMap::new();
    for (key, value) in config.extra() {
        let Some(table_name) = key.strip_prefix(TABLE_PREFIX) else {
            continue;
        };
        let binding = parse_binding(table_name, value, &engines)?;
        tables.insert(table_name.to_string(), binding);
    }

    debug!(
        engines = engines.len(),
        tables = tables.len(),
        "database topology resolved"
    );

    Ok(DbTopology::new(
        engines,
        tables,
        type_engine,
        relation_type_engine,
    ))
}

/// Resolve one distinguished engine slot (`type_db` / `rel_type_db`).
fn distinguished(
    config: &TypedConfig,
    engines: &BTreeMap<String, EngineRef>,
    slot: &str,
) -> Result<EngineRef, ConfigError> {
    let name = config
        .str_value(slot)
        .ok_or_else(|| ConfigError::MissingKey(slot.to_string()))?;
    engines
        .get(name)
        .cloned()
        .ok_or_else(|| ConfigError::UndeclaredEngine {
            referent: slot.to_string(),
            engine: name.to_string(),
        })
}

/// Parse one `db_table_<name>` value.
///
/// The first element is the kind. For `thing`, the rest are engine names;
/// for `relation`, the first two remaining elements are endpoint type
/// names and the rest are engine names.
fn parse_binding(
    table: &str,
    value: &str,
    engines: &BTreeMap<String, EngineRef>,
) -> Result<TableBinding, ConfigError> {
    let parts = split_list(value);
    let Some(kind_name) = parts.first() else {
        return Err(ConfigError::UnknownTableKind {
            table: table.to_string(),
            kind: String::new(),
        });
    };

    let (kind, endpoints, engine_names) = match kind_name.as_str() {
        "thing" => (TableKind::Thing, None, &parts[1..]),
        "relation" => {
            if parts.len() < 3 {
                return Err(ConfigError::MissingEndpoints {
                    table: table.to_string(),
                });
            }
            (
                TableKind::Relation,
                Some((parts[1].clone(), parts[2].clone())),
                &parts[3..],
            )
        }
        other => {
            return Err(ConfigError::UnknownTableKind {
                table: table.to_string(),
                kind: other.to_string(),
            });
        }
    };

    if engine_names.is_empty() {
        return Err(ConfigError::NoEngines {
            table: table.to_string(),
        });
    }

    let mut bound = Vec::with_capacity(engine_names.len());
    for engine_name in engine_names {
        let engine =
            engines
                .get(engine_name)
                .ok_or_else(|| ConfigError::UndeclaredEngine {
                    referent: table.to_string(),
                    engine: engine_name.clone(),
                })?;
        bound.push(Arc::clone(engine));
    }

    Ok(TableBinding {
        name: table.to_string(),
        kind,
        endpoints,
        engines: bound,
    })
}
