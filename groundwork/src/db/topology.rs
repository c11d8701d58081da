//! The resolved topology object.

use std::collections::BTreeMap;

use super::engine::EngineRef;

/// The storage kind of a logical table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// An entity table (a user, a post).
    Thing,
    /// An edge table connecting two typed endpoints (a vote, a membership).
    Relation,
}

/// One logical table bound to its engine shards.
///
/// Multiple engines service one logical table when sharded; selecting
/// among them per row is the persistence layer's job.
#[derive(Debug, Clone)]
pub struct TableBinding {
    /// Logical table name.
    pub name: String,
    /// Entity or edge storage.
    pub kind: TableKind,
    /// The two endpoint type names, for `Relation` bindings only.
    pub endpoints: Option<(String, String)>,
    /// Ordered engine shards, at least one.
    pub engines: Vec<EngineRef>,
}

/// The aggregate logical-to-physical database topology.
///
/// Built once by [`super::resolve`] and immutable afterward. An empty
/// topology (no engines, no tables) is valid and represents a cache-only
/// deployment.
#[derive(Debug, Default)]
pub struct DbTopology {
    engines: BTreeMap<String, EngineRef>,
    tables: BTreeMap<String, TableBinding>,
    type_engine: Option<EngineRef>,
    relation_type_engine: Option<EngineRef>,
}

impl DbTopology {
    pub(crate) fn new(
        engines: BTreeMap<String, EngineRef>,
        tables: BTreeMap<String, TableBinding>,
        type_engine: EngineRef,
        relation_type_engine: EngineRef,
    ) -> Self {
        Self {
            engines,
            tables,
            type_engine: Some(type_engine),
            relation_type_engine: Some(relation_type_engine),
        }
    }

    /// Whether this is a db-less (cache-only) topology.
    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    /// Look up an engine by its logical database name.
    pub fn engine(&self, name: &str) -> Option<&EngineRef> {
        self.engines.get(name)
    }

    /// Iterate declared engines in name order.
    pub fn engines(&self) -> impl Iterator<Item = (&str, &EngineRef)> {
        self.engines.iter().map(|(name, e)| (name.as_str(), e))
    }

    /// The full binding for a logical table.
    pub fn binding(&self, table: &str) -> Option<&TableBinding> {
        self.tables.get(table)
    }

    /// Iterate table bindings in name order.
    pub fn tables(&self) -> impl Iterator<Item = &TableBinding> {
        self.tables.values()
    }

    /// The ordered engine shards for a logical table.
    pub fn engine_for(&self, table: &str) -> Option<&[EngineRef]> {
        self.tables.get(table).map(|binding| binding.engines.as_slice())
    }

    /// The distinguished engine for a storage kind: the `type` registry
    /// engine for things, the `relation-type` registry engine for
    /// relations. `None` only for an empty topology.
    pub fn distinguished_engine(&self, kind: TableKind) -> Option<&EngineRef> {
        match kind {
            TableKind::Thing => self.type_engine.as_ref(),
            TableKind::Relation => self.relation_type_engine.as_ref(),
        }
    }
}
