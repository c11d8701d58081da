//! Logical-to-physical database topology.
//!
//! Application entity tables are sharded across multiple database engines.
//! This module resolves the configured topology: which physical engines
//! exist, which logical table binds to which engines, and which engines
//! hold the distinguished `type` and `relation-type` registries.
//!
//! ```text
//! databases = main, comments          ┌────────────────────────┐
//! main_db = main,db1,ro,pw,5,10  ──►  │       DbTopology        │
//! type_db = main                     │                          │
//! db_table_link = thing,main         │  engines:  name → Engine │
//! db_table_vote = relation,          │  tables:   name → kind + │
//!     Account,Link,comments          │            engine shards │
//!                                    └────────────────────────┘
//! ```
//!
//! Engines are opaque connection descriptors; the SQL driver that turns
//! them into live pools is the persistence layer's concern, as is shard
//! selection among a table's engines.

mod engine;
mod resolver;
mod topology;

pub use engine::{Engine, EngineRef};
pub use resolver::resolve;
pub use topology::{DbTopology, TableBinding, TableKind};
