//! Process bootstrap and the published `Globals` state.
//!
//! This module assembles everything the rest of the process consumes:
//! typed configuration, the cache chain, the named distributed caches, the
//! lock factory, and the database topology. The sequence runs exactly once
//! per process, single-threaded, before any request-serving concurrency
//! begins.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    Globals::bootstrap                     │
//! │                                                           │
//! │  1. TypedConfig::coerce  ── bad values abort startup      │
//! │  2. cache tiers          ── local moka + factory-built    │
//! │     CacheChain            shared tiers (memcaches,        │
//! │                           permacaches, rendercaches,      │
//! │                           rec_cache)                      │
//! │  3. LockFactory          ── atop the memcache tier        │
//! │  4. db::resolve          ── logical→physical topology     │
//! │  5. cross-field checks   ── write_query_queue ⇒ amqp_host │
//! │  6. publish              ── immutable Globals             │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Any failure anywhere in the sequence aborts startup; a half-initialized
//! `Globals` never escapes.

mod bootstrap;
mod config;
mod error;

pub use bootstrap::Globals;
pub use config::AppConfig;
pub use error::BootstrapError;
