//! Groundwork - per-process bootstrap for a sharded multi-tenant web application
//!
//! This library builds everything a request-serving process needs before it
//! accepts its first request: typed configuration, a tiered cache hierarchy,
//! distributed named locks, and a logical-to-physical database topology.
//!
//! # Architecture
//!
//! ```text
//! raw key/value config
//!          │
//!          ▼
//! ┌───────────────────┐
//! │ config (coercion) │  string map ──► TypedConfig
//! └─────────┬─────────┘
//!           │
//!     ┌─────┴──────────────┬────────────────┐
//!     ▼                    ▼                ▼
//! cache::CacheChain   lock::LockFactory  db::DbTopology
//! (local + shared     (atop one shared   (logical table ──►
//!  tiers)              cache tier)        engine shards)
//!     └────────────────────┴────────────────┘
//!                          │
//!                          ▼
//!              app::Globals (immutable after publish)
//! ```
//!
//! The bootstrap sequence runs exactly once per process, single-threaded,
//! and either produces a fully-initialized [`app::Globals`] or fails process
//! startup. There is no partial-success mode: a half-initialized `Globals`
//! is never visible to request-handling code.
//!
//! # Example
//!
//! ```ignore
//! use groundwork::app::{AppConfig, Globals};
//! use groundwork::cache::InProcessFactory;
//! use groundwork::config::load_raw_config;
//!
//! let raw = load_raw_config("production.ini")?;
//! let factory = InProcessFactory::default();
//! let globals = Globals::bootstrap(AppConfig::new(raw), &factory)?;
//!
//! // Hand to request-serving workers behind an Arc; never mutated again.
//! let globals = std::sync::Arc::new(globals);
//! ```

pub mod app;
pub mod cache;
pub mod config;
pub mod db;
pub mod lock;
pub mod telemetry;

pub use app::{AppConfig, Globals};
