//! Distributed named locks built on a shared cache backend.
//!
//! Mutual exclusion spans processes and machines: the coordination
//! substrate is one distributed cache tier, and the primitive is its
//! conditional set ([`crate::cache::CacheBackend::add`]). Whichever process
//! creates the lock key holds the lock; everyone else polls until the
//! caller's timeout expires.
//!
//! Acquisition is scoped: [`LockGuard`] releases on every exit path, so
//! callers never write release-on-success-only logic.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//!
//! let factory = globals.locks();
//! let guard = factory.acquire("update_karma", Duration::from_secs(5)).await?;
//! // ... critical section across all processes ...
//! guard.release().await;
//! ```

mod factory;

pub use factory::{LockError, LockFactory, LockGuard};
