//! Tiered cache infrastructure.
//!
//! The bootstrap assembles cache tiers into a [`CacheChain`]: an ordered
//! sequence of backends where the first tier is always process-private and
//! deeper tiers are shared across processes. Reads probe tiers in order and
//! promote hits forward; writes and deletes fan out to every tier.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                      CacheChain                       │
//! │                                                       │
//! │  tier 0: MemoryBackend (Required, process-private)    │
//! │  tier 1: distributed cluster (BestEffort, shared)     │
//! │  tier n: ...                                          │
//! └──────────────────────────┬───────────────────────────┘
//!                            │
//!                            ▼
//!          Arc<dyn CacheBackend> per tier, built by a
//!          CacheBackendFactory at bootstrap time
//! ```
//!
//! The distributed wire protocol is out of scope here: shared tiers arrive
//! through the [`CacheBackendFactory`] seam, and a failing shared tier
//! degrades to a cache miss rather than an error (see [`TierPolicy`]).

mod chain;
pub mod providers;
mod traits;

pub use chain::{CacheChain, TierPolicy};
pub use providers::{InProcessFactory, MemoryBackend};
pub use traits::{BoxFuture, CacheBackend, CacheBackendError, CacheBackendFactory};
