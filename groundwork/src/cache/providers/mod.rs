//! Cache backend implementations.
//!
//! Only the process-local tier is implemented here. Distributed tiers come
//! from whatever [`crate::cache::CacheBackendFactory`] the process is wired
//! with; their wire protocol is an external concern.
//!
//! [`InProcessFactory`] satisfies the factory seam with memory backends,
//! which is what configuration validation, tests, and the CLI use — no
//! cluster required.

mod memory;

pub use memory::{InProcessFactory, MemoryBackend};
