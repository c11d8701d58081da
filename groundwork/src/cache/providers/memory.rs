//! In-memory cache backend using moka.
//!
//! This backend wraps `moka::future::Cache` for an async-safe, lock-free
//! process-private cache with size-bounded LRU eviction. It is always the
//! first tier of a [`crate::cache::CacheChain`].
//!
//! # Why moka?
//!
//! - Lock-free reads (common case)
//! - Concurrent writes without blocking the runtime
//! - Automatic LRU eviction without explicit locking
//! - Memory-bounded with configurable limits
//! - Per-entry time-to-live via the `Expiry` interface

use std::sync::Arc;
use std::time::{Duration, Instant};

use moka::future::Cache as MokaCache;
use moka::Expiry;

use crate::cache::traits::{
    BoxFuture, CacheBackend, CacheBackendError, CacheBackendFactory,
};

/// A cached value together with its advisory expiry.
#[derive(Clone)]
struct CacheEntry {
    data: Vec<u8>,
    ttl: Option<Duration>,
}

/// Reads each entry's own TTL; entries stored without one never expire.
struct PerEntryExpiry;

impl Expiry<String, CacheEntry> for PerEntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CacheEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        value.ttl
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CacheEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        value.ttl
    }
}

/// Process-private in-memory cache backend.
///
/// Entries are weighed by key plus value size and evicted LRU-style when
/// the configured byte limit is exceeded.
pub struct MemoryBackend {
    label: String,
    cache: MokaCache<String, CacheEntry>,
}

impl MemoryBackend {
    /// Create a new memory backend.
    ///
    /// # Arguments
    ///
    /// * `label` - Name used in log messages (e.g. `"local"`)
    /// * `max_size_bytes` - Maximum cache size in bytes
    pub fn new(label: impl Into<String>, max_size_bytes: u64) -> Self {
        let cache = MokaCache::builder()
            // Weight each entry by its data size
            .weigher(|key: &String, entry: &CacheEntry| -> u32 {
                (key.len() + entry.data.len()).min(u32::MAX as usize) as u32
            })
            .max_capacity(max_size_bytes)
            .expire_after(PerEntryExpiry)
            .build();

        Self {
            label: label.into(),
            cache,
        }
    }

    /// Current number of entries.
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Current weighted size in bytes.
    pub fn size_bytes(&self) -> u64 {
        self.cache.weighted_size()
    }
}

impl CacheBackend for MemoryBackend {
    fn label(&self) -> &str {
        &self.label
    }

    fn get(&self, key: &str) -> BoxFuture<'_, Result<Option<Vec<u8>>, CacheBackendError>> {
        let key = key.to_string();
        Box::pin(async move { Ok(self.cache.get(&key).await.map(|entry| entry.data)) })
    }

    fn set(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Option<Duration>,
    ) -> BoxFuture<'_, Result<(), CacheBackendError>> {
        let key = key.to_string();
        Box::pin(async move {
            self.cache.insert(key, CacheEntry { data: value, ttl }).await;
            Ok(())
        })
    }

    fn add(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Option<Duration>,
    ) -> BoxFuture<'_, Result<bool, CacheBackendError>> {
        let key = key.to_string();
        Box::pin(async move {
            let entry = self
                .cache
                .entry(key)
                .or_insert_with(async { CacheEntry { data: value, ttl } })
                .await;
            Ok(entry.is_fresh())
        })
    }

    fn delete(&self, key: &str) -> BoxFuture<'_, Result<bool, CacheBackendError>> {
        let key = key.to_string();
        Box::pin(async move { Ok(self.cache.remove(&key).await.is_some()) })
    }
}

/// Backend factory that builds memory backends instead of cluster clients.
///
/// Every cache role gets its own private store, so a process wired with
/// this factory behaves like a single-node deployment: correct semantics,
/// no sharing across processes. Used by tests and by the CLI's
/// configuration checks; production wiring supplies a factory that speaks
/// to the real cluster.
#[derive(Debug, Clone)]
pub struct InProcessFactory {
    max_size_bytes: u64,
}

impl InProcessFactory {
    /// Default per-role size limit (64 MB).
    pub const DEFAULT_MAX_SIZE_BYTES: u64 = 64 * 1024 * 1024;

    /// Create a factory with a per-role size limit.
    pub fn new(max_size_bytes: u64) -> Self {
        Self { max_size_bytes }
    }
}

impl Default for InProcessFactory {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_SIZE_BYTES)
    }
}

impl CacheBackendFactory for InProcessFactory {
    fn distributed(
        &self,
        role: &str,
        nodes: &[String],
    ) -> Result<Arc<dyn CacheBackend>, CacheBackendError> {
        if nodes.is_empty() {
            return Err(CacheBackendError::Unreachable {
                backend: role.to_string(),
                reason: "empty node list".to_string(),
            });
        }
        Ok(Arc::new(MemoryBackend::new(role, self.max_size_bytes)))
    }
}
