//! Core traits for cache backends.
//!
//! [`CacheBackend`] is the seam between the bootstrap and concrete cache
//! stores: the process-local moka tier implements it, and so does whatever
//! client speaks to the distributed cache cluster. The trait is
//! dyn-compatible (`Pin<Box<dyn Future>>` returns) so tiers can be held as
//! `Arc<dyn CacheBackend>` trait objects in a chain.
//!
//! # Design principles
//!
//! - **String keys**: human-readable in logs, flexible for any domain
//! - **`Vec<u8>` values**: raw bytes, no serialization opinions imposed
//! - **Coarse TTLs**: expiry and eviction policy belong to each backend
//! - **`add` as the coordination primitive**: set-if-absent is what the
//!   distributed lock facility is built on

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

/// Boxed future type for dyn-compatible async methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Errors that can occur talking to a cache backend.
///
/// These are non-fatal by design: the chain swallows them for best-effort
/// tiers and reports a miss instead. Only a failure at the required
/// process-local tier surfaces to callers.
#[derive(Debug, Error)]
pub enum CacheBackendError {
    /// The backend could not be reached at all.
    #[error("cache backend '{backend}' unreachable: {reason}")]
    Unreachable { backend: String, reason: String },

    /// The backend was reached but the request failed.
    #[error("cache backend '{backend}' request failed: {reason}")]
    Request { backend: String, reason: String },

    /// I/O error from the transport layer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single cache store: process-local memory or one distributed cluster.
///
/// All implementations must be `Send + Sync`; chain operations are invoked
/// concurrently from many request-handling tasks. Each call is independently
/// network-bound for remote backends and may block up to whatever timeout
/// the backend itself enforces; the chain imposes none of its own.
pub trait CacheBackend: Send + Sync {
    /// A short name for this backend, used in log messages.
    fn label(&self) -> &str;

    /// Retrieve a value by key. `Ok(None)` is an ordinary miss.
    fn get(&self, key: &str) -> BoxFuture<'_, Result<Option<Vec<u8>>, CacheBackendError>>;

    /// Store a value, replacing any existing entry.
    ///
    /// `ttl` is advisory: backends with their own expiry policy may round
    /// it to whatever granularity they support.
    fn set(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Option<Duration>,
    ) -> BoxFuture<'_, Result<(), CacheBackendError>>;

    /// Store a value only if the key is absent (conditional set).
    ///
    /// Returns `Ok(true)` if this call created the entry, `Ok(false)` if
    /// the key already existed. This is the primitive the distributed lock
    /// facility coordinates through.
    fn add(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Option<Duration>,
    ) -> BoxFuture<'_, Result<bool, CacheBackendError>>;

    /// Delete a value by key. Returns whether the key existed.
    fn delete(&self, key: &str) -> BoxFuture<'_, Result<bool, CacheBackendError>>;

    /// Retrieve many keys in one round trip where the backend supports it.
    ///
    /// The default implementation degrades to per-key `get` calls; clustered
    /// backends override this with a real batch request.
    fn get_multi<'a>(
        &'a self,
        keys: &[String],
    ) -> BoxFuture<'a, Result<HashMap<String, Vec<u8>>, CacheBackendError>> {
        let keys = keys.to_vec();
        Box::pin(async move {
            let mut found = HashMap::new();
            for key in keys {
                if let Some(value) = self.get(&key).await? {
                    found.insert(key, value);
                }
            }
            Ok(found)
        })
    }

    /// Store many entries, batched where the backend supports it.
    fn set_multi<'a>(
        &'a self,
        entries: &[(String, Vec<u8>)],
        ttl: Option<Duration>,
    ) -> BoxFuture<'a, Result<(), CacheBackendError>> {
        let entries = entries.to_vec();
        Box::pin(async move {
            for (key, value) in entries {
                self.set(&key, value, ttl).await?;
            }
            Ok(())
        })
    }
}

/// Constructs distributed cache backends from node address lists.
///
/// This is where the opaque cluster protocol plugs in: the bootstrap hands
/// over the node list for each cache role (`memcache`, `permacache`, ...)
/// and receives a ready backend. The factory runs once, single-threaded,
/// during startup.
pub trait CacheBackendFactory: Send + Sync {
    /// Build a backend for one cache role from its `host:port` node list.
    ///
    /// # Errors
    ///
    /// Returns [`CacheBackendError`] if a client for the node list cannot
    /// be constructed; the bootstrap treats this as fatal.
    fn distributed(
        &self,
        role: &str,
        nodes: &[String],
    ) -> Result<Arc<dyn CacheBackend>, CacheBackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_display() {
        let err = CacheBackendError::Unreachable {
            backend: "memcache".to_string(),
            reason: "connection refused".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("memcache"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn test_backend_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
        let err: CacheBackendError = io_err.into();
        assert!(matches!(err, CacheBackendError::Io(_)));
    }
}
