//! Ordered cache tiers with promotion and fan-out semantics.
//!
//! A [`CacheChain`] composes backends into a single facade:
//!
//! - `get` probes tiers in order and returns the first hit. A hit at tier
//!   *i* is written back into every tier before it, so subsequent reads in
//!   this process never re-query remote tiers for the same key.
//! - `set` and `delete` fan out to **all** tiers, so any tier alone
//!   remains a valid fallback source.
//! - `get_multi` applies the same per-key promotion, batched per tier.
//!
//! Failure semantics are a first-class contract, not accident: each tier
//! carries a [`TierPolicy`]. A `BestEffort` tier that errors degrades to a
//! miss (reads) or a no-op (writes) with a warning; only a `Required` tier
//! error surfaces to the caller. The process-private head tier is always
//! `Required`, so a degraded shared cluster can never take down request
//! handling.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::warn;

use super::traits::{CacheBackend, CacheBackendError};

/// Failure policy for one chain tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierPolicy {
    /// Errors propagate to the caller. The process-private head tier.
    Required,
    /// Errors degrade to a miss or no-op with a warning. Shared tiers.
    BestEffort,
}

struct ChainTier {
    backend: Arc<dyn CacheBackend>,
    policy: TierPolicy,
}

/// An ordered, non-empty sequence of cache backends.
///
/// Nearer (earlier) tiers are checked and written first. The sequence is
/// fixed at construction; the constructor taking the head tier makes the
/// at-least-one-tier invariant hold by construction.
pub struct CacheChain {
    tiers: Vec<ChainTier>,
}

impl CacheChain {
    /// Create a chain with its required, process-private head tier.
    pub fn new(local: Arc<dyn CacheBackend>) -> Self {
        Self {
            tiers: vec![ChainTier {
                backend: local,
                policy: TierPolicy::Required,
            }],
        }
    }

    /// Append a deeper tier with the given failure policy.
    pub fn with_tier(mut self, backend: Arc<dyn CacheBackend>, policy: TierPolicy) -> Self {
        self.tiers.push(ChainTier { backend, policy });
        self
    }

    /// Number of tiers in the chain.
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Always false: a chain has at least its head tier.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Probe tiers in order, returning the first hit.
    ///
    /// A hit at a deeper tier is promoted into every shallower tier before
    /// returning. Promotion writes are best-effort regardless of tier
    /// policy: the value was already found, so a failed write-back costs a
    /// future re-probe, nothing more.
    ///
    /// # Errors
    ///
    /// Only a `Required` tier failure is returned; `BestEffort` tier
    /// failures are logged and treated as misses.
    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheBackendError> {
        for (depth, tier) in self.tiers.iter().enumerate() {
            match tier.backend.get(key).await {
                Ok(Some(value)) => {
                    self.promote(key, &value, depth).await;
                    return Ok(Some(value));
                }
                Ok(None) => {}
                Err(err) => match tier.policy {
                    TierPolicy::Required => return Err(err),
                    TierPolicy::BestEffort => {
                        warn!(
                            backend = tier.backend.label(),
                            key,
                            error = %err,
                            "cache tier read failed; treating as miss"
                        );
                    }
                },
            }
        }
        Ok(None)
    }

    /// Write a value to every tier (fan-out write).
    ///
    /// # Errors
    ///
    /// Returns the first `Required` tier failure; `BestEffort` failures
    /// are logged and swallowed.
    pub async fn set(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Option<Duration>,
    ) -> Result<(), CacheBackendError> {
        let writes = self.tiers.iter().map(|tier| {
            let value = value.clone();
            async move { (tier, tier.backend.set(key, value, ttl).await) }
        });

        for (tier, result) in join_all(writes).await {
            if let Err(err) = result {
                match tier.policy {
                    TierPolicy::Required => return Err(err),
                    TierPolicy::BestEffort => {
                        warn!(
                            backend = tier.backend.label(),
                            key,
                            error = %err,
                            "cache tier write failed; continuing"
                        );
                    }
                }
            }
        }
        Ok(())
    }

    /// Delete a key from every tier (fan-out delete).
    ///
    /// # Errors
    ///
    /// Returns the first `Required` tier failure; `BestEffort` failures
    /// are logged and swallowed.
    pub async fn delete(&self, key: &str) -> Result<(), CacheBackendError> {
        let deletes = self
            .tiers
            .iter()
            .map(|tier| async move { (tier, tier.backend.delete(key).await) });

        for (tier, result) in join_all(deletes).await {
            if let Err(err) = result {
                match tier.policy {
                    TierPolicy::Required => return Err(err),
                    TierPolicy::BestEffort => {
                        warn!(
                            backend = tier.backend.label(),
                            key,
                            error = %err,
                            "cache tier delete failed; continuing"
                        );
                    }
                }
            }
        }
        Ok(())
    }

    /// Batched multi-key read with per-key promotion.
    ///
    /// Keys are probed tier by tier: each tier receives only the keys still
    /// missing, and values found at a deeper tier are batch-promoted into
    /// every shallower tier. Results are merged by key; keys found nowhere
    /// are simply absent from the result.
    ///
    /// # Errors
    ///
    /// Only a `Required` tier failure is returned.
    pub async fn get_multi(
        &self,
        keys: &[String],
    ) -> Result<HashMap<String, Vec<u8>>, CacheBackendError> {
        let mut merged: HashMap<String, Vec<u8>> = HashMap::new();
        let mut remaining: Vec<String> = keys.to_vec();

        for (depth, tier) in self.tiers.iter().enumerate() {
            if remaining.is_empty() {
                break;
            }

            let found = match tier.backend.get_multi(&remaining).await {
                Ok(found) => found,
                Err(err) => match tier.policy {
                    TierPolicy::Required => return Err(err),
                    TierPolicy::BestEffort => {
                        warn!(
                            backend = tier.backend.label(),
                            keys = remaining.len(),
                            error = %err,
                            "cache tier batch read failed; treating as misses"
                        );
                        continue;
                    }
                },
            };

            if found.is_empty() {
                continue;
            }

            remaining.retain(|key| !found.contains_key(key));

            if depth > 0 {
                let entries: Vec<(String, Vec<u8>)> = found
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                for shallower in &self.tiers[..depth] {
                    if let Err(err) = shallower.backend.set_multi(&entries, None).await {
                        warn!(
                            backend = shallower.backend.label(),
                            entries = entries.len(),
                            error = %err,
                            "batch promotion failed"
                        );
                    }
                }
            }

            merged.extend(found);
        }

        Ok(merged)
    }

    /// Copy a value found at `depth` into every shallower tier.
    async fn promote(&self, key: &str, value: &[u8], depth: usize) {
        for tier in &self.tiers[..depth] {
            if let Err(err) = tier.backend.set(key, value.to_vec(), None).await {
                warn!(
                    backend = tier.backend.label(),
                    key,
                    error = %err,
                    "promotion write failed"
                );
            }
        }
    }
}
