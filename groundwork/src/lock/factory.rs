//! Lock factory and guard implementation.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::runtime::Handle;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::cache::{CacheBackend, CacheBackendError};

/// How long a held lock survives if its owner dies without releasing.
///
/// The lease is refreshed by nothing: a crashed holder simply lets the
/// entry expire, after which the lock becomes acquirable again. 30 seconds
/// bounds the damage of an orphaned lock without making crashes painful.
const LOCK_LEASE: Duration = Duration::from_secs(30);

/// Delay between acquisition attempts while another process holds the lock.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Errors from lock acquisition.
///
/// The two variants are deliberately distinct: a [`LockError::Timeout`]
/// means contention and may be retried by the caller, while a
/// [`LockError::Unavailable`] means the coordination tier itself is down
/// and retrying will not help until it recovers.
#[derive(Debug, Error)]
pub enum LockError {
    /// Another holder kept the lock past the caller's timeout.
    #[error("timed out after {waited:?} acquiring lock '{name}'")]
    Timeout { name: String, waited: Duration },

    /// The coordination backend could not be reached.
    #[error("lock backend unavailable for '{name}': {source}")]
    Unavailable {
        name: String,
        #[source]
        source: CacheBackendError,
    },
}

/// Builds named, distributed, mutually-exclusive locks.
///
/// One factory is created at bootstrap atop the designated distributed
/// cache tier and shared by all request-handling code in the process.
pub struct LockFactory {
    backend: Arc<dyn CacheBackend>,
    owner: String,
    lease: Duration,
    poll_interval: Duration,
}

impl LockFactory {
    /// Create a factory coordinating through `backend`.
    ///
    /// # Arguments
    ///
    /// * `backend` - The distributed cache tier used for coordination
    /// * `owner` - Identity token recorded in held locks (`host:pid`)
    pub fn new(backend: Arc<dyn CacheBackend>, owner: impl Into<String>) -> Self {
        Self {
            backend,
            owner: owner.into(),
            lease: LOCK_LEASE,
            poll_interval: POLL_INTERVAL,
        }
    }

    /// Override the orphaned-lock lease duration.
    pub fn with_lease(mut self, lease: Duration) -> Self {
        self.lease = lease;
        self
    }

    /// Override the contention poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Acquire the named lock, waiting up to `timeout`.
    ///
    /// Returns a [`LockGuard`] that releases the lock when dropped or when
    /// [`LockGuard::release`] is awaited.
    ///
    /// # Errors
    ///
    /// [`LockError::Timeout`] if another holder kept the lock for the whole
    /// wait; [`LockError::Unavailable`] if the coordination backend errors.
    pub async fn acquire(&self, name: &str, timeout: Duration) -> Result<LockGuard, LockError> {
        let key = format!("lock:{name}");
        let started = Instant::now();
        let deadline = started + timeout;

        loop {
            let attempt = self
                .backend
                .add(&key, self.owner.clone().into_bytes(), Some(self.lease))
                .await;

            match attempt {
                Ok(true) => {
                    debug!(lock = name, owner = %self.owner, "lock acquired");
                    return Ok(LockGuard {
                        backend: Arc::clone(&self.backend),
                        key,
                        name: name.to_string(),
                        released: false,
                    });
                }
                Ok(false) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Err(LockError::Timeout {
                            name: name.to_string(),
                            waited: now - started,
                        });
                    }
                    let nap = self.poll_interval.min(deadline - now);
                    tokio::time::sleep(nap).await;
                }
                Err(source) => {
                    return Err(LockError::Unavailable {
                        name: name.to_string(),
                        source,
                    });
                }
            }
        }
    }
}

/// A held distributed lock.
///
/// Release happens on every exit path: explicitly via [`release`], or on
/// drop. Drop release is best-effort (it needs a live runtime to spawn the
/// delete); if neither path runs, the lease expiry bounds how long the
/// lock stays orphaned.
///
/// [`release`]: LockGuard::release
pub struct LockGuard {
    backend: Arc<dyn CacheBackend>,
    key: String,
    name: String,
    released: bool,
}

impl LockGuard {
    /// The lock's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Release the lock, making it immediately available to other waiters.
    pub async fn release(mut self) {
        self.released = true;
        if let Err(err) = self.backend.delete(&self.key).await {
            // The lease will expire it; holders further along only wait
            // longer than necessary.
            warn!(lock = %self.name, error = %err, "lock release failed");
        } else {
            debug!(lock = %self.name, "lock released");
        }
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        match Handle::try_current() {
            Ok(handle) => {
                let backend = Arc::clone(&self.backend);
                let key = std::mem::take(&mut self.key);
                let name = std::mem::take(&mut self.name);
                handle.spawn(async move {
                    if let Err(err) = backend.delete(&key).await {
                        warn!(lock = %name, error = %err, "drop-release failed");
                    }
                });
            }
            Err(_) => {
                warn!(
                    lock = %self.name,
                    "lock dropped outside a runtime; waiting on lease expiry"
                );
            }
        }
    }
}
