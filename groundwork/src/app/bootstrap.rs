//! The `Globals` object and its one-shot construction.

use std::collections::BTreeSet;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;

use super::config::AppConfig;
use super::error::BootstrapError;
use crate::cache::{
    CacheBackend, CacheBackendFactory, CacheChain, MemoryBackend, TierPolicy,
};
use crate::config::{ConfigError, TypedConfig};
use crate::db::{self, DbTopology};
use crate::lock::LockFactory;

/// Process-wide state assembled once at startup.
///
/// `Globals` is structurally immutable after [`bootstrap`] returns: request
/// handling reads it concurrently from many tasks with no locking. The one
/// exception is the advisory [`shutdown`] flag, which transitions
/// false→true exactly once during graceful drain and is polled, never
/// waited on.
///
/// There is no teardown hook; the process exits and best-effort cleanup
/// (lock lease expiry, connection close) happens on the other side of the
/// wire.
///
/// [`bootstrap`]: Globals::bootstrap
/// [`shutdown`]: Globals::shutdown_requested
pub struct Globals {
    config: TypedConfig,
    cache: CacheChain,
    memcache: Arc<dyn CacheBackend>,
    permacache: Arc<dyn CacheBackend>,
    rendercache: Arc<dyn CacheBackend>,
    rec_cache: Arc<dyn CacheBackend>,
    locks: LockFactory,
    dbm: DbTopology,
    admins: BTreeSet<String>,
    hostname: String,
    pid: u32,
    debug: bool,
    shutdown: AtomicBool,
}

impl Globals {
    /// Run the bootstrap sequence and publish the assembled state.
    ///
    /// Runs single-threaded, exactly once per process, before any
    /// request-serving concurrency begins. Distributed tiers are built
    /// through `factory`; the wire protocol behind them is not this
    /// layer's concern.
    ///
    /// # Errors
    ///
    /// Any [`BootstrapError`] means startup must abort. There is no
    /// partial-success mode.
    pub fn bootstrap(
        config: AppConfig,
        factory: &dyn CacheBackendFactory,
    ) -> Result<Self, BootstrapError> {
        let typed = TypedConfig::coerce(&config.raw, &config.schema)?;
        let debug_flag = typed.bool_flag("debug").unwrap_or(false);
        info!(debug = debug_flag, "configuration coerced");

        // Cache tiers. The local tier is always first and process-private;
        // the memcache tier behind it is shared and best-effort.
        let local: Arc<dyn CacheBackend> =
            Arc::new(MemoryBackend::new("local", config.local_cache_max_bytes));
        let memcache = build_tier(factory, &typed, "memcache", "memcaches")?;
        let cache = CacheChain::new(Arc::clone(&local))
            .with_tier(Arc::clone(&memcache), TierPolicy::BestEffort);

        let permacache = build_tier(factory, &typed, "permacache", "permacaches")?;
        let rendercache = build_tier(factory, &typed, "rendercache", "rendercaches")?;
        let rec_cache = build_tier(factory, &typed, "rec_cache", "rec_cache")?;
        info!(tiers = cache.len(), "cache chain assembled");

        // Locks coordinate through the memcache tier; the owner token is
        // this process's identity.
        let hostname = hostname();
        let pid = process::id();
        let locks = LockFactory::new(Arc::clone(&memcache), format!("{hostname}:{pid}"));

        let dbm = db::resolve(&typed)?;
        info!(
            engines = dbm.engines().count(),
            tables = dbm.tables().count(),
            "database topology resolved"
        );

        // Cross-field invariant: durable query writes need a broker.
        if typed.bool_flag("write_query_queue") == Some(true)
            && typed.str_value("amqp_host").map_or(true, str::is_empty)
        {
            return Err(ConfigError::MissingBrokerHost.into());
        }

        let admins = typed
            .tuple("admins")
            .iter()
            .map(|name| name.to_lowercase())
            .collect();

        info!(%hostname, pid, "bootstrap complete");

        Ok(Self {
            config: typed,
            cache,
            memcache,
            permacache,
            rendercache,
            rec_cache,
            locks,
            dbm,
            admins,
            hostname,
            pid,
            debug: debug_flag,
            shutdown: AtomicBool::new(false),
        })
    }

    /// The coerced configuration.
    pub fn config(&self) -> &TypedConfig {
        &self.config
    }

    /// The general-purpose cache facade (local tier + memcache tier).
    pub fn cache(&self) -> &CacheChain {
        &self.cache
    }

    /// The shared memcache tier on its own, bypassing the local tier.
    pub fn memcache(&self) -> &Arc<dyn CacheBackend> {
        &self.memcache
    }

    /// Long-lived storage cache.
    pub fn permacache(&self) -> &Arc<dyn CacheBackend> {
        &self.permacache
    }

    /// Rendered-fragment cache.
    pub fn rendercache(&self) -> &Arc<dyn CacheBackend> {
        &self.rendercache
    }

    /// Recommendation cache.
    pub fn rec_cache(&self) -> &Arc<dyn CacheBackend> {
        &self.rec_cache
    }

    /// The distributed lock factory.
    pub fn locks(&self) -> &LockFactory {
        &self.locks
    }

    /// The database topology.
    pub fn db(&self) -> &DbTopology {
        &self.dbm
    }

    /// Whether a (lowercased) account name is a site administrator.
    pub fn is_admin(&self, name: &str) -> bool {
        self.admins.contains(&name.to_lowercase())
    }

    /// Deployment timezone name, carried uninterpreted.
    pub fn timezone(&self) -> Option<&str> {
        self.config.str_value("timezone")
    }

    /// Timezone used for user-facing rendering; falls back to the
    /// deployment timezone when not set on its own.
    pub fn display_timezone(&self) -> Option<&str> {
        self.config
            .str_value("display_timezone")
            .or_else(|| self.config.str_value("timezone"))
    }

    /// This process's hostname.
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// This process's id.
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Debug mode, consumed by error rendering and log verbosity.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Whether graceful drain has been requested.
    ///
    /// Workers poll this between requests; relaxed visibility is
    /// acceptable because the flag only ever transitions false→true.
    pub fn shutdown_requested(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }

    /// Request graceful drain. Safe to call from a signal handler context;
    /// idempotent.
    pub fn request_shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}

/// Build one distributed tier from its configured node list.
fn build_tier(
    factory: &dyn CacheBackendFactory,
    typed: &TypedConfig,
    role: &'static str,
    nodes_key: &str,
) -> Result<Arc<dyn CacheBackend>, BootstrapError> {
    let nodes = typed.tuple(nodes_key);
    if nodes.is_empty() {
        return Err(ConfigError::MissingKey(nodes_key.to_string()).into());
    }
    factory
        .distributed(role, nodes)
        .map_err(|source| BootstrapError::CacheConnect { role, source })
}

/// System hostname; the lock-owner token only needs to distinguish
/// machines, and `pid` already distinguishes processes on one machine.
fn hostname() -> String {
    let name = gethostname::gethostname().to_string_lossy().into_owned();
    if name.is_empty() {
        "localhost".to_string()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InProcessFactory;
    use crate::config::RawConfig;
    use crate::db::TableKind;
    use std::time::Duration;

    fn raw(pairs: &[(&str, &str)]) -> RawConfig {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn minimal_pairs() -> Vec<(&'static str, &'static str)> {
        vec![
            ("debug", "true"),
            ("memcaches", "127.0.0.1:11211"),
            ("permacaches", "127.0.0.1:11212"),
            ("rendercaches", "127.0.0.1:11213"),
            ("rec_cache", "127.0.0.1:11214"),
        ]
    }

    fn bootstrap(pairs: &[(&str, &str)]) -> Result<Globals, BootstrapError> {
        Globals::bootstrap(
            AppConfig::new(raw(pairs)).with_local_cache_size(1_000_000),
            &InProcessFactory::default(),
        )
    }

    #[test]
    fn test_minimal_bootstrap() {
        let globals = bootstrap(&minimal_pairs()).unwrap();
        assert!(globals.debug());
        assert_eq!(globals.cache().len(), 2);
        assert!(globals.db().is_empty());
        assert!(!globals.shutdown_requested());
    }

    #[test]
    fn test_missing_cache_nodes_abort_startup() {
        let pairs: Vec<_> = minimal_pairs()
            .into_iter()
            .filter(|(k, _)| *k != "rendercaches")
            .collect();
        let result = bootstrap(&pairs);
        assert!(matches!(
            result,
            Err(BootstrapError::Config(ConfigError::MissingKey(key))) if key == "rendercaches"
        ));
    }

    #[test]
    fn test_bad_config_value_aborts_startup() {
        let mut pairs = minimal_pairs();
        pairs.push(("page_cache_time", "whenever"));
        assert!(matches!(
            bootstrap(&pairs),
            Err(BootstrapError::Config(ConfigError::InvalidInt { .. }))
        ));
    }

    #[test]
    fn test_write_query_queue_requires_broker_host() {
        let mut pairs = minimal_pairs();
        pairs.push(("write_query_queue", "true"));
        assert!(matches!(
            bootstrap(&pairs),
            Err(BootstrapError::Config(ConfigError::MissingBrokerHost))
        ));

        pairs.push(("amqp_host", "mq.example.com"));
        assert!(bootstrap(&pairs).is_ok());
    }

    #[test]
    fn test_write_query_queue_off_needs_no_broker() {
        let mut pairs = minimal_pairs();
        pairs.push(("write_query_queue", "false"));
        assert!(bootstrap(&pairs).is_ok());
    }

    #[test]
    fn test_topology_is_resolved() {
        let mut pairs = minimal_pairs();
        pairs.extend([
            ("databases", "main"),
            ("main_db", "main, db1, app, pw, 5, 10"),
            ("type_db", "main"),
            ("rel_type_db", "main"),
            ("db_table_link", "thing, main"),
        ]);
        let globals = bootstrap(&pairs).unwrap();

        assert!(!globals.db().is_empty());
        assert_eq!(globals.db().engine_for("link").unwrap().len(), 1);
        assert_eq!(
            globals
                .db()
                .distinguished_engine(TableKind::Thing)
                .unwrap()
                .name,
            "main"
        );
    }

    #[test]
    fn test_topology_error_aborts_startup() {
        let mut pairs = minimal_pairs();
        pairs.extend([
            ("databases", "main"),
            ("main_db", "main, db1, app, pw, 5, 10"),
            ("type_db", "archive"),
            ("rel_type_db", "main"),
        ]);
        assert!(matches!(
            bootstrap(&pairs),
            Err(BootstrapError::Config(ConfigError::UndeclaredEngine { .. }))
        ));
    }

    #[test]
    fn test_admins_are_lowercased() {
        let mut pairs = minimal_pairs();
        pairs.push(("admins", "Alice, BOB"));
        let globals = bootstrap(&pairs).unwrap();
        assert!(globals.is_admin("alice"));
        assert!(globals.is_admin("Bob"));
        assert!(!globals.is_admin("mallory"));
    }

    #[test]
    fn test_host_identity_is_captured() {
        let globals = bootstrap(&minimal_pairs()).unwrap();
        // The owner token must name a real machine, not a missing env var.
        assert!(!globals.hostname().is_empty());
        assert_eq!(globals.hostname(), hostname());
        assert_eq!(globals.pid(), std::process::id());
    }

    #[test]
    fn test_display_timezone_falls_back_to_timezone() {
        let mut pairs = minimal_pairs();
        pairs.push(("timezone", "UTC"));
        let globals = bootstrap(&pairs).unwrap();
        assert_eq!(globals.timezone(), Some("UTC"));
        assert_eq!(globals.display_timezone(), Some("UTC"));

        pairs.push(("display_timezone", "America/New_York"));
        let globals = bootstrap(&pairs).unwrap();
        assert_eq!(globals.display_timezone(), Some("America/New_York"));
    }

    #[test]
    fn test_shutdown_flag_transitions_once() {
        let globals = bootstrap(&minimal_pairs()).unwrap();
        assert!(!globals.shutdown_requested());
        globals.request_shutdown();
        assert!(globals.shutdown_requested());
        globals.request_shutdown();
        assert!(globals.shutdown_requested());
    }

    #[tokio::test]
    async fn test_published_cache_round_trips() {
        let globals = bootstrap(&minimal_pairs()).unwrap();
        globals
            .cache()
            .set("k", vec![42], Some(Duration::from_secs(60)))
            .await
            .unwrap();
        assert_eq!(globals.cache().get("k").await.unwrap(), Some(vec![42]));
    }

    #[tokio::test]
    async fn test_published_locks_are_exclusive() {
        let globals = bootstrap(&minimal_pairs()).unwrap();
        let guard = globals
            .locks()
            .acquire("x", Duration::from_millis(100))
            .await
            .unwrap();
        let contended = globals
            .locks()
            .acquire("x", Duration::from_millis(30))
            .await;
        assert!(contended.is_err());
        guard.release().await;
    }
}
