//! Configuration error type.
//!
//! Every variant here is fatal at startup: configuration errors are never
//! defaulted around, and a process with bad configuration must not serve
//! traffic.

use thiserror::Error;

/// Errors raised while coercing or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A key declared in more than one schema set.
    #[error("config key '{0}' appears in more than one schema type set")]
    SchemaOverlap(String),

    /// A value for an integer-typed key failed to parse.
    #[error("invalid integer for '{key}': {value:?}")]
    InvalidInt { key: String, value: String },

    /// A value for a float-typed key failed to parse.
    #[error("invalid float for '{key}': {value:?}")]
    InvalidFloat { key: String, value: String },

    /// A required key is absent from the configuration.
    #[error("required config key '{0}' is missing")]
    MissingKey(String),

    /// A database connection tuple had the wrong number of positional fields.
    #[error("database '{db}' declares {got} connection fields, expected {expected}")]
    EngineArity {
        db: String,
        expected: usize,
        got: usize,
    },

    /// A table binding or distinguished slot referenced an engine that was
    /// never declared in `databases`.
    #[error("'{referent}' references undeclared engine '{engine}'")]
    UndeclaredEngine { referent: String, engine: String },

    /// A table binding declared a kind other than `thing` or `relation`.
    #[error("table '{table}' has unknown kind '{kind}' (expected 'thing' or 'relation')")]
    UnknownTableKind { table: String, kind: String },

    /// A relation binding is missing its two endpoint type names.
    #[error("relation table '{table}' must declare two endpoint types before its engines")]
    MissingEndpoints { table: String },

    /// A table binding declared no engines.
    #[error("table '{table}' declares no engines")]
    NoEngines { table: String },

    /// The durable-write-queue flag is enabled without a broker host.
    #[error("amqp_host must be set when write_query_queue is enabled")]
    MissingBrokerHost,

    /// Failed to read or parse a configuration file.
    #[error("failed to load config file: {0}")]
    File(#[from] ini::Error),
}
