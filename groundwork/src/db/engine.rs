//! Physical database engine descriptors.

use std::sync::Arc;

use crate::config::ConfigError;

/// Shared handle to one physical engine.
pub type EngineRef = Arc<Engine>;

/// Positional connection-parameter schema for `<name>_db` tuples.
const PARAM_NAMES: [&str; 6] = [
    "name",
    "db_host",
    "db_user",
    "db_pass",
    "pool_size",
    "max_overflow",
];

/// A physical database engine: connection target plus pooling parameters.
///
/// Engines are plain descriptors; nothing here opens a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Engine {
    /// Engine's own name (first positional field).
    pub name: String,
    /// Database server host.
    pub host: String,
    /// Connection user.
    pub user: String,
    /// Connection credential.
    pub password: String,
    /// Base connection pool size.
    pub pool_size: u32,
    /// Connections allowed beyond the base pool under load.
    pub max_overflow: u32,
}

impl Engine {
    /// Build an engine from the positional fields of a `<db>_db` tuple.
    ///
    /// The field count is validated strictly: missing or extra positional
    /// fields are a fatal configuration error, never silently truncated.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EngineArity`] on a wrong field count,
    /// [`ConfigError::InvalidInt`] when a pool parameter fails to parse.
    pub fn from_params(db: &str, fields: &[String]) -> Result<Self, ConfigError> {
        if fields.len() != PARAM_NAMES.len() {
            return Err(ConfigError::EngineArity {
                db: db.to_string(),
                expected: PARAM_NAMES.len(),
                got: fields.len(),
            });
        }

        let parse_u32 = |index: usize| -> Result<u32, ConfigError> {
            fields[index]
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidInt {
                    key: format!("{db}_db.{}", PARAM_NAMES[index]),
                    value: fields[index].clone(),
                })
        };

        Ok(Self {
            name: fields[0].clone(),
            host: fields[1].clone(),
            user: fields[2].clone(),
            password: fields[3].clone(),
            pool_size: parse_u32(4)?,
            max_overflow: parse_u32(5)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_full_tuple_parses() {
        let engine = Engine::from_params(
            "main",
            &fields(&["main", "db1.example.com", "app", "secret", "5", "10"]),
        )
        .unwrap();
        assert_eq!(engine.name, "main");
        assert_eq!(engine.host, "db1.example.com");
        assert_eq!(engine.pool_size, 5);
        assert_eq!(engine.max_overflow, 10);
    }

    #[test]
    fn test_missing_fields_are_fatal() {
        let result = Engine::from_params("main", &fields(&["main", "db1", "app", "secret"]));
        assert!(matches!(
            result,
            Err(ConfigError::EngineArity {
                expected: 6,
                got: 4,
                ..
            })
        ));
    }

    #[test]
    fn test_extra_fields_are_fatal() {
        let result = Engine::from_params(
            "main",
            &fields(&["main", "db1", "app", "secret", "5", "10", "surprise"]),
        );
        assert!(matches!(result, Err(ConfigError::EngineArity { got: 7, .. })));
    }

    #[test]
    fn test_bad_pool_size_is_fatal() {
        let result = Engine::from_params(
            "main",
            &fields(&["main", "db1", "app", "secret", "many", "10"]),
        );
        assert!(matches!(
            result,
            Err(ConfigError::InvalidInt { key, .. }) if key == "main_db.pool_size"
        ));
    }
}
