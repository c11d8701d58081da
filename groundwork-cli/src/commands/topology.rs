//! `groundwork topology` - print the resolved database topology.

use std::path::Path;

use groundwork::db::TableKind;

use crate::commands::bootstrap_from_file;
use crate::error::CliError;

/// Print engines, distinguished slots, and table bindings.
pub fn run(config_path: &Path) -> Result<(), CliError> {
    let globals = bootstrap_from_file(config_path)?;
    let db = globals.db();

    if db.is_empty() {
        println!("(empty topology: cache-only deployment)");
        return Ok(());
    }

    println!("engines:");
    for (name, engine) in db.engines() {
        println!(
            "  {name} -> {}@{} (pool {}, overflow {})",
            engine.user, engine.host, engine.pool_size, engine.max_overflow
        );
    }

    if let Some(engine) = db.distinguished_engine(TableKind::Thing) {
        println!("type engine:          {}", engine.name);
    }
    if let Some(engine) = db.distinguished_engine(TableKind::Relation) {
        println!("relation-type engine: {}", engine.name);
    }

    println!("tables:");
    for binding in db.tables() {
        let shards: Vec<&str> = binding.engines.iter().map(|e| e.name.as_str()).collect();
        match (&binding.kind, &binding.endpoints) {
            (TableKind::Relation, Some((left, right))) => {
                println!(
                    "  {} (relation {left} -> {right}) on [{}]",
                    binding.name,
                    shards.join(", ")
                );
            }
            _ => {
                println!("  {} (thing) on [{}]", binding.name, shards.join(", "));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_topology_on_full_config() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            b"memcaches = 127.0.0.1:11211\n\
              permacaches = 127.0.0.1:11212\n\
              rendercaches = 127.0.0.1:11213\n\
              rec_cache = 127.0.0.1:11214\n\
              databases = main\n\
              main_db = main, db1, app, pw, 5, 10\n\
              type_db = main\n\
              rel_type_db = main\n\
              db_table_link = thing, main\n\
              db_table_vote = relation, Account, Link, main\n",
        )
        .unwrap();
        file.flush().unwrap();

        assert!(run(file.path()).is_ok());
    }

    #[test]
    fn test_topology_on_cache_only_config() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            b"memcaches = 127.0.0.1:11211\n\
              permacaches = 127.0.0.1:11212\n\
              rendercaches = 127.0.0.1:11213\n\
              rec_cache = 127.0.0.1:11214\n",
        )
        .unwrap();
        file.flush().unwrap();

        assert!(run(file.path()).is_ok());
    }
}
