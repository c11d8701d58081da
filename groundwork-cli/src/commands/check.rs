//! `groundwork check` - validate a configuration file.

use std::path::Path;

use crate::commands::bootstrap_from_file;
use crate::error::CliError;

/// Run the bootstrap and report the outcome.
pub fn run(config_path: &Path) -> Result<(), CliError> {
    let globals = bootstrap_from_file(config_path)?;

    println!("ok: {}", config_path.display());
    println!("  cache tiers:  {}", globals.cache().len());
    println!("  db engines:   {}", globals.db().engines().count());
    println!("  db tables:    {}", globals.db().tables().count());
    println!("  debug:        {}", globals.debug());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_ini(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_check_accepts_valid_config() {
        let file = write_ini(
            "memcaches = 127.0.0.1:11211\n\
             permacaches = 127.0.0.1:11212\n\
             rendercaches = 127.0.0.1:11213\n\
             rec_cache = 127.0.0.1:11214\n",
        );
        assert!(run(file.path()).is_ok());
    }

    #[test]
    fn test_check_rejects_bad_config() {
        // write_query_queue without amqp_host must fail the bootstrap.
        let file = write_ini(
            "memcaches = 127.0.0.1:11211\n\
             permacaches = 127.0.0.1:11212\n\
             rendercaches = 127.0.0.1:11213\n\
             rec_cache = 127.0.0.1:11214\n\
             write_query_queue = true\n",
        );
        assert!(run(file.path()).is_err());
    }

    #[test]
    fn test_check_rejects_missing_file() {
        assert!(run(Path::new("/nonexistent/groundwork.ini")).is_err());
    }
}
