//! Log setup. The game owns the terminal, so logs only go to a file.

use std::{fs::File, path::Path, sync::Mutex};

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "info";

/// Install a subscriber writing to `log_file`.
///
/// Without a file nothing is installed and all events are dropped. Returns
/// whether logging is active.
pub fn init(log_file: Option<&Path>) -> Result<bool> {
    let Some(path) = log_file else {
        return Ok(false);
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!("Failed to install log subscriber: {err}"))?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_no_file_means_no_logging() {
        assert!(!init(None).unwrap());
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("snake.log");
        assert!(init(Some(&path)).is_err());
    }
}
