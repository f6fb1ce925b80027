//! File-based tracing setup. Stdout belongs to the TUI.

use crate::error::{CatswpError, Result};
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `CATSWP_LOG=debug`
pub const LOG_ENV: &str = "CATSWP_LOG";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber, appending to `path`
pub fn init(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CatswpError::LoggingError(format!("Failed to create log directory: {}", e))
        })?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| CatswpError::LoggingError(format!("Failed to open {:?}: {}", path, e)))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| CatswpError::LoggingError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_log_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("logs").join("catswp.log");

        // A global subscriber may already be installed by another test
        let _ = init(&path);

        assert!(path.exists());
    }
}
