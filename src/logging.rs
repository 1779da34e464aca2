use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{Result, TurnclockError};

const DEFAULT_FILTER: &str = "turnclock=info";

/// Sends `tracing` output to `path`. The terminal belongs to the TUI, so
/// nothing is ever written to stdout or stderr. `RUST_LOG` overrides the
/// default filter.
pub fn init_file_logging(path: &Path) -> Result<()> {
    let file = open_log_file(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| TurnclockError::Logging(e.to_string()))
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| TurnclockError::io(parent, e))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| TurnclockError::io(path, e))
}
