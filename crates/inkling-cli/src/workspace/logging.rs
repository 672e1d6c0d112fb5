use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;

use super::{WorkspaceError, WorkspacePaths, WorkspaceResult};

const DEFAULT_FILTER: &str = "info";

/// Send JSON log records to `logs/inkling.log` inside the workspace.
///
/// `RUST_LOG` overrides the `info` default. Nothing is written to the
/// terminal, which belongs to the command output and the TUI.
pub fn init_logging(paths: &WorkspacePaths) -> WorkspaceResult<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths.log_path())?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let layer = tracing_subscriber::fmt::layer()
        .json()
        .with_timer(UtcTime::rfc_3339())
        .with_current_span(false)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|err| WorkspaceError::Logging(err.to_string()))
}
