//! File logging. The TUI owns stdout, so log output goes to
//! `escaperoom.log` under [`crate::app_dirs::AppDirs::log_dir`].

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::error::{EscapeError, Result};

pub const LOG_FILE_NAME: &str = "escaperoom.log";

/// Install the global subscriber. Level comes from `RUST_LOG`, default `info`.
///
/// Keep the returned guard alive for the whole run; dropping it flushes and
/// stops the background writer.
pub fn init_logging(log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    let appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let subscriber = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| EscapeError::Logging(Box::new(e)))?;

    tracing::info!("escaperoom v{} started", env!("CARGO_PKG_VERSION"));

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn second_init_is_rejected() {
        let dir = tempdir().unwrap();
        let log_dir = dir.path().join("logs");

        let _guard = init_logging(&log_dir).unwrap();
        assert!(log_dir.join(LOG_FILE_NAME).exists());

        let err = init_logging(&log_dir).unwrap_err();
        assert!(matches!(err, EscapeError::Logging(_)));
    }
}
