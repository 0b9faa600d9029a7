//! Tracing setup for the CLI.
//!
//! Interactive mode writes logs to files under `${NTX_HOME}/logs` so log
//! lines never corrupt the alternate screen. One-shot commands log to
//! stderr. The filter honors `RUST_LOG` and defaults to `info`.

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use ntx_core::config::paths;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initializes logging for one-shot commands (stderr).
pub fn init_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

/// Initializes logging for interactive mode (daily-rotated file).
///
/// The returned guard must be held for the life of the process; dropping it
/// flushes and stops the background writer.
pub fn init_file() -> Result<WorkerGuard> {
    let logs_dir = paths::logs_dir();
    std::fs::create_dir_all(&logs_dir)?;

    let appender = tracing_appender::rolling::daily(&logs_dir, "ntx.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .init();

    Ok(guard)
}
