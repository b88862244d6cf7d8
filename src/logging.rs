//! Logging configuration using the tracing ecosystem.
//!
//! Output goes to a daily rotating file so the terminal UI stays intact.
//! Two environment variables override the defaults:
//!
//! - `RECORD_TABLE_LOG` sets the filter directive and wins over `RUST_LOG`,
//!   so the viewer can be traced without turning on every crate that
//!   honours `RUST_LOG`.
//! - `RECORD_TABLE_LOG_DIR` moves the log files out of the data directory.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Filter directive override for this crate.
pub const LOG_ENV: &str = "RECORD_TABLE_LOG";

/// Log directory override.
pub const LOG_DIR_ENV: &str = "RECORD_TABLE_LOG_DIR";

/// Default directive if neither override is set.
const DEFAULT_LOG_FILTER: &str = "record_table=info,warn";

const LOG_FILE_PREFIX: &str = "record-table.log";

/// Pick the filter directive: the crate override, then `RUST_LOG`, then the
/// default. Blank values count as unset.
fn resolve_directive(own: Option<String>, rust_log: Option<String>) -> String {
    [own, rust_log]
        .into_iter()
        .flatten()
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

fn filter_directive() -> String {
    resolve_directive(std::env::var(LOG_ENV).ok(), std::env::var("RUST_LOG").ok())
}

/// Initialize the logging system.
///
/// Logs are written to `record-table/logs/` in the platform local data
/// directory (`~/.local/share` on Linux) unless `RECORD_TABLE_LOG_DIR` is
/// set. Use `RECORD_TABLE_LOG=record_table=trace` for per-frame output.
///
/// # Errors
///
/// Returns an error if the log directory cannot be determined or created,
/// or if a global subscriber is already set.
pub fn init() -> anyhow::Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);

    let directive = filter_directive();
    let (filter, rejected) = match EnvFilter::try_new(&directive) {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new(DEFAULT_LOG_FILTER), Some(e)),
    };

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "record-table starting up");
    if let Some(e) = rejected {
        tracing::warn!(%directive, error = %e, "Invalid log filter, using default");
    }
    tracing::debug!(log_dir = %log_dir.display(), %directive, "Log directory");

    Ok(())
}

fn get_log_directory() -> anyhow::Result<PathBuf> {
    if let Some(dir) = std::env::var_os(LOG_DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("record-table").join("logs"))
}

/// Where log files are stored, for display to users.
pub fn log_directory() -> Option<PathBuf> {
    get_log_directory().ok()
}

/// Log application shutdown.
pub fn shutdown() {
    tracing::info!("record-table shutting down");
}
