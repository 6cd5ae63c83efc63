//! Logging configuration using the tracing ecosystem.
//!
//! The TUI owns the terminal, so every log line goes to a daily-rotated file.
//! Panics are written there too: with the alternate screen active, a panic
//! message on stderr would be lost when the screen is torn down.

use std::path::{Path, PathBuf};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log level if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "membertable=info,warn";

/// File name prefix; the appender adds the date.
const LOG_FILE_PREFIX: &str = "membertable.log";

/// Initialize the logging system and return the log directory.
///
/// Logs go under `<data_local_dir>/membertable/logs/`, e.g.
/// `~/.local/share/membertable/logs/` on Linux. `RUST_LOG` overrides the
/// default `membertable=info,warn` filter.
///
/// # Errors
///
/// Returns an error if the log directory cannot be determined or created, or
/// if a global subscriber is already set.
pub fn init() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;
    let log_dir = log_directory_in(&base_dir);
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

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
    log_panics();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "membertable starting up");
    tracing::debug!(log_dir = %log_dir.display(), "Log directory");

    Ok(log_dir)
}

/// Where logs live under a platform data directory.
fn log_directory_in(base_dir: &Path) -> PathBuf {
    base_dir.join("membertable").join("logs")
}

/// Chain a panic hook that records the panic before the default output.
fn log_panics() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_default();
        tracing::error!(%location, "panic: {}", panic_message(info.payload()));
        previous(info);
    }));
}

/// Text of a panic payload, for the two payload types `panic!` produces.
fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}

/// Log application shutdown.
pub fn shutdown() {
    tracing::info!("membertable shutting down");
}
