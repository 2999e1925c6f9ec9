use std::io;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_DIR: &str = "./logs";
pub const LOG_FILE_PREFIX: &str = "options-pricer-client.log";

/// Console logging plus a daily-rotated JSON log file under `log_dir`.
///
/// Returns `Ok(false)` when a global subscriber was already installed; the
/// existing one stays in place and records the refusal.
pub fn init_logging(log_dir: impl AsRef<Path>) -> io::Result<bool> {
    let log_dir = log_dir.as_ref();
    std::fs::create_dir_all(log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);

    let console = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_ansi(true);

    let json_file = tracing_subscriber::fmt::layer()
        .with_writer(file_appender)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_ansi(false)
        .json();

    // RUST_LOG overrides, info otherwise
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match tracing_subscriber::registry()
        .with(console)
        .with(json_file)
        .with(filter)
        .try_init()
    {
        Ok(()) => {
            tracing::debug!(dir = %log_dir.display(), "Logging initialised");
            Ok(true)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Logging already initialised, keeping existing subscriber");
            Ok(false)
        }
    }
}
