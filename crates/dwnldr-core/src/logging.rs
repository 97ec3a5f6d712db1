//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

const LOG_ENV: &str = "DWNLDR_LOG";
const DEFAULT_FILTER: &str = "dwnldr=info,warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize the logging subsystem for the TUI
///
/// The terminal owns stdout, so logs go to a daily rolling file under
/// `~/.local/share/dwnldr/logs/`. Log level is controlled by the
/// `DWNLDR_LOG` environment variable.
///
/// # Examples
/// ```bash
/// DWNLDR_LOG=debug dwnldr
/// DWNLDR_LOG=dwnldr_api=trace dwnldr
/// ```
pub fn init() -> Result<()> {
    let log_dir = log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "dwnldr.log");

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("═══════════════════════════════════════════════════════");
    tracing::info!("dwnldr starting");
    tracing::info!("Log directory: {}", log_dir.display());
    tracing::info!("═══════════════════════════════════════════════════════");

    Ok(())
}

/// Initialize logging for one-shot headless commands (stderr, no file)
pub fn init_stderr() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();
}

/// Directory holding the daily `dwnldr.log.<date>` files
pub fn log_directory() -> Result<PathBuf> {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    Ok(base.join("dwnldr").join("logs"))
}
