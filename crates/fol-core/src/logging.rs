//! File logging via tracing
//!
//! Stdout carries game events, so diagnostics go to a daily-rolling file under
//! `<data_local_dir>/find-or-lose/logs/`. Filtering follows `FOL_LOG`:
//!
//! ```bash
//! FOL_LOG=debug findorlose
//! FOL_LOG=fol_app=trace,fol_photos=debug findorlose
//! ```

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Environment variable holding the tracing filter
pub const LOG_ENV: &str = "FOL_LOG";

const LOG_FILE_PREFIX: &str = "findorlose.log";
const DEFAULT_FILTER: &str = "find_or_lose=info,fol_app=info,fol_photos=info,warn";

/// Install the global subscriber. Call once, before the engine starts.
pub fn init() -> Result<()> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_layer = fmt::layer()
        .with_writer(RollingFileAppender::new(
            Rotation::DAILY,
            &log_dir,
            LOG_FILE_PREFIX,
        ))
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .with_timer(fmt::time::ChronoLocal::new(
            "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        ));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!("Find or Lose {} logging to {}", env!("CARGO_PKG_VERSION"), log_dir.display());
    Ok(())
}

/// `<data_local_dir>/find-or-lose/logs`, or `./find-or-lose/logs` when the
/// platform has no data directory
pub fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("find-or-lose")
        .join("logs")
}
