//! Logging initialization
//!
//! Console output is always on; a daily-rotated `copra.log` file is
//! written when file logging is enabled. The returned `WorkerGuard`
//! must be held by `main` for the lifetime of the process so buffered
//! file output is flushed on shutdown.
//!
//! The filter honors `RUST_LOG`, defaulting to `info`.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// File-logging settings
#[derive(Clone, Debug)]
pub struct LoggingConfig {
    /// Directory for rolled log files
    pub dir: PathBuf,
    /// Whether to write `copra.log` at all
    pub file_enabled: bool,
}

/// Initialize the global tracing subscriber
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if config.file_enabled {
        let appender = RollingFileAppender::new(Rotation::DAILY, &config.dir, "copra.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);

        Registry::default()
            .with(env_filter)
            .with(fmt::layer())
            .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
            .init();

        Ok(Some(guard))
    } else {
        Registry::default()
            .with(env_filter)
            .with(fmt::layer())
            .init();

        Ok(None)
    }
}
