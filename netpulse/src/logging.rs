// netpulse/src/logging.rs

use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "etl.log";
const DEFAULT_FILTER: &str = "netpulse=info,netpulse_core=info";

/// Installs the global subscriber: console on stderr, plus a daily rolling
/// `logs/etl.log` unless `file` is false.
///
/// The returned guard flushes the file writer on drop, so keep it alive
/// until the process exits.
pub fn init_logging(file: bool) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let console_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let (file_layer, guard) = if file && fs::create_dir_all(LOG_DIR).is_ok() {
        let appender = tracing_appender::rolling::daily(LOG_DIR, LOG_FILE);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer().with_ansi(false).with_writer(writer);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    guard
}
