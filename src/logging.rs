//! Tracing setup for the binary
//!
//! Logs go to `<data dir>/vtemplate.log` so stdout stays reserved for command
//! output. The filter comes from `VTEMPLATE_LOG` (default `warn`); setting
//! `VTEMPLATE_LOG_FORMAT=json` switches to JSON lines.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::config::{LOG_ENV, LOG_FILE_NAME};

/// Environment variable selecting the log format
pub const LOG_FORMAT_ENV: &str = "VTEMPLATE_LOG_FORMAT";

const DEFAULT_LOG_FILTER: &str = "warn";

/// Install the global subscriber, logging into `log_dir`.
///
/// Falls back to stderr when the log file cannot be opened. The returned
/// guard flushes the file writer on drop and must be held until exit.
pub fn init(log_dir: &Path) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let json = std::env::var(LOG_FORMAT_ENV).is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    let (writer, guard) = match file_appender(log_dir) {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(writer), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stderr), None),
    };

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = if json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(writer)
            .boxed()
    };

    // Another subscriber may already be installed (e.g. in tests)
    let _ = tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init();

    guard
}

fn file_appender(log_dir: &Path) -> Option<RollingFileAppender> {
    std::fs::create_dir_all(log_dir).ok()?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(log_dir)
        .ok()
}
