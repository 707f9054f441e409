use std::fs::{self, OpenOptions};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::{self, NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LogFormat, LoggingConfig};

/// Keeps the background log writer alive; dropping it flushes pending lines.
pub struct LoggingGuard {
    _guard: WorkerGuard,
}

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init_logging(logging: &LoggingConfig) -> Result<LoggingGuard> {
    let (writer, guard) = match logging.file.as_deref() {
        Some(path) => file_writer(path)?,
        None => tracing_appender::non_blocking(std::io::stdout()),
    };

    let level = logging.level().unwrap_or(Level::INFO);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::NONE)
        .with_ansi(logging.file.is_none())
        .with_writer(writer);

    // Ignore error if a global subscriber is already set (e.g., when running in tests)
    let _ = match logging.format {
        LogFormat::Json => {
            tracing::subscriber::set_global_default(builder.json().with_current_span(false).finish())
        }
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish()),
    };

    Ok(LoggingGuard { _guard: guard })
}

fn file_writer(path: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory at {}", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file at {}", path.display()))?;

    Ok(non_blocking::NonBlockingBuilder::default()
        .lossy(false)
        .finish(file))
}
