use std::path::PathBuf;
use std::sync::OnceLock;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;

/// Environment variable holding `EnvFilter` directives.
pub const LOG_FILTER_KEY: &str = "LOAN_TOOLKIT_LOG";
const DEFAULT_FILTER: &str = "error,loan_toolkit=debug";

/// Log directory overrides, in priority order.
pub const LOG_DIR_KEYS: [&str; 2] = ["LOAN_TOOLKIT_LOG_DIR", "HOME_LOAN_TOOLKIT_LOG_DIR"];

static ACTIVE_LOG_DIR: OnceLock<PathBuf> = OnceLock::new();

pub fn default_log_dir() -> PathBuf {
    if let Some(path) = log_dir_from(|key| std::env::var(key).ok()) {
        return path;
    }

    #[cfg(target_os = "macos")]
    {
        let mut path = dirs::home_dir().unwrap_or_else(std::env::temp_dir);
        path.push("Library/Logs/LoanToolkit");
        path
    }
    #[cfg(target_os = "windows")]
    {
        let mut path = dirs::data_local_dir().unwrap_or_else(std::env::temp_dir);
        path.push("LoanToolkit\\Logs");
        path
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        let mut path = dirs::data_local_dir()
            .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
            .unwrap_or_else(std::env::temp_dir);
        path.push("loan-toolkit/logs");
        path
    }
}

fn fallback_log_dir() -> PathBuf {
    std::env::temp_dir().join("loan-toolkit").join("logs")
}

#[must_use]
pub fn active_log_dir() -> PathBuf {
    ACTIVE_LOG_DIR
        .get()
        .cloned()
        .unwrap_or_else(default_log_dir)
}

/// First non-blank override among [`LOG_DIR_KEYS`].
fn log_dir_from(lookup: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    LOG_DIR_KEYS
        .into_iter()
        .filter_map(lookup)
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn filter_from(value: Option<String>) -> String {
    value
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Filter directives from the environment, or the crate default.
#[must_use]
pub fn filter_directives() -> String {
    filter_from(std::env::var(LOG_FILTER_KEY).ok())
}

fn local_offset() -> time::UtcOffset {
    time::UtcOffset::current_local_offset().unwrap_or(time::UtcOffset::UTC)
}

/// Install the global subscriber. Keep the guard alive until exit or
/// buffered lines are lost.
pub fn init() -> anyhow::Result<WorkerGuard> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let primary_log_dir = default_log_dir();
    let log_dir = if std::fs::create_dir_all(&primary_log_dir).is_ok() {
        primary_log_dir
    } else {
        let fallback = fallback_log_dir();
        std::fs::create_dir_all(&fallback)
            .with_context(|| format!("cannot create log directory {}", fallback.display()))?;
        fallback
    };

    let _ = ACTIVE_LOG_DIR.set(log_dir.clone());

    let writer = RollingFileAppender::builder()
        .filename_prefix("loan-toolkit")
        .filename_suffix("log")
        .max_log_files(5)
        .rotation(Rotation::DAILY)
        .build(&log_dir)
        .with_context(|| format!("cannot open log file in {}", log_dir.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(writer);

    let timer = fmt::time::OffsetTime::new(
        local_offset(),
        time::format_description::well_known::Rfc3339,
    );
    let file_line = cfg!(debug_assertions);

    let layer = fmt::layer()
        .with_ansi(false)
        .with_timer(timer)
        .with_thread_ids(true)
        .with_file(file_line)
        .with_line_number(file_line)
        .with_writer(writer)
        .with_filter(tracing_subscriber::EnvFilter::new(filter_directives()));

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;
    Ok(guard)
}
