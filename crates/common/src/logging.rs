use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::DEFAULT_LOG_FILE;

const DEFAULT_FILTER: &str = "homework_bot=info,homework_poller=info,homework_notifier=info,\
     homework_engine=info,homework_common=info";

/// Log file path from `LOG_FILE`, for use before the full config is loaded.
pub fn log_file_from_env() -> String {
    std::env::var("LOG_FILE")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string())
}

/// Install the global tracing subscriber.
///
/// Lines go to `log_file` in append mode. If the file cannot be opened the
/// subscriber writes to stderr instead.
pub fn init_tracing(log_file: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    match OpenOptions::new().create(true).append(true).open(log_file) {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true)
                .init();
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .init();
            tracing::warn!(log_file, error = %e, "Could not open log file, logging to stderr");
        }
    }
}
