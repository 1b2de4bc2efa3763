//! Logging initialization and configuration.
//!
//! Logs go to files under a `logs/` directory next to the executable so
//! they never mix with command output on the terminal. Each run gets its
//! own timestamped file. The level is controlled through `RUST_LOG`
//! (default `info`).

use std::fs;
use std::path::PathBuf;

use chrono::Local;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize file-based logging for this run.
///
/// Failures here are reported on stderr and otherwise ignored - a missing
/// log file must never stop the tool from translating commands.
pub fn init_logging() {
    let log_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("logs")))
        .unwrap_or_else(|| PathBuf::from("logs"));

    if let Err(err) = fs::create_dir_all(&log_dir) {
        eprintln!("Warning: failed to create logs directory: {err}");
        return;
    }

    let timestamp = Local::now().format("%Y-%m-%d-%H-%M-%S");
    let log_path = log_dir.join(format!("rusty-cmd.{timestamp}.log"));

    let log_file = match fs::File::create(&log_path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Warning: failed to create log file: {err}");
            return;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(log_file);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    // Keep the non-blocking writer alive for the program lifetime.
    std::mem::forget(guard);

    tracing::info!("logging initialized, writing to {}", log_path.display());
}
