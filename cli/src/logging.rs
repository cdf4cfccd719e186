//! Logging initialization
//!
//! Stdout carries command output, so logs go to stderr (warnings only by
//! default) or, when `STOCKCHECK_LOG_DIR` is set, to a daily rotated file.

use std::fs;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "stockcheck.log";

/// Logging configuration from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Directory for rotated log files; stderr when unset
    pub log_dir: Option<PathBuf>,
    /// Filter directive (e.g. "lib_client=debug,info")
    pub log_level: String,
}

impl LogConfig {
    pub fn from_env() -> Self {
        let log_dir = lib_utils::get_env("STOCKCHECK_LOG_DIR").ok().map(PathBuf::from);
        let default_level = if log_dir.is_some() { "info" } else { "warn" };

        Self {
            log_dir,
            log_level: lib_utils::get_env_or("RUST_LOG", default_level),
        }
    }
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// whole program.
pub fn init(config: &LogConfig) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));

    if let Some(log_dir) = &config.log_dir {
        match fs::create_dir_all(log_dir) {
            Ok(()) => {
                let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

                let file_layer = fmt::layer()
                    .with_writer(non_blocking)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(false);

                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(file_layer)
                    .init();

                tracing::info!(log_dir = %log_dir.display(), log_level = %config.log_level, "Logging initialized");
                return Some(guard);
            }
            Err(e) => {
                eprintln!("Warning: Failed to create log directory: {}", e);
            }
        }
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
    None
}
