use crate::cli::Args;
use olympic_teletext::config::Config;
use olympic_teletext::error::AppError;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_LOG_FILE_NAME: &str = "olympic_teletext.log";

/// Sets up file logging.
///
/// Logs always go to a daily rolling file, never to the terminal, since the dashboard
/// owns the screen. `--log-file` wins over the configured path, which wins over the
/// default log directory. `RUST_LOG` directives are honoured on top of the crate's
/// own level (`info`, or `debug` with `--debug`).
///
/// Returns the path to the log file and the guard that must be kept alive
/// for the duration of the program to ensure proper log flushing.
pub async fn setup_logging(args: &Args, config: &Config) -> Result<(String, WorkerGuard), AppError> {
    let custom_log_path = args.log_file.as_ref().or(config.log_file_path.as_ref());
    let (log_dir, log_file_name) = split_log_path(custom_log_path.map(String::as_str));

    if !Path::new(&log_dir).exists() {
        tokio::fs::create_dir_all(&log_dir).await.map_err(|e| {
            AppError::log_setup_error(format!("Failed to create log directory: {e}"))
        })?;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, &log_file_name);

    // The guard must be kept alive for the duration of the program
    // to ensure logs are flushed properly
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let level = if args.debug { "debug" } else { "info" };
    let directive = format!("olympic_teletext={level}")
        .parse()
        .map_err(|e| AppError::log_setup_error(format!("Invalid log directive: {e}")))?;

    tracing_subscriber::registry()
        .with(
            fmt::Layer::new()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(EnvFilter::from_default_env().add_directive(directive)),
        )
        .try_init()
        .map_err(|e| AppError::log_setup_error(format!("Failed to install subscriber: {e}")))?;

    let log_file_path = format!("{log_dir}/{log_file_name}");
    Ok((log_file_path, guard))
}

/// Splits a custom log path into directory and file name, falling back to the default
/// log directory.
fn split_log_path(custom_path: Option<&str>) -> (String, String) {
    match custom_path {
        Some(custom_path) => {
            let path = Path::new(custom_path);
            let parent = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(DEFAULT_LOG_FILE_NAME);
            (parent.to_string_lossy().to_string(), file_name.to_string())
        }
        None => (Config::get_log_dir_path(), DEFAULT_LOG_FILE_NAME.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_custom_path() {
        let (dir, file) = split_log_path(Some("/tmp/logs/app.log"));
        assert_eq!(dir, "/tmp/logs");
        assert_eq!(file, "app.log");
    }

    #[test]
    fn test_bare_file_name_uses_current_dir() {
        let (dir, file) = split_log_path(Some("app.log"));
        assert_eq!(dir, ".");
        assert_eq!(file, "app.log");
    }

    #[test]
    fn test_default_location() {
        let (dir, file) = split_log_path(None);
        assert_eq!(dir, Config::get_log_dir_path());
        assert_eq!(file, DEFAULT_LOG_FILE_NAME);
    }
}
