// lulla-core/src/logging.rs

//! Diagnostic logging setup shared by the binaries.

use crate::config::CommonArgs;
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io;
use time::macros::format_description;
use tracing::{info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, time::LocalTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Maps the `-v` count to a default level. `RUST_LOG` overrides it.
pub fn default_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs the global subscriber: stderr always, plus a plain-text file when
/// `--log-file` is given. Keep the returned guard alive until exit so buffered
/// file output is flushed.
pub fn init(args: &CommonArgs) -> Result<Option<WorkerGuard>> {
    let level = default_level(args.verbose);
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));

    let local_timer = LocalTime::new(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]"
    ));

    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_timer(local_timer.clone())
        .with_target(false)
        .with_level(true);

    let (file_layer, guard) = match &args.log_file {
        Some(log_path) => {
            let file_name = log_path
                .file_name()
                .ok_or_else(|| anyhow!("Log file path has no file name: {}", log_path.display()))?;
            let log_dir = match log_path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => std::path::PathBuf::from("."),
            };
            fs::create_dir_all(&log_dir).with_context(|| {
                format!("Failed to create log directory {}", log_dir.display())
            })?;

            let file_appender = tracing_appender::rolling::never(&log_dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true)
                .with_timer(local_timer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    info!("Logging initialized (default level: {})", level);
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_from_verbosity() {
        assert_eq!(default_level(0), Level::WARN);
        assert_eq!(default_level(1), Level::INFO);
        assert_eq!(default_level(2), Level::DEBUG);
        assert_eq!(default_level(7), Level::TRACE);
    }
}
