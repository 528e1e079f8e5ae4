use std::path::PathBuf;
use std::sync::OnceLock;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::Commands;
use crate::config::{runtime_dir, LogLevel};

const LOG_FILE_PREFIX: &str = "prism";

static INIT: OnceLock<()> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// Daily-rolling file in the runtime directory
    File,
    Stderr,
}

impl LogMode {
    /// Commands whose stdout carries CSS or JSON, or that own the terminal
    /// for a session, log to a file.
    pub fn for_command(command: Option<&Commands>) -> Self {
        match command {
            Some(Commands::Generate { .. }) | Some(Commands::Session { .. }) | None => {
                LogMode::File
            }
            Some(Commands::Theme { .. }) | Some(Commands::Config { .. }) => LogMode::Stderr,
        }
    }
}

pub struct LogGuard {
    _guard: Option<WorkerGuard>,
}

pub fn init(level: LogLevel, mode: LogMode, cli_override: Option<LogLevel>) -> LogGuard {
    let mut guard = None;

    INIT.get_or_init(|| {
        let effective_level = cli_override.unwrap_or(level);

        let Some(tracing_level) = effective_level.as_tracing_level() else {
            return;
        };

        let (writer, ansi) = match mode {
            LogMode::File => match file_writer() {
                Some((writer, file_guard)) => {
                    guard = Some(file_guard);
                    (writer, false)
                }
                None => (BoxMakeWriter::new(std::io::stderr), true),
            },
            LogMode::Stderr => (BoxMakeWriter::new(std::io::stderr), true),
        };

        let layer = fmt::layer()
            .with_writer(writer)
            .with_timer(UtcTime::rfc_3339())
            .with_ansi(ansi)
            .with_target(true)
            .with_file(!ansi)
            .with_line_number(!ansi);

        tracing_subscriber::registry()
            .with(build_env_filter(tracing_level))
            .with(layer)
            .init();
    });

    LogGuard { _guard: guard }
}

fn build_env_filter(level: Level) -> EnvFilter {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    // The HTTP client is chatty at debug; palette requests are logged here.
    match "ureq=warn".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// A non-blocking writer into the rolling log file, or `None` when the log
/// directory is unusable.
fn file_writer() -> Option<(BoxMakeWriter, WorkerGuard)> {
    let log_dir = log_dir();

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!(
            "Warning: Failed to create log directory {:?}: {}",
            log_dir, e
        );
        return None;
    }

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .max_log_files(7)
        .build(&log_dir)
        .ok()?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    Some((BoxMakeWriter::new(non_blocking), guard))
}

pub fn log_dir() -> PathBuf {
    runtime_dir()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_for_command() {
        let generate = Commands::Generate {
            prompt: vec!["dusk".to_string()],
            variations: None,
            json: false,
        };
        let config = Commands::Config {
            path: true,
            reset: false,
        };

        assert_eq!(LogMode::for_command(None), LogMode::File);
        assert_eq!(LogMode::for_command(Some(&generate)), LogMode::File);
        assert_eq!(LogMode::for_command(Some(&config)), LogMode::Stderr);
        assert_eq!(
            LogMode::for_command(Some(&Commands::Theme { command: None })),
            LogMode::Stderr
        );
    }

    #[test]
    fn test_env_filter_quiets_http_client() {
        let filter = build_env_filter(Level::DEBUG).to_string();
        assert!(filter.contains("ureq=warn"));
    }
}
