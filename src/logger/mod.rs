//! Logging module
//!
//! A `Logger` is built once from the logging configuration and handed to
//! the components that need it; there is no process-global logging state.
//! Error/warning/info lines go to stderr/stdout or configured files, and
//! access lines are emitted in combined or JSON format.

mod format;

pub use format::AccessLogEntry;

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use crate::config::LoggingConfig;

/// Log severity, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    fn parse(name: &str) -> Self {
        match name {
            "debug" => Self::Debug,
            "warn" | "warning" => Self::Warn,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }
}

/// Where a stream of log lines ends up
enum LogTarget {
    Stdout,
    Stderr,
    File(Mutex<File>),
}

impl LogTarget {
    fn write_line(&self, line: &str) {
        match self {
            Self::Stdout => println!("{line}"),
            Self::Stderr => eprintln!("{line}"),
            Self::File(file) => {
                if let Ok(mut f) = file.lock() {
                    let _ = writeln!(f, "{line}");
                }
            }
        }
    }
}

/// Leveled logger with separate access and error streams
pub struct Logger {
    access: LogTarget,
    error: LogTarget,
    level: Level,
    access_log: bool,
    access_format: String,
}

impl Logger {
    /// Build a logger from configuration, opening log files as needed
    pub fn from_config(config: &LoggingConfig) -> io::Result<Self> {
        let access = match config.access_log_file.as_deref() {
            Some(path) => LogTarget::File(Mutex::new(open_log_file(path)?)),
            None => LogTarget::Stdout,
        };
        let error = match config.error_log_file.as_deref() {
            Some(path) => LogTarget::File(Mutex::new(open_log_file(path)?)),
            None => LogTarget::Stderr,
        };

        Ok(Self {
            access,
            error,
            level: Level::parse(&config.level),
            access_log: config.access_log,
            access_format: config.access_log_format.clone(),
        })
    }

    /// Plain stdout/stderr logger
    #[allow(dead_code)] // used by tests that don't want log files
    #[must_use]
    pub fn stderr_only(level: Level) -> Self {
        Self {
            access: LogTarget::Stdout,
            error: LogTarget::Stderr,
            level,
            access_log: false,
            access_format: "combined".to_string(),
        }
    }

    pub fn info(&self, message: &str) {
        if self.level <= Level::Info {
            self.access.write_line(message);
        }
    }

    pub fn warn(&self, message: &str) {
        if self.level <= Level::Warn {
            self.error.write_line(&format!("[WARN] {message}"));
        }
    }

    pub fn error(&self, message: &str) {
        self.error.write_line(&format!("[ERROR] {message}"));
    }

    /// Emit a formatted access log entry, if access logging is enabled
    pub fn access(&self, entry: &AccessLogEntry) {
        if self.access_log {
            self.access.write_line(&entry.format(&self.access_format));
        }
    }

    #[must_use]
    pub const fn access_log_enabled(&self) -> bool {
        self.access_log
    }
}

/// Open or create a log file for appending, creating parent directories
fn open_log_file(path: &str) -> io::Result<File> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}
