//! Build logging.
//!
//! Deliberately not a process-wide facade: a [`BuildLogger`] is
//! constructed once in `main` and passed by reference into every stage.
//! Tests construct their own instances, so parallel test execution never
//! fights over global logger state.
//!
//! Two sinks:
//!
//! - **Console** (stdout): `Info` and above by default, everything with
//!   `--verbose`.
//! - **File** (optional, append mode): always receives `Debug` and above.
//!
//! Line format matches the original tooling:
//!
//! ```text
//! [2026-08-30 14:03:21] [INFO] Wrote audit-styles.css (3523 bytes)
//! ```
//!
//! [`format_line`] is pure so formatting is testable without capturing
//! stdout. Sink failures are swallowed — logging must never abort a
//! build that is otherwise succeeding.

use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Log severity, ordered `Debug < Info < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Error,
}

impl Level {
    fn label(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Error => "ERROR",
        }
    }
}

/// Explicitly constructed logger passed by reference into every stage.
pub struct BuildLogger {
    console_level: Level,
    file: Option<File>,
}

impl BuildLogger {
    /// Create a logger. With `verbose` the console shows `Debug` lines;
    /// `log_file` is opened in append mode and always receives `Debug`.
    pub fn new(verbose: bool, log_file: Option<&Path>) -> io::Result<Self> {
        let file = match log_file {
            Some(path) => Some(OpenOptions::new().create(true).append(true).open(path)?),
            None => None,
        };
        Ok(Self {
            console_level: if verbose { Level::Debug } else { Level::Info },
            file,
        })
    }

    pub fn debug(&self, msg: &str) {
        self.log(Level::Debug, msg);
    }

    pub fn info(&self, msg: &str) {
        self.log(Level::Info, msg);
    }

    pub fn error(&self, msg: &str) {
        self.log(Level::Error, msg);
    }

    fn log(&self, level: Level, msg: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let line = format_line(level, &timestamp, msg);
        if level >= self.console_level {
            println!("{line}");
        }
        if let Some(file) = &self.file {
            let mut file = file;
            let _ = writeln!(file, "{line}");
        }
    }
}

/// Format a single log line: `[timestamp] [LEVEL] message`.
pub fn format_line(level: Level, timestamp: &str, msg: &str) -> String {
    format!("[{timestamp}] [{}] {msg}", level.label())
}
