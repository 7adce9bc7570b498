//! Client console log.
//!
//! Errors the controller does not show to the user (statistics failures,
//! transport details) land here. Lines are echoed dimmed to stderr and
//! appended as JSONL to `~/.scorecard/client-log.jsonl`. All file I/O is
//! best-effort: a log that cannot be written never fails an operation.

use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::config::expand_home;
use crate::config::schema::LoggingConfig;

/// Severity of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Error,
}

/// A single entry in the client log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: Level,
    pub message: String,
}

/// Console log sink.
#[derive(Debug, Clone, Default)]
pub struct Logger {
    path: Option<PathBuf>,
    console: bool,
}

impl Logger {
    /// Build from the resolved `[logging]` config.
    pub fn from_config(config: &LoggingConfig) -> Self {
        let path = if config.enabled {
            expand_home(&config.path)
        } else {
            None
        };
        Self {
            path,
            console: config.console,
        }
    }

    /// A logger that writes to the given file only.
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            console: false,
        }
    }

    /// A logger that discards everything.
    pub fn silent() -> Self {
        Self::default()
    }

    /// Log file in use, if file logging is enabled.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    pub fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }

    fn log(&self, level: Level, message: &str) {
        if self.console {
            let line = format!("[scorecard] {message}");
            match level {
                Level::Info => eprintln!("{}", line.dimmed()),
                Level::Error => eprintln!("{}", line.red().dimmed()),
            }
        }

        if let Some(path) = &self.path {
            let entry = LogEntry {
                timestamp: Utc::now().to_rfc3339(),
                level,
                message: message.to_string(),
            };
            let _ = append_entry(path, &entry);
        }
    }
}

fn append_entry(path: &Path, entry: &LogEntry) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(entry)?;
    writeln!(file, "{json}")?;

    Ok(())
}

/// Read every entry of a log file.
///
/// Silently skips malformed lines. Returns an empty vec if the file does not
/// exist or cannot be read.
pub fn read_entries(path: &Path) -> Vec<LogEntry> {
    let Ok(file) = fs::File::open(path) else {
        return Vec::new();
    };

    BufReader::new(file)
        .lines()
        .map_while(|line| line.ok())
        .filter_map(|line| serde_json::from_str::<LogEntry>(&line).ok())
        .collect()
}
