// Logging for gitfame
//
// Log lines always go to stderr so that stdout carries nothing but the
// report. A log file can be added as a second destination with its own level.
//
// Example usage:
// ```
// let config = LogConfig {
//     console_level: LevelFilter::Warn,
//     file_level: Some(LevelFilter::Trace),
//     format: LogFormat::Text,
//     destination: LogDestination::Both(PathBuf::from("gitfame.log")),
// };
// init_logger(config)?;
// log::debug!("blaming src/main.rs");
// ```

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use log::{Level, LevelFilter};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {}. Valid options: text, json", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogDestination {
    Console,
    File(PathBuf),
    Both(PathBuf),
}

impl LogDestination {
    pub fn from_log_file(log_file: Option<PathBuf>) -> Self {
        match log_file {
            Some(path) => LogDestination::Both(path),
            None => LogDestination::Console,
        }
    }

    fn file(&self) -> Option<&Path> {
        match self {
            LogDestination::Console => None,
            LogDestination::File(path) | LogDestination::Both(path) => Some(path.as_path()),
        }
    }

    fn includes_console(&self) -> bool {
        !matches!(self, LogDestination::File(_))
    }
}

/// One JSON log line
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonLogEntry {
    pub timestamp: String,
    pub level: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub console_level: LevelFilter,
    pub file_level: Option<LevelFilter>,
    pub format: LogFormat,
    pub destination: LogDestination,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            console_level: LevelFilter::Info,
            file_level: None,
            format: LogFormat::Text,
            destination: LogDestination::Console,
        }
    }
}

impl LogConfig {
    /// Most verbose level any destination wants
    pub fn max_level(&self) -> LevelFilter {
        match self.file_level {
            Some(file_level) if file_level > self.console_level => file_level,
            _ => self.console_level,
        }
    }
}

pub struct FameLogger {
    config: LogConfig,
}

impl FameLogger {
    pub fn new(config: LogConfig) -> Self {
        Self { config }
    }

    fn format_timestamp() -> String {
        let now: DateTime<Local> = Local::now();
        now.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    fn format_text_message(&self, level: Level, message: &str) -> String {
        format!("{} [{}] {}", Self::format_timestamp(), level.as_str(), message)
    }

    fn format_json_message(&self, level: Level, target: &str, message: &str) -> Result<String> {
        let entry = JsonLogEntry {
            timestamp: Self::format_timestamp(),
            level: level.as_str().to_string(),
            message: message.to_string(),
            target: (level >= Level::Debug).then(|| target.to_string()),
        };
        serde_json::to_string(&entry).context("Failed to serialize log entry to JSON")
    }

    fn console_accepts(&self, level: Level) -> bool {
        self.config.destination.includes_console() && level <= self.config.console_level
    }

    fn file_accepts(&self, level: Level) -> bool {
        self.config.destination.file().is_some()
            && self.config.file_level.map_or(false, |file_level| level <= file_level)
    }

    fn append_to_file(path: &Path, line: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))?;
        writeln!(file, "{}", line).context("Failed to write to log file")
    }
}

impl log::Log for FameLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.console_accepts(metadata.level()) || self.file_accepts(metadata.level())
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level = record.level();
        let message = record.args().to_string();
        let line = match self.config.format {
            LogFormat::Text => self.format_text_message(level, &message),
            LogFormat::Json => self
                .format_json_message(level, record.target(), &message)
                .unwrap_or_else(|_| self.format_text_message(level, &message)),
        };

        if self.console_accepts(level) {
            let _ = writeln!(io::stderr(), "{}", line);
        }

        if self.file_accepts(level) {
            if let Some(path) = self.config.destination.file() {
                if let Err(e) = Self::append_to_file(path, &line) {
                    let _ = writeln!(io::stderr(), "File logging error: {}", e);
                }
            }
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

/// Install the process-wide logger
pub fn init_logger(config: LogConfig) -> Result<()> {
    let max_level = config.max_level();
    log::set_boxed_logger(Box::new(FameLogger::new(config))).context("Failed to set global logger")?;
    log::set_max_level(max_level);
    Ok(())
}

pub fn parse_log_level(level_str: &str) -> Result<LevelFilter> {
    match level_str.to_lowercase().as_str() {
        "error" => Ok(LevelFilter::Error),
        "warn" => Ok(LevelFilter::Warn),
        "info" => Ok(LevelFilter::Info),
        "debug" => Ok(LevelFilter::Debug),
        "trace" => Ok(LevelFilter::Trace),
        "off" => Ok(LevelFilter::Off),
        _ => Err(anyhow::anyhow!(
            "Invalid log level: {}. Valid levels: error, warn, info, debug, trace, off",
            level_str
        )),
    }
}
