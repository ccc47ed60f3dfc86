//! # Leveled Logging
//!
//! A small printf-style logger with five ordered levels. Errors and warnings
//! go to stderr, info and debug to stdout, each line prefixed with its level.
//! Either stream can be swapped out, which is how tests capture output.
//!
//! Applications already running a `tracing` subscriber can use
//! [`TracingLogger`] instead and keep a single log pipeline.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::{Arc, Mutex, OnceLock};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::WireError;

/// Verbosity threshold. A message is printed when its level is at or below
/// the configured one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Prints nothing.
    Null,
    #[default]
    Error,
    Warn,
    Info,
    Debug,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Null => "null",
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Info => "info",
            Level::Debug => "debug",
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            Level::Null => "",
            Level::Error => "[ERROR] ",
            Level::Warn => "[WARN] ",
            Level::Info => "[INFO] ",
            Level::Debug => "[DEBUG] ",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "null" | "none" | "off" => Ok(Level::Null),
            "error" => Ok(Level::Error),
            "warn" | "warning" => Ok(Level::Warn),
            "info" => Ok(Level::Info),
            "debug" => Ok(Level::Debug),
            other => Err(WireError::Configuration(format!("unknown log level: {other}"))),
        }
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// The logging interface used throughout the crate.
pub trait LeveledLog: Send + Sync {
    fn errorf(&self, args: fmt::Arguments<'_>);
    fn warnf(&self, args: fmt::Arguments<'_>);
    fn infof(&self, args: fmt::Arguments<'_>);
    fn debugf(&self, args: fmt::Arguments<'_>);
}

type Sink = Mutex<Box<dyn Write + Send>>;

/// Writes level-prefixed lines to stdout/stderr, or to overrides.
pub struct LeveledLogger {
    level: Level,
    stdout: Option<Sink>,
    stderr: Option<Sink>,
}

impl LeveledLogger {
    pub fn new(level: Level) -> Self {
        Self {
            level,
            stdout: None,
            stderr: None,
        }
    }

    /// Replaces the stream used for info and debug lines.
    pub fn with_stdout(mut self, out: impl Write + Send + 'static) -> Self {
        self.stdout = Some(Mutex::new(Box::new(out)));
        self
    }

    /// Replaces the stream used for error and warning lines.
    pub fn with_stderr(mut self, out: impl Write + Send + 'static) -> Self {
        self.stderr = Some(Mutex::new(Box::new(out)));
        self
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn enabled(&self, level: Level) -> bool {
        level != Level::Null && level <= self.level
    }

    fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        let line = format!("{}{}\n", level.prefix(), args);
        let sink = match level {
            Level::Error | Level::Warn => &self.stderr,
            _ => &self.stdout,
        };
        // Logging never fails the caller.
        let _ = match sink {
            Some(sink) => match sink.lock() {
                Ok(mut w) => w.write_all(line.as_bytes()).and_then(|_| w.flush()),
                Err(_) => Ok(()),
            },
            None if matches!(level, Level::Error | Level::Warn) => io::stderr().write_all(line.as_bytes()),
            None => io::stdout().write_all(line.as_bytes()),
        };
    }
}

impl Default for LeveledLogger {
    fn default() -> Self {
        Self::new(Level::default())
    }
}

impl fmt::Debug for LeveledLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeveledLogger")
            .field("level", &self.level)
            .field("stdout_override", &self.stdout.is_some())
            .field("stderr_override", &self.stderr.is_some())
            .finish()
    }
}

impl LeveledLog for LeveledLogger {
    fn errorf(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Error, args);
    }

    fn warnf(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Warn, args);
    }

    fn infof(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Info, args);
    }

    fn debugf(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Debug, args);
    }
}

/// Forwards to `tracing` events, still gated by its own threshold.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger {
    pub level: Level,
}

impl TracingLogger {
    pub fn new(level: Level) -> Self {
        Self { level }
    }
}

impl LeveledLog for TracingLogger {
    fn errorf(&self, args: fmt::Arguments<'_>) {
        if self.level >= Level::Error {
            tracing::error!("{}", args);
        }
    }

    fn warnf(&self, args: fmt::Arguments<'_>) {
        if self.level >= Level::Warn {
            tracing::warn!("{}", args);
        }
    }

    fn infof(&self, args: fmt::Arguments<'_>) {
        if self.level >= Level::Info {
            tracing::info!("{}", args);
        }
    }

    fn debugf(&self, args: fmt::Arguments<'_>) {
        if self.level >= Level::Debug {
            tracing::debug!("{}", args);
        }
    }
}

/// Process-wide logger at the default (error) level.
pub fn default_logger() -> Arc<dyn LeveledLog> {
    static DEFAULT: OnceLock<Arc<LeveledLogger>> = OnceLock::new();
    DEFAULT.get_or_init(|| Arc::new(LeveledLogger::default())).clone()
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $crate::logger::LeveledLog::errorf(&*$logger, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $crate::logger::LeveledLog::warnf(&*$logger, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $crate::logger::LeveledLog::infof(&*$logger, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $crate::logger::LeveledLog::debugf(&*$logger, format_args!($($arg)*))
    };
}
