//! Logging utilities for the application

/// Log levels for controlling verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Normal execution, no verbose flag
    Normal = 0,
    /// Info level, one verbose flag (-v)
    Info = 1,
    /// Debug level, two verbose flags (-v -v)
    Debug = 2,
}

/// Logger for provisioning messages
#[derive(Debug, Clone, Copy, Default)]
pub struct Logger {
    /// Current verbosity level
    verbosity: u8,
    /// Send every line to stderr, keeping stdout for machine-readable output
    stderr_only: bool,
}

impl Logger {
    /// Create a new logger with the specified verbosity
    #[must_use]
    pub fn new(verbosity: u8) -> Self {
        Self {
            verbosity,
            stderr_only: false,
        }
    }

    /// Create a logger that never writes to stdout
    #[must_use]
    pub fn stderr_only(verbosity: u8) -> Self {
        Self {
            verbosity,
            stderr_only: true,
        }
    }

    /// Log a message if the current verbosity level is at least the specified level
    pub fn log(&self, msg: &str, level: LogLevel) {
        if !self.enabled(level) {
            return;
        }
        let line = match level {
            LogLevel::Normal => msg.to_string(),
            LogLevel::Info => format!("info: {msg}"),
            LogLevel::Debug => format!("dbg: {msg}"),
        };
        self.emit(&line);
    }

    fn emit(&self, line: &str) {
        if self.writes_to_stdout() {
            println!("{line}");
        } else {
            eprintln!("{line}");
        }
    }

    /// Whether lines land on stdout rather than stderr
    #[must_use]
    pub fn writes_to_stdout(&self) -> bool {
        !self.stderr_only
    }

    /// Whether a message at `level` would be printed
    #[must_use]
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.verbosity >= level as u8
    }

    /// Log at normal level (always displayed)
    pub fn normal(&self, msg: &str) {
        self.log(msg, LogLevel::Normal);
    }

    /// Log at info level (verbose >= 1)
    pub fn info(&self, msg: &str) {
        self.log(msg, LogLevel::Info);
    }

    /// Log at debug level (verbose >= 2)
    pub fn debug(&self, msg: &str) {
        self.log(msg, LogLevel::Debug);
    }

    /// Failures are printed regardless of verbosity, on the same stream as
    /// every other line so text output keeps its order
    pub fn warn(&self, msg: &str) {
        self.emit(&format!("warn: {msg}"));
    }
}
