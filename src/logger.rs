//! Context-labelled text logger.

use std::fmt;
use std::sync::Arc;

use crate::Result;
use crate::clock::{self, Clock, SystemClock, TIME_FORMAT};
use crate::config::Config;
use crate::logfmt::{KeyValue, LogFmt};
use crate::sink::{Sink, StdoutSink};

/// Separator between context labels
pub const CONTEXT_SEPARATOR: &str = "|";

/// Severity of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Error,
    Warn,
    Info,
}

impl Level {
    /// Tag used in text lines
    pub fn as_tag(self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
        }
    }

    /// Value of the `level` key in logfmt records
    pub fn as_key(self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Info => "info",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warn,
            log::Level::Info | log::Level::Debug | log::Level::Trace => Level::Info,
        }
    }
}

/// Capabilities shared by every context logger.
///
/// `warnf` is deliberately absent; it lives on [`Logger`] only.
pub trait ContextLogger {
    type KeyValue: KeyValueLogger;

    /// Derive a logger with `label` appended to the context
    fn with_context(&self, label: &str) -> Self
    where
        Self: Sized;

    fn infof(&self, args: fmt::Arguments<'_>);

    fn errorf(&self, args: fmt::Arguments<'_>);

    /// Key-value view bound to the same context
    fn as_key_value(&self) -> &Self::KeyValue;
}

/// Capabilities of a key-value view
pub trait KeyValueLogger {
    fn infof(&self, pairs: &[KeyValue<'_>]);

    fn errorf(&self, pairs: &[KeyValue<'_>]);
}

/// Immutable logger bound to a context label.
///
/// Lines look like `[2024-01-02 03:04:05] INFO [api|users] message`. The
/// timestamp and context always occupy the first two slots; the caller's
/// message follows.
#[derive(Clone)]
pub struct Logger {
    context: String,
    time_format: Arc<str>,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn Sink>,
    logfmt: LogFmt,
}

impl Logger {
    /// Root logger writing to stdout with the system clock
    pub fn new() -> Self {
        Self::with_output(SystemClock, StdoutSink)
    }

    /// Root logger with an explicit clock and sink
    pub fn with_output(clock: impl Clock + 'static, sink: impl Sink + 'static) -> Self {
        Self::from_parts(
            String::new(),
            Arc::from(TIME_FORMAT),
            Arc::new(clock),
            Arc::new(sink),
        )
    }

    /// Logger writing to stdout, configured by `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(
            config.context.clone(),
            Arc::from(config.time_format.as_str()),
            Arc::new(SystemClock),
            Arc::new(StdoutSink),
        ))
    }

    fn from_parts(
        context: String,
        time_format: Arc<str>,
        clock: Arc<dyn Clock>,
        sink: Arc<dyn Sink>,
    ) -> Self {
        let logfmt = LogFmt::new(
            context.clone(),
            Arc::clone(&time_format),
            Arc::clone(&clock),
            Arc::clone(&sink),
        );
        Self {
            context,
            time_format,
            clock,
            sink,
            logfmt,
        }
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    /// New logger whose context is `label` under this one's
    pub fn with_context(&self, label: &str) -> Logger {
        let context = if self.context.is_empty() {
            label.to_string()
        } else {
            format!("{}{}{}", self.context, CONTEXT_SEPARATOR, label)
        };
        Self::from_parts(
            context,
            Arc::clone(&self.time_format),
            Arc::clone(&self.clock),
            Arc::clone(&self.sink),
        )
    }

    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Info, args);
    }

    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Warn, args);
    }

    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Error, args);
    }

    pub fn as_key_value(&self) -> &LogFmt {
        &self.logfmt
    }

    /// Write one line at `level`; write failures are discarded.
    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        let line = self.render(level, args);
        let _ = self.sink.write_record(line.as_bytes());
    }

    /// Build the full line, timestamped now
    pub fn render(&self, level: Level, args: fmt::Arguments<'_>) -> String {
        let time = clock::timestamp(self.clock.as_ref(), &self.time_format);
        format!("[{}] {} [{}] {}\n", time, level.as_tag(), self.context, args)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("context", &self.context)
            .field("time_format", &self.time_format)
            .finish_non_exhaustive()
    }
}

impl ContextLogger for Logger {
    type KeyValue = LogFmt;

    fn with_context(&self, label: &str) -> Self {
        Logger::with_context(self, label)
    }

    fn infof(&self, args: fmt::Arguments<'_>) {
        Logger::infof(self, args);
    }

    fn errorf(&self, args: fmt::Arguments<'_>) {
        Logger::errorf(self, args);
    }

    fn as_key_value(&self) -> &LogFmt {
        Logger::as_key_value(self)
    }
}

impl KeyValueLogger for LogFmt {
    fn infof(&self, pairs: &[KeyValue<'_>]) {
        LogFmt::infof(self, pairs);
    }

    fn errorf(&self, pairs: &[KeyValue<'_>]) {
        LogFmt::errorf(self, pairs);
    }
}
