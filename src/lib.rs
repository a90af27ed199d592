//! Context-labelled logging to standard output.
//!
//! A [`Logger`] carries an immutable, pipe-joined context label and writes
//! either human-readable lines or logfmt records. Derived loggers extend the
//! label without touching their parent, and a process-wide default logger
//! backs the package-level [`infof`], [`errorf`] and [`context`] helpers.

use std::error::Error as StdError;
use std::fmt;
use std::sync::LazyLock;

pub mod clock;
pub mod config;
pub mod logfmt;
pub mod logger;
pub mod logging;
pub mod propagation;
pub mod sink;

// Re-export key types
pub use clock::{Clock, FixedClock, SystemClock, TIME_FORMAT};
pub use config::Config;
pub use logfmt::{KeyValue, LogFmt};
pub use logger::{ContextLogger, KeyValueLogger, Level, Logger};
pub use propagation::{Carrier, attach_logger, logger_from};
pub use sink::{MemorySink, Sink, StdoutSink};

/// Custom error type for the library
#[derive(Debug)]
pub enum Error {
    /// Input/output error
    Io(std::io::Error),
    /// JSON deserialization error
    Json(serde_json::Error),
    /// A logfmt key that is empty once invalid characters are removed
    InvalidKey(String),
    /// Invalid parameter error
    InvalidParam(String),
    /// The `log` facade already has a backend
    SetLogger(log::SetLoggerError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Json(err) => write!(f, "JSON error: {}", err),
            Error::InvalidKey(key) => write!(f, "Invalid logfmt key: {:?}", key),
            Error::InvalidParam(msg) => write!(f, "Invalid parameter: {}", msg),
            Error::SetLogger(err) => write!(f, "Cannot install logger: {}", err),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::InvalidKey(_) => None,
            Error::InvalidParam(_) => None,
            Error::SetLogger(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<log::SetLoggerError> for Error {
    fn from(err: log::SetLoggerError) -> Self {
        Error::SetLogger(err)
    }
}

/// Type alias for library results
pub type Result<T> = std::result::Result<T, Error>;

static DEFAULT_LOGGER: LazyLock<Logger> = LazyLock::new(Logger::new);

/// The process-wide logger with an empty context.
pub fn default_logger() -> &'static Logger {
    &DEFAULT_LOGGER
}

/// Write an INFO line through the default logger.
pub fn infof(args: fmt::Arguments<'_>) {
    default_logger().infof(args);
}

/// Write an ERROR line through the default logger.
pub fn errorf(args: fmt::Arguments<'_>) {
    default_logger().errorf(args);
}

/// Derive a logger from the default logger.
pub fn context(label: &str) -> Logger {
    default_logger().with_context(label)
}

/// Write an INFO line.
///
/// `infof!("fmt", args..)` uses the default logger,
/// `infof!(logger => "fmt", args..)` uses the given one.
#[macro_export]
macro_rules! infof {
    ($fmt:literal $($rest:tt)*) => {
        $crate::default_logger().infof(::core::format_args!($fmt $($rest)*))
    };
    ($logger:expr => $($arg:tt)+) => {
        $logger.infof(::core::format_args!($($arg)+))
    };
}

/// Write a WARN line. See [`infof!`] for the accepted forms.
#[macro_export]
macro_rules! warnf {
    ($fmt:literal $($rest:tt)*) => {
        $crate::default_logger().warnf(::core::format_args!($fmt $($rest)*))
    };
    ($logger:expr => $($arg:tt)+) => {
        $logger.warnf(::core::format_args!($($arg)+))
    };
}

/// Write an ERROR line. See [`infof!`] for the accepted forms.
#[macro_export]
macro_rules! errorf {
    ($fmt:literal $($rest:tt)*) => {
        $crate::default_logger().errorf(::core::format_args!($fmt $($rest)*))
    };
    ($logger:expr => $($arg:tt)+) => {
        $logger.errorf(::core::format_args!($($arg)+))
    };
}

/// Build a slice of logfmt pairs: `kv!("user" => name, "code" => 42)`.
#[macro_export]
macro_rules! kv {
    ($($key:expr => $value:expr),* $(,)?) => {
        &[$(($key, &$value as &dyn ::core::fmt::Display)),*]
    };
}
