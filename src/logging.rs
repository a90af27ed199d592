//! Bridge from the `log` facade into ctxlog.
//!
//! Installing the bridge routes `log::info!` and friends through a
//! [`Logger`], so libraries that only speak `log` end up in the same stream.

use log::{Log, Metadata, Record};

use crate::{Logger, Result, default_logger};

/// `log` backend that writes through a [`Logger`].
///
/// The record target becomes an extra context label; `debug` and `trace`
/// records are written with the INFO tag. Filtering is left to
/// [`log::set_max_level`], which the `log` macros check before calling in.
#[derive(Debug, Clone)]
pub struct LogBridge {
    logger: Logger,
}

impl LogBridge {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

impl Log for LogBridge {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let level = record.level().into();
        if record.target().is_empty() {
            self.logger.log(level, *record.args());
        } else {
            self.logger
                .with_context(record.target())
                .log(level, *record.args());
        }
    }

    fn flush(&self) {}
}

/// Install the default logger as the `log` backend with the given level
pub fn init(level: LevelFilter) -> Result<()> {
    init_with(default_logger().clone(), level)
}

/// Install `logger` as the `log` backend with the given level
pub fn init_with(logger: Logger, level: LevelFilter) -> Result<()> {
    log::set_boxed_logger(Box::new(LogBridge::new(logger)))?;
    log::set_max_level(level);
    Ok(())
}

// Re-export the log crate macros
pub use log::{LevelFilter, debug, error, info, trace, warn};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::sink::MemorySink;

    fn bridge() -> (LogBridge, MemorySink) {
        let sink = MemorySink::new();
        let clock = FixedClock::from_ymd_hms(2024, 1, 2, 3, 4, 5);
        let logger = Logger::with_output(clock, sink.clone()).with_context("svc");
        (LogBridge::new(logger), sink)
    }

    #[test]
    fn test_record_target_becomes_context() {
        let (bridge, sink) = bridge();
        bridge.log(
            &Record::builder()
                .level(log::Level::Error)
                .target("db")
                .args(format_args!("lost connection to {}", "primary"))
                .build(),
        );
        assert_eq!(
            sink.contents(),
            "[2024-01-02 03:04:05] ERROR [svc|db] lost connection to primary\n"
        );
    }

    #[test]
    fn test_empty_target_keeps_context() {
        let (bridge, sink) = bridge();
        bridge.log(
            &Record::builder()
                .level(log::Level::Warn)
                .target("")
                .args(format_args!("retrying"))
                .build(),
        );
        assert_eq!(sink.contents(), "[2024-01-02 03:04:05] WARN [svc] retrying\n");
    }

    #[test]
    fn test_debug_and_trace_use_info_tag() {
        let (bridge, sink) = bridge();
        for level in [log::Level::Info, log::Level::Debug, log::Level::Trace] {
            bridge.log(
                &Record::builder()
                    .level(level)
                    .target("app")
                    .args(format_args!("{}", level))
                    .build(),
            );
        }
        assert_eq!(
            sink.lines(),
            vec![
                "[2024-01-02 03:04:05] INFO [svc|app] INFO",
                "[2024-01-02 03:04:05] INFO [svc|app] DEBUG",
                "[2024-01-02 03:04:05] INFO [svc|app] TRACE",
            ]
        );
    }
}
