//! The logger capability set shared by sinks and tee loggers

use super::{fields::Fields, log_level::LogLevel};
use std::fmt;
use std::sync::Arc;

/// A logger shared between call sites and tee loggers
pub type SharedLogger = Arc<dyn Logger>;

/// Capability set every logger provides
///
/// `log` only records. The terminal effects of `Panic` and `Fatal` belong to
/// [`Logger::panic`] and [`Logger::fatal`], so a tee logger can forward a
/// terminal message to every member before anything is terminated.
pub trait Logger: Send + Sync {
    /// Record `message` at `level` without any terminal effect
    fn log(&self, level: LogLevel, message: &str, fields: &Fields);

    #[inline]
    fn debug(&self, message: &str, fields: &Fields) {
        self.log(LogLevel::Debug, message, fields);
    }

    #[inline]
    fn info(&self, message: &str, fields: &Fields) {
        self.log(LogLevel::Info, message, fields);
    }

    #[inline]
    fn warn(&self, message: &str, fields: &Fields) {
        self.log(LogLevel::Warn, message, fields);
    }

    #[inline]
    fn error(&self, message: &str, fields: &Fields) {
        self.log(LogLevel::Error, message, fields);
    }

    /// Record at `Panic`, then raise a panic
    fn panic(&self, message: &str, fields: &Fields);

    /// Record at `Fatal`, then exit the process with a non-zero status
    fn fatal(&self, message: &str, fields: &Fields);

    /// Behave as `error` or `fatal`, decided by the logger's own configuration
    fn dfatal(&self, message: &str, fields: &Fields);

    /// Derive a logger that attaches `fields` to every message
    ///
    /// The receiver is left untouched.
    fn with(&self, fields: &Fields) -> SharedLogger;

    /// Report whether a message at `level` would be recorded
    ///
    /// Returns `None` when the write can be skipped. Loggers that record
    /// anything never skip Panic and Fatal; [`NopLogger`] skips everything.
    fn check<'a>(&'a self, level: LogLevel, message: &'a str) -> Option<CheckedMessage<'a>>;
}

/// Token returned by [`Logger::check`] for a message that would be recorded
///
/// Holds the logger that produced it, so the eventual write reaches the same
/// destinations the check consulted. `write` consumes the token, a checked
/// message is written at most once.
///
/// # Example
///
/// ```
/// use rust_tee_logger::prelude::*;
///
/// let logger = NopLogger;
/// if let Some(checked) = logger.check(LogLevel::Debug, "cache state") {
///     checked.write(&Fields::new().with_field("entries", 42));
/// }
/// ```
pub struct CheckedMessage<'a> {
    logger: &'a dyn Logger,
    level: LogLevel,
    message: &'a str,
}

impl<'a> CheckedMessage<'a> {
    pub fn new(logger: &'a dyn Logger, level: LogLevel, message: &'a str) -> Self {
        Self {
            logger,
            level,
            message,
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn message(&self) -> &'a str {
        self.message
    }

    /// Perform the write through the owning logger
    ///
    /// Panic and Fatal go through the logger's terminal operations.
    pub fn write(self, fields: &Fields) {
        match self.level {
            LogLevel::Panic => self.logger.panic(self.message, fields),
            LogLevel::Fatal => self.logger.fatal(self.message, fields),
            level => self.logger.log(level, self.message, fields),
        }
    }
}

impl fmt::Debug for CheckedMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckedMessage")
            .field("level", &self.level)
            .field("message", &self.message)
            .finish()
    }
}

/// A logger that ignores every call, including Panic and Fatal
#[derive(Debug, Clone, Copy, Default)]
pub struct NopLogger;

impl NopLogger {
    /// A shared no-op logger
    #[must_use]
    pub fn shared() -> SharedLogger {
        Arc::new(NopLogger)
    }
}

impl Logger for NopLogger {
    fn log(&self, _level: LogLevel, _message: &str, _fields: &Fields) {}

    fn panic(&self, _message: &str, _fields: &Fields) {}

    fn fatal(&self, _message: &str, _fields: &Fields) {}

    fn dfatal(&self, _message: &str, _fields: &Fields) {}

    fn with(&self, _fields: &Fields) -> SharedLogger {
        NopLogger::shared()
    }

    fn check<'a>(&'a self, _level: LogLevel, _message: &'a str) -> Option<CheckedMessage<'a>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct CallLog {
        calls: Mutex<Vec<String>>,
    }

    impl Logger for CallLog {
        fn log(&self, level: LogLevel, message: &str, _fields: &Fields) {
            self.calls.lock().push(format!("log:{}:{}", level, message));
        }

        fn panic(&self, message: &str, _fields: &Fields) {
            self.calls.lock().push(format!("panic:{}", message));
        }

        fn fatal(&self, message: &str, _fields: &Fields) {
            self.calls.lock().push(format!("fatal:{}", message));
        }

        fn dfatal(&self, message: &str, _fields: &Fields) {
            self.calls.lock().push(format!("dfatal:{}", message));
        }

        fn with(&self, _fields: &Fields) -> SharedLogger {
            Arc::new(CallLog::default())
        }

        fn check<'a>(&'a self, level: LogLevel, message: &'a str) -> Option<CheckedMessage<'a>> {
            Some(CheckedMessage::new(self, level, message))
        }
    }

    #[test]
    fn test_default_level_methods_route_through_log() {
        let logger = CallLog::default();
        let fields = Fields::new();
        logger.debug("d", &fields);
        logger.info("i", &fields);
        logger.warn("w", &fields);
        logger.error("e", &fields);

        assert_eq!(
            *logger.calls.lock(),
            vec!["log:DEBUG:d", "log:INFO:i", "log:WARN:w", "log:ERROR:e"]
        );
    }

    #[test]
    fn test_checked_message_write_uses_terminal_operations() {
        let logger = CallLog::default();
        let fields = Fields::new();

        logger.check(LogLevel::Warn, "low disk").unwrap().write(&fields);
        logger.check(LogLevel::Panic, "broken").unwrap().write(&fields);
        logger.check(LogLevel::Fatal, "gone").unwrap().write(&fields);

        assert_eq!(
            *logger.calls.lock(),
            vec!["log:WARN:low disk", "panic:broken", "fatal:gone"]
        );
    }

    #[test]
    fn test_nop_logger_ignores_everything() {
        let logger = NopLogger;
        let fields = Fields::new().with_field("k", "v");
        logger.info("ignored", &fields);
        logger.panic("ignored", &fields);
        logger.fatal("ignored", &fields);
        logger.dfatal("ignored", &fields);
        assert!(logger.check(LogLevel::Fatal, "ignored").is_none());
        assert!(logger.with(&fields).check(LogLevel::Error, "ignored").is_none());
    }
}
