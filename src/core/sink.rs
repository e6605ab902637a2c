//! Sink logger: a [`Logger`] writing to a set of appenders

use super::{
    appender::Appender,
    error::Result,
    fields::{FieldValue, Fields},
    log_entry::LogEntry,
    log_level::LogLevel,
    logger::{CheckedMessage, Logger, SharedLogger},
    metrics::LoggerMetrics,
    terminator::{ProcessTerminator, Terminator, FATAL_EXIT_CODE},
};
use parking_lot::Mutex;
use std::sync::Arc;

type Appenders = Arc<Mutex<Vec<Box<dyn Appender>>>>;

/// A logger with its own minimum level, bound fields and appenders
///
/// Loggers derived with `with` share the appenders, metrics and terminator
/// of their parent and differ only in bound fields.
///
/// `dfatal` is settled here: a development sink treats it as `fatal`, any
/// other sink as `error`.
pub struct SinkLogger {
    min_level: LogLevel,
    development: bool,
    fields: Fields,
    appenders: Appenders,
    terminator: Arc<dyn Terminator>,
    metrics: Arc<LoggerMetrics>,
}

impl SinkLogger {
    /// Create a builder for SinkLogger
    ///
    /// # Example
    /// ```
    /// use rust_tee_logger::prelude::*;
    ///
    /// let logger = SinkLogger::builder()
    ///     .min_level(LogLevel::Debug)
    ///     .development(true)
    ///     .field("service", "billing")
    ///     .build();
    /// assert!(logger.is_development());
    /// ```
    #[must_use]
    pub fn builder() -> SinkLoggerBuilder {
        SinkLoggerBuilder::new()
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn is_development(&self) -> bool {
        self.development
    }

    /// Fields attached to every entry
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Whether an entry at `level` would be written
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level.is_terminal() || level >= self.min_level
    }

    pub fn flush(&self) -> Result<()> {
        let mut appenders = self.appenders.lock();
        for appender in appenders.iter_mut() {
            appender.flush()?;
        }
        Ok(())
    }

    fn write_entry(&self, level: LogLevel, message: &str, fields: &Fields) {
        let entry = LogEntry::new(level, message).with_fields(self.fields.merged(fields));
        let mut appenders = self.appenders.lock();
        let mut has_error = false;

        for appender in appenders.iter_mut() {
            if let Err(e) = appender.append(&entry) {
                eprintln!("[LOGGER ERROR] Appender '{}' failed: {}", appender.name(), e);
                has_error = true;
            }
        }

        if has_error {
            self.metrics.record_dropped();
        } else {
            self.metrics.record_logged();
        }

        // Terminal entries must reach their destination before the process goes away
        if level.is_terminal() {
            for appender in appenders.iter_mut() {
                if let Err(e) = appender.flush() {
                    eprintln!("[LOGGER ERROR] Appender '{}' flush failed: {}", appender.name(), e);
                }
            }
        }
    }
}

impl Logger for SinkLogger {
    fn log(&self, level: LogLevel, message: &str, fields: &Fields) {
        if !self.enabled(level) {
            return;
        }
        self.write_entry(level, message, fields);
    }

    fn panic(&self, message: &str, fields: &Fields) {
        self.write_entry(LogLevel::Panic, message, fields);
        self.metrics.record_termination();
        self.terminator.panic(message);
    }

    fn fatal(&self, message: &str, fields: &Fields) {
        self.write_entry(LogLevel::Fatal, message, fields);
        self.metrics.record_termination();
        self.terminator.exit(FATAL_EXIT_CODE);
    }

    fn dfatal(&self, message: &str, fields: &Fields) {
        if self.development {
            self.fatal(message, fields);
        } else {
            self.error(message, fields);
        }
    }

    fn with(&self, fields: &Fields) -> SharedLogger {
        Arc::new(SinkLogger {
            min_level: self.min_level,
            development: self.development,
            fields: self.fields.merged(fields),
            appenders: Arc::clone(&self.appenders),
            terminator: Arc::clone(&self.terminator),
            metrics: Arc::clone(&self.metrics),
        })
    }

    fn check<'a>(&'a self, level: LogLevel, message: &'a str) -> Option<CheckedMessage<'a>> {
        self.enabled(level)
            .then(|| CheckedMessage::new(self, level, message))
    }
}

/// Builder for constructing SinkLogger with a fluent API
pub struct SinkLoggerBuilder {
    min_level: LogLevel,
    development: bool,
    fields: Fields,
    appenders: Vec<Box<dyn Appender>>,
    terminator: Option<Arc<dyn Terminator>>,
}

impl SinkLoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            development: false,
            fields: Fields::new(),
            appenders: Vec::new(),
            terminator: None,
        }
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Treat `dfatal` as `fatal` instead of `error`
    #[must_use = "builder methods return a new value"]
    pub fn development(mut self, development: bool) -> Self {
        self.development = development;
        self
    }

    /// Bind a field to every entry
    #[must_use = "builder methods return a new value"]
    pub fn field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.add_field(key, value);
        self
    }

    /// Add an appender
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    /// Add an already boxed appender
    #[must_use = "builder methods return a new value"]
    pub fn boxed_appender(mut self, appender: Box<dyn Appender>) -> Self {
        self.appenders.push(appender);
        self
    }

    /// Set the terminal action for Panic and Fatal
    ///
    /// Defaults to [`ProcessTerminator`].
    #[must_use = "builder methods return a new value"]
    pub fn terminator(mut self, terminator: Arc<dyn Terminator>) -> Self {
        self.terminator = Some(terminator);
        self
    }

    pub fn build(self) -> SinkLogger {
        SinkLogger {
            min_level: self.min_level,
            development: self.development,
            fields: self.fields,
            appenders: Arc::new(Mutex::new(self.appenders)),
            terminator: self.terminator.unwrap_or_else(ProcessTerminator::shared),
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }
}

impl Default for SinkLoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LoggerError;
    use crate::core::terminator::{RecordingTerminator, Termination};

    /// Appender keeping entries in memory
    struct Collect {
        entries: Arc<Mutex<Vec<LogEntry>>>,
        flushes: Arc<Mutex<usize>>,
    }

    impl Appender for Collect {
        fn append(&mut self, entry: &LogEntry) -> Result<()> {
            self.entries.lock().push(entry.clone());
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            *self.flushes.lock() += 1;
            Ok(())
        }

        fn name(&self) -> &str {
            "collect"
        }
    }

    struct Failing;

    impl Appender for Failing {
        fn append(&mut self, _entry: &LogEntry) -> Result<()> {
            Err(LoggerError::IoError(std::io::Error::other("disk full")))
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct Fixture {
        entries: Arc<Mutex<Vec<LogEntry>>>,
        flushes: Arc<Mutex<usize>>,
        terminator: Arc<RecordingTerminator>,
    }

    fn sink(min_level: LogLevel, development: bool) -> (SinkLogger, Fixture) {
        let fixture = Fixture {
            entries: Arc::new(Mutex::new(Vec::new())),
            flushes: Arc::new(Mutex::new(0)),
            terminator: Arc::new(RecordingTerminator::new()),
        };
        let logger = SinkLogger::builder()
            .min_level(min_level)
            .development(development)
            .appender(Collect {
                entries: Arc::clone(&fixture.entries),
                flushes: Arc::clone(&fixture.flushes),
            })
            .terminator(fixture.terminator.clone())
            .build();
        (logger, fixture)
    }

    fn levels(entries: &Arc<Mutex<Vec<LogEntry>>>) -> Vec<LogLevel> {
        entries.lock().iter().map(|e| e.level).collect()
    }

    #[test]
    fn test_min_level_filters() {
        let (logger, fixture) = sink(LogLevel::Warn, false);
        let fields = Fields::new();

        logger.debug("hidden", &fields);
        logger.info("hidden", &fields);
        logger.warn("shown", &fields);
        logger.error("shown", &fields);

        assert_eq!(levels(&fixture.entries), vec![LogLevel::Warn, LogLevel::Error]);
        assert_eq!(logger.metrics().total_logged(), 2);
    }

    #[test]
    fn test_check_honours_min_level_but_never_terminal_levels() {
        let (logger, _fixture) = sink(LogLevel::Error, false);

        assert!(logger.check(LogLevel::Info, "x").is_none());
        assert!(logger.check(LogLevel::Error, "x").is_some());
        assert!(logger.check(LogLevel::Panic, "x").is_some());
        assert!(logger.check(LogLevel::Fatal, "x").is_some());
    }

    #[test]
    fn test_fatal_writes_flushes_then_exits() {
        let (logger, fixture) = sink(LogLevel::Error, false);

        logger.fatal("shutting down", &Fields::new());

        assert_eq!(levels(&fixture.entries), vec![LogLevel::Fatal]);
        assert_eq!(*fixture.flushes.lock(), 1);
        assert_eq!(fixture.terminator.requests(), vec![Termination::Exit(1)]);
        assert_eq!(logger.metrics().terminations_requested(), 1);
    }

    #[test]
    fn test_panic_writes_then_panics() {
        let (logger, fixture) = sink(LogLevel::Info, false);

        logger.panic("invariant broken", &Fields::new());

        assert_eq!(levels(&fixture.entries), vec![LogLevel::Panic]);
        assert_eq!(
            fixture.terminator.requests(),
            vec![Termination::Panic("invariant broken".into())]
        );
    }

    #[test]
    fn test_log_at_terminal_level_does_not_terminate() {
        let (logger, fixture) = sink(LogLevel::Fatal, false);

        logger.log(LogLevel::Panic, "recorded only", &Fields::new());

        assert_eq!(levels(&fixture.entries), vec![LogLevel::Panic]);
        assert_eq!(fixture.terminator.count(), 0);
    }

    #[test]
    fn test_dfatal_depends_on_development_flag() {
        let (dev, dev_fixture) = sink(LogLevel::Info, true);
        let (prod, prod_fixture) = sink(LogLevel::Info, false);

        dev.dfatal("unexpected", &Fields::new());
        prod.dfatal("unexpected", &Fields::new());

        assert_eq!(levels(&dev_fixture.entries), vec![LogLevel::Fatal]);
        assert_eq!(dev_fixture.terminator.requests(), vec![Termination::Exit(1)]);
        assert_eq!(levels(&prod_fixture.entries), vec![LogLevel::Error]);
        assert_eq!(prod_fixture.terminator.count(), 0);
    }

    #[test]
    fn test_with_binds_fields_and_shares_appenders() {
        let (logger, fixture) = sink(LogLevel::Info, false);

        let derived = logger.with(&Fields::new().with_field("request_id", "abc-123"));
        derived.info("in request", &Fields::new().with_field("step", 1));
        logger.info("outside", &Fields::new());

        let entries = fixture.entries.lock();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].fields.format_fields(), "request_id=abc-123 step=1");
        assert!(entries[1].fields.is_empty());
        assert_eq!(logger.metrics().total_logged(), 2);
    }

    #[test]
    fn test_failing_appender_is_counted_not_propagated() {
        let logger = SinkLogger::builder()
            .appender(Failing)
            .terminator(Arc::new(RecordingTerminator::new()))
            .build();

        logger.error("lost", &Fields::new());

        assert_eq!(logger.metrics().dropped_count(), 1);
        assert_eq!(logger.metrics().total_logged(), 0);
    }
}
