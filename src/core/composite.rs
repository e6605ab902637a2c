//! Tee logger: one logger in front of several
//!
//! [`tee`] duplicates every log call to each member logger, in the order the
//! members were given, on the calling thread. Panic and Fatal are first
//! recorded by every member and only then terminate, through the tee's own
//! [`Terminator`]. `dfatal` is forwarded as is, so each member settles it
//! according to its own configuration.

use super::{
    fields::Fields,
    log_level::LogLevel,
    logger::{CheckedMessage, Logger, NopLogger, SharedLogger},
    terminator::{ProcessTerminator, Terminator, FATAL_EXIT_CODE},
};
use std::sync::Arc;

/// Combine `loggers` into one
///
/// - no logger gives `None`: nothing to log to
/// - a single logger is returned unchanged
/// - two or more give a [`CompositeLogger`] over them, in order
///
/// # Example
///
/// ```
/// use rust_tee_logger::prelude::*;
/// use std::sync::Arc;
///
/// let console: SharedLogger = Arc::new(SinkLogger::builder().build());
/// let audit: SharedLogger = Arc::new(SinkLogger::builder().min_level(LogLevel::Warn).build());
///
/// let logger = tee(vec![console, audit]).expect("two loggers");
/// logger.info("service started", &Fields::new().with_field("port", 8080));
/// ```
pub fn tee(loggers: Vec<SharedLogger>) -> Option<SharedLogger> {
    TeeBuilder::new().loggers(loggers).build()
}

/// Like [`tee`], falling back to a [`NopLogger`] when `loggers` is empty
pub fn tee_or_nop(loggers: Vec<SharedLogger>) -> SharedLogger {
    tee(loggers).unwrap_or_else(NopLogger::shared)
}

/// Fan-out wrapper over two or more loggers
///
/// Built by [`tee`] or [`TeeBuilder`]. The member list never changes after
/// construction; `with` produces a new composite.
pub struct CompositeLogger {
    loggers: Vec<SharedLogger>,
    terminator: Arc<dyn Terminator>,
}

impl CompositeLogger {
    fn new(loggers: Vec<SharedLogger>, terminator: Arc<dyn Terminator>) -> Self {
        Self {
            loggers,
            terminator,
        }
    }

    /// Member loggers in dispatch order
    pub fn loggers(&self) -> &[SharedLogger] {
        &self.loggers
    }

    /// Concrete form of [`Logger::with`]
    #[must_use]
    pub fn with_fields(&self, fields: &Fields) -> CompositeLogger {
        let loggers = self
            .loggers
            .iter()
            .map(|logger| logger.with(fields))
            .collect();
        CompositeLogger::new(loggers, Arc::clone(&self.terminator))
    }

    /// Single funnel for generic and terminal writes
    fn fan_out(&self, level: LogLevel, message: &str, fields: &Fields) {
        for logger in &self.loggers {
            logger.log(level, message, fields);
        }
    }
}

impl Logger for CompositeLogger {
    fn log(&self, level: LogLevel, message: &str, fields: &Fields) {
        self.fan_out(level, message, fields);
    }

    fn debug(&self, message: &str, fields: &Fields) {
        for logger in &self.loggers {
            logger.debug(message, fields);
        }
    }

    fn info(&self, message: &str, fields: &Fields) {
        for logger in &self.loggers {
            logger.info(message, fields);
        }
    }

    fn warn(&self, message: &str, fields: &Fields) {
        for logger in &self.loggers {
            logger.warn(message, fields);
        }
    }

    fn error(&self, message: &str, fields: &Fields) {
        for logger in &self.loggers {
            logger.error(message, fields);
        }
    }

    fn panic(&self, message: &str, fields: &Fields) {
        self.fan_out(LogLevel::Panic, message, fields);
        self.terminator.panic(message);
    }

    fn fatal(&self, message: &str, fields: &Fields) {
        self.fan_out(LogLevel::Fatal, message, fields);
        self.terminator.exit(FATAL_EXIT_CODE);
    }

    fn dfatal(&self, message: &str, fields: &Fields) {
        for logger in &self.loggers {
            logger.dfatal(message, fields);
        }
    }

    fn with(&self, fields: &Fields) -> SharedLogger {
        Arc::new(self.with_fields(fields))
    }

    fn check<'a>(&'a self, level: LogLevel, message: &'a str) -> Option<CheckedMessage<'a>> {
        // The token is bound to the composite so the write reaches every member,
        // not only the one that answered.
        let enabled = level.is_terminal()
            || self
                .loggers
                .iter()
                .any(|logger| logger.check(level, message).is_some());

        enabled.then(|| CheckedMessage::new(self, level, message))
    }
}

/// Builder for tee loggers
///
/// # Example
///
/// ```
/// use rust_tee_logger::prelude::*;
/// use std::sync::Arc;
///
/// let logger = TeeBuilder::new()
///     .logger(SinkLogger::builder().min_level(LogLevel::Debug).build())
///     .logger(SinkLogger::builder().min_level(LogLevel::Error).build())
///     .terminator(Arc::new(RecordingTerminator::new()))
///     .build();
/// assert!(logger.is_some());
/// ```
pub struct TeeBuilder {
    loggers: Vec<SharedLogger>,
    terminator: Option<Arc<dyn Terminator>>,
}

impl TeeBuilder {
    pub fn new() -> Self {
        Self {
            loggers: Vec::new(),
            terminator: None,
        }
    }

    /// Add a logger owned by the tee
    #[must_use = "builder methods return a new value"]
    pub fn logger<L: Logger + 'static>(mut self, logger: L) -> Self {
        self.loggers.push(Arc::new(logger));
        self
    }

    /// Add a logger that is also used elsewhere
    #[must_use = "builder methods return a new value"]
    pub fn shared_logger(mut self, logger: SharedLogger) -> Self {
        self.loggers.push(logger);
        self
    }

    /// Add several loggers, keeping their order
    #[must_use = "builder methods return a new value"]
    pub fn loggers<I>(mut self, loggers: I) -> Self
    where
        I: IntoIterator<Item = SharedLogger>,
    {
        self.loggers.extend(loggers);
        self
    }

    /// Set the terminal action for Panic and Fatal
    ///
    /// Defaults to [`ProcessTerminator`]. Ignored when a single logger is
    /// returned unchanged, since that logger terminates on its own.
    #[must_use = "builder methods return a new value"]
    pub fn terminator(mut self, terminator: Arc<dyn Terminator>) -> Self {
        self.terminator = Some(terminator);
        self
    }

    /// Build the tee; see [`tee`] for the zero and one logger cases
    pub fn build(self) -> Option<SharedLogger> {
        self.build_composite().map_or_else(
            |single| single,
            |composite| Some(Arc::new(composite) as SharedLogger),
        )
    }

    /// Build a [`CompositeLogger`] when there are at least two loggers
    ///
    /// Otherwise hands back what [`tee`] would return.
    pub fn build_composite(mut self) -> Result<CompositeLogger, Option<SharedLogger>> {
        match self.loggers.len() {
            0 => Err(None),
            1 => Err(self.loggers.pop()),
            _ => Ok(CompositeLogger::new(
                self.loggers,
                self.terminator.unwrap_or_else(ProcessTerminator::shared),
            )),
        }
    }
}

impl Default for TeeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
