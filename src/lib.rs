//! # Rust Tee Logger
//!
//! Log once, reach several sinks. A tee logger forwards every call to each of
//! its member loggers, in order, on the calling thread.
//!
//! ## Features
//!
//! - **Fan-out**: `debug`, `info`, `warn`, `error` and `log` reach every member
//! - **Ordered termination**: Panic and Fatal are recorded by every member
//!   before the process panics or exits
//! - **Per-sink escalation**: `dfatal` is settled by each sink on its own
//! - **Cheap gating**: `check` stops at the first member that would record
//! - **Field binding**: `with` derives loggers without touching the original
//!
//! ## Example
//!
//! ```
//! use rust_tee_logger::prelude::*;
//! use std::sync::Arc;
//!
//! let console: SharedLogger = Arc::new(
//!     SinkLogger::builder()
//!         .min_level(LogLevel::Debug)
//!         .appender(ConsoleAppender::new())
//!         .build(),
//! );
//! let errors_only: SharedLogger = Arc::new(
//!     SinkLogger::builder()
//!         .min_level(LogLevel::Error)
//!         .appender(ConsoleAppender::with_colors(false))
//!         .build(),
//! );
//!
//! let logger = tee_or_nop(vec![console, errors_only]);
//! let request = logger.with(&Fields::new().with_field("request_id", "abc-123"));
//! request.info("request accepted", &Fields::new());
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::appenders::ConsoleAppender;
    pub use crate::appenders::{FileAppender, JsonAppender};
    pub use crate::core::{
        tee, tee_or_nop, Appender, CheckedMessage, CompositeLogger, FieldValue, Fields, LogEntry,
        LogLevel, Logger, LoggerConfig, LoggerError, LoggerMetrics, NopLogger, OutputConfig,
        ProcessTerminator, RecordingTerminator, Result, SharedLogger, SinkConfig, SinkLogger,
        TeeBuilder, Termination, Terminator, TimestampFormat,
    };
}

#[cfg(feature = "console")]
pub use appenders::ConsoleAppender;
pub use appenders::{FileAppender, JsonAppender};
pub use core::{
    tee, tee_or_nop, Appender, CheckedMessage, CompositeLogger, FieldValue, Fields, LogEntry,
    LogLevel, Logger, LoggerConfig, LoggerError, LoggerMetrics, NopLogger, OutputConfig,
    ProcessTerminator, RecordingTerminator, Result, SharedLogger, SinkConfig, SinkLogger,
    SinkLoggerBuilder, TeeBuilder, Termination, Terminator, TimestampFormat, FATAL_EXIT_CODE,
};
