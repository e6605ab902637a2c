//! Core logger types and traits

pub mod appender;
pub mod composite;
pub mod config;
pub mod error;
pub mod fields;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod sink;
pub mod terminator;
pub mod timestamp;

pub use appender::Appender;
pub use composite::{tee, tee_or_nop, CompositeLogger, TeeBuilder};
pub use config::{LoggerConfig, OutputConfig, SinkConfig};
pub use error::{LoggerError, Result};
pub use fields::{FieldValue, Fields};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use logger::{CheckedMessage, Logger, NopLogger, SharedLogger};
pub use metrics::LoggerMetrics;
pub use sink::{SinkLogger, SinkLoggerBuilder};
pub use terminator::{
    ProcessTerminator, RecordingTerminator, Termination, Terminator, FATAL_EXIT_CODE,
};
pub use timestamp::TimestampFormat;
