//! Appender trait for sink output destinations

use super::{error::Result, log_entry::LogEntry};

/// Destination a [`SinkLogger`](super::SinkLogger) writes entries to
pub trait Appender: Send + Sync {
    fn append(&mut self, entry: &LogEntry) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
