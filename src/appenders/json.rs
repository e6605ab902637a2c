//! JSON appender for structured logging

use crate::core::{Appender, LogEntry, LoggerError, Result, TimestampFormat};
use serde_json::Value;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// JSON file appender for structured logging
///
/// Writes each entry as a single-line JSON object (JSONL format). Fields are
/// flattened into the object; `timestamp`, `level`, `message` and `thread`
/// take precedence over fields with the same key.
pub struct JsonAppender {
    writer: BufWriter<File>,
    timestamp_format: TimestampFormat,
}

impl JsonAppender {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::io_operation("opening JSON log file", path.display().to_string(), e)
            })?;

        Ok(Self {
            writer: BufWriter::new(file),
            timestamp_format: TimestampFormat::default(),
        })
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    fn to_json(&self, entry: &LogEntry) -> Value {
        let mut object = entry.fields.to_json_map();

        let timestamp = self.timestamp_format.format(&entry.timestamp);
        let timestamp = if self.timestamp_format.is_numeric() {
            timestamp
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or(Value::String(timestamp))
        } else {
            Value::String(timestamp)
        };

        object.insert("timestamp".to_string(), timestamp);
        object.insert("level".to_string(), Value::String(entry.level.to_str().to_string()));
        object.insert("message".to_string(), Value::String(entry.message.clone()));
        object.insert("thread".to_string(), Value::String(entry.thread_label().to_string()));

        Value::Object(object)
    }
}

impl Appender for JsonAppender {
    fn name(&self) -> &str {
        "json"
    }

    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let json = serde_json::to_string(&self.to_json(entry))?;
        writeln!(self.writer, "{}", json)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
