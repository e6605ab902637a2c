//! File appender implementation

use crate::core::{Appender, LogEntry, LoggerError, Result, TimestampFormat};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Appends one text line per entry to a file
pub struct FileAppender {
    path: PathBuf,
    writer: BufWriter<File>,
    timestamp_format: TimestampFormat,
}

impl FileAppender {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation("opening log file", path.display().to_string(), e)
            })?;

        Ok(Self {
            path,
            writer: BufWriter::new(file),
            timestamp_format: TimestampFormat::default(),
        })
    }

    /// Set the timestamp format for this appender
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use rust_tee_logger::appenders::FileAppender;
    /// use rust_tee_logger::TimestampFormat;
    ///
    /// let appender = FileAppender::new("/var/log/app.log")
    ///     .unwrap()
    ///     .with_timestamp_format(TimestampFormat::Rfc3339);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Appender for FileAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let mut output = format!(
            "[{}] [{:5}] [{}] {}",
            self.timestamp_format.format(&entry.timestamp),
            entry.level.to_str(),
            entry.thread_label(),
            entry.message
        );

        if !entry.fields.is_empty() {
            output.push_str(" | ");
            output.push_str(&entry.fields.to_string());
        }

        output.push('\n');

        self.writer.write_all(output.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Fields, LogLevel};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_file_appender_writes_lines() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("app.log");

        let mut appender = FileAppender::new(&log_path)?;
        appender.append(&LogEntry::new(LogLevel::Info, "started"))?;
        appender.append(
            &LogEntry::new(LogLevel::Error, "failed")
                .with_fields(Fields::new().with_field("attempt", 3)),
        )?;
        appender.flush()?;

        let content = fs::read_to_string(&log_path)?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("[INFO ]"));
        assert!(lines[1].ends_with("failed | attempt=3"));
        Ok(())
    }

    #[test]
    fn test_file_appender_reports_bad_path() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("no_such_dir").join("app.log");

        let err = FileAppender::new(&missing).err().expect("directory does not exist");
        assert!(matches!(err, LoggerError::IoOperation { .. }));
    }

    #[test]
    fn test_file_appender_flushes_on_drop() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("buffered.log");

        let mut appender = FileAppender::new(&log_path)?;
        appender.append(&LogEntry::new(LogLevel::Warn, "buffered"))?;
        drop(appender);

        let content = fs::read_to_string(&log_path)?;
        assert_eq!(content.lines().count(), 1);
        assert!(content.contains("[WARN ]"));
        Ok(())
    }
}
