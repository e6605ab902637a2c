//! Declarative configuration for tee loggers
//!
//! A [`LoggerConfig`] lists sinks; each sink becomes a [`SinkLogger`] and the
//! sinks are combined with [`tee`].
//!
//! # Example
//!
//! ```
//! use rust_tee_logger::prelude::*;
//!
//! let config = LoggerConfig::from_json(r#"{
//!     "sinks": [
//!         { "min_level": "debug", "development": true, "output": { "type": "console" } },
//!         { "min_level": "warn", "output": { "type": "console", "colors": false } }
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(config.sinks.len(), 2);
//! let logger = config.build().unwrap().expect("two sinks");
//! logger.info("configured", &Fields::new());
//! ```

use super::{
    composite::TeeBuilder,
    error::{LoggerError, Result},
    fields::Fields,
    log_level::LogLevel,
    logger::SharedLogger,
    sink::SinkLogger,
    terminator::{ProcessTerminator, Terminator},
    timestamp::TimestampFormat,
};
use crate::appenders::{FileAppender, JsonAppender};
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration: the sinks to tee, in order
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggerConfig {
    #[serde(default)]
    pub sinks: Vec<SinkConfig>,
}

/// One sink
#[derive(Debug, Clone, Deserialize)]
pub struct SinkConfig {
    #[serde(default, deserialize_with = "deserialize_level")]
    pub min_level: LogLevel,

    /// `dfatal` behaves as `fatal` when set
    #[serde(default)]
    pub development: bool,

    #[serde(default)]
    pub timestamp_format: TimestampFormat,

    /// Fields bound to every entry of this sink
    #[serde(default)]
    pub fields: Fields,

    pub output: OutputConfig,
}

/// Where a sink writes
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputConfig {
    Console {
        #[serde(default = "default_colors")]
        colors: bool,
    },
    File {
        path: PathBuf,
    },
    Json {
        path: PathBuf,
    },
}

fn default_colors() -> bool {
    true
}

fn deserialize_level<'de, D>(deserializer: D) -> std::result::Result<LogLevel, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

impl LoggerConfig {
    /// Parse a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LoggerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every sink without opening any output
    pub fn validate(&self) -> Result<()> {
        self.sinks.iter().try_for_each(SinkConfig::validate)
    }

    /// Build the configured loggers with process termination
    ///
    /// `Ok(None)` when no sink is configured.
    pub fn build(&self) -> Result<Option<SharedLogger>> {
        self.build_with_terminator(ProcessTerminator::shared())
    }

    /// Build with `terminator` shared by the tee and every sink
    pub fn build_with_terminator(
        &self,
        terminator: Arc<dyn Terminator>,
    ) -> Result<Option<SharedLogger>> {
        let loggers = self
            .sinks
            .iter()
            .map(|sink| {
                sink.build(Arc::clone(&terminator))
                    .map(|logger| Arc::new(logger) as SharedLogger)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(TeeBuilder::new()
            .loggers(loggers)
            .terminator(terminator)
            .build())
    }
}

impl SinkConfig {
    pub fn validate(&self) -> Result<()> {
        match &self.output {
            OutputConfig::Console { .. } => {
                if cfg!(feature = "console") {
                    Ok(())
                } else {
                    Err(LoggerError::config(
                        "SinkConfig",
                        "console output requires the `console` feature",
                    ))
                }
            }
            OutputConfig::File { path } | OutputConfig::Json { path } => {
                if path.as_os_str().is_empty() {
                    Err(LoggerError::config("SinkConfig", "output path must not be empty"))
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Open the output and build the sink
    pub fn build(&self, terminator: Arc<dyn Terminator>) -> Result<SinkLogger> {
        self.validate()?;

        let mut builder = SinkLogger::builder()
            .min_level(self.min_level)
            .development(self.development)
            .terminator(terminator);

        for (key, value) in self.fields.iter() {
            builder = builder.field(key, value.clone());
        }

        let builder = match &self.output {
            #[cfg(feature = "console")]
            OutputConfig::Console { colors } => builder.appender(
                crate::appenders::ConsoleAppender::with_colors(*colors)
                    .with_timestamp_format(self.timestamp_format.clone()),
            ),
            #[cfg(not(feature = "console"))]
            OutputConfig::Console { .. } => {
                return Err(LoggerError::config(
                    "SinkConfig",
                    "console output requires the `console` feature",
                ))
            }
            OutputConfig::File { path } => builder.appender(
                FileAppender::new(path)?.with_timestamp_format(self.timestamp_format.clone()),
            ),
            OutputConfig::Json { path } => builder.appender(
                JsonAppender::new(path)?.with_timestamp_format(self.timestamp_format.clone()),
            ),
        };

        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Fields, Logger, RecordingTerminator};
    use tempfile::tempdir;

    #[test]
    fn test_parse_defaults() {
        let config = LoggerConfig::from_json(r#"{ "sinks": [ { "output": { "type": "console" } } ] }"#)
            .unwrap();

        let sink = &config.sinks[0];
        assert_eq!(sink.min_level, LogLevel::Info);
        assert!(!sink.development);
        assert_eq!(sink.timestamp_format, TimestampFormat::Iso8601);
        assert!(matches!(sink.output, OutputConfig::Console { colors: true }));
    }

    #[test]
    fn test_level_is_case_insensitive() {
        let config = LoggerConfig::from_json(
            r#"{ "sinks": [ { "min_level": "WARNING", "output": { "type": "console" } } ] }"#,
        )
        .unwrap();
        assert_eq!(config.sinks[0].min_level, LogLevel::Warn);
    }

    #[test]
    fn test_unknown_level_is_rejected() {
        let err = LoggerConfig::from_json(
            r#"{ "sinks": [ { "min_level": "loud", "output": { "type": "console" } } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, LoggerError::JsonError(_)));
    }

    #[test]
    fn test_empty_path_is_rejected() {
        let err = LoggerConfig::from_json(
            r#"{ "sinks": [ { "output": { "type": "file", "path": "" } } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_empty_config_builds_nothing() {
        let config = LoggerConfig::default();
        assert!(config.build().unwrap().is_none());
    }

    #[test]
    fn test_build_file_sinks() {
        let dir = tempdir().unwrap();
        let text = dir.path().join("app.log");
        let json = dir.path().join("app.jsonl");
        let raw = serde_json::json!({
            "sinks": [
                { "min_level": "info", "output": { "type": "file", "path": text } },
                {
                    "min_level": "error",
                    "fields": { "sink": "audit" },
                    "output": { "type": "json", "path": json }
                }
            ]
        });

        let config = LoggerConfig::from_json(&raw.to_string()).unwrap();
        let logger = config
            .build_with_terminator(Arc::new(RecordingTerminator::new()))
            .unwrap()
            .expect("two sinks");

        logger.info("routine", &Fields::new());
        logger.error("broken", &Fields::new());
        // Dropping the loggers flushes the file appenders
        drop(logger);

        let text_lines = std::fs::read_to_string(&text).unwrap();
        assert_eq!(text_lines.lines().count(), 2);

        let json_lines = std::fs::read_to_string(&json).unwrap();
        let lines: Vec<&str> = json_lines.lines().collect();
        assert_eq!(lines.len(), 1);
        let parsed: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed["message"], "broken");
        assert_eq!(parsed["sink"], "audit");
    }

    #[test]
    fn test_bound_fields_keep_configured_order() {
        let dir = tempdir().unwrap();
        let text = dir.path().join("ordered.log");
        let raw = format!(
            r#"{{"sinks": [{{
                "fields": {{ "zone": "eu", "app": "billing" }},
                "output": {{ "type": "file", "path": {} }}
            }}]}}"#,
            serde_json::to_string(&text).unwrap()
        );

        let config = LoggerConfig::from_json(&raw).unwrap();
        assert_eq!(config.sinks[0].fields.format_fields(), "zone=eu app=billing");

        let logger = config
            .build_with_terminator(Arc::new(RecordingTerminator::new()))
            .unwrap()
            .expect("one sink");
        logger.info("ready", &Fields::new());
        drop(logger);

        let content = std::fs::read_to_string(&text).unwrap();
        assert!(content.trim_end().ends_with("ready | zone=eu app=billing"));
    }
}
