//! Trace output for the automation host
//!
//! The pipeline reports progress as human-readable lines (`"Loading ..."`,
//! `" - DONE."`, `"Error occurred"`) through a [`TraceSink`]. Nothing the
//! pipeline decides depends on what a sink does with them.

use console::style;

use crate::error::LoaderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceLevel {
    Info,
    Error,
}

/// One trace line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceRecord {
    pub level: TraceLevel,
    /// Error taxonomy name, set on the line describing an error
    pub kind: Option<&'static str>,
    pub message: String,
}

impl TraceRecord {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: TraceLevel::Info,
            kind: None,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: TraceLevel::Error,
            kind: None,
            message: message.into(),
        }
    }
}

/// Receiver of pipeline trace lines
pub trait TraceSink {
    fn record(&mut self, record: TraceRecord);

    fn info(&mut self, message: &str) {
        self.record(TraceRecord::info(message));
    }

    /// Trace an error: an `Error occurred` marker, then the message tagged with its kind
    fn error(&mut self, err: &LoaderError) {
        self.record(TraceRecord::error("Error occurred"));
        self.record(TraceRecord {
            level: TraceLevel::Error,
            kind: Some(err.kind()),
            message: err.to_string(),
        });
    }
}

/// Writes trace lines to stdout, which the automation host captures
#[derive(Debug, Default)]
pub struct ConsoleTrace;

impl ConsoleTrace {
    pub fn new() -> Self {
        Self
    }
}

impl TraceSink for ConsoleTrace {
    fn record(&mut self, record: TraceRecord) {
        match record.level {
            TraceLevel::Info => println!("{}", record.message),
            TraceLevel::Error => println!("{}", style(record.message).red()),
        }
    }
}

/// Keeps trace lines in memory
#[derive(Debug, Default)]
pub struct RecordingTrace {
    records: Vec<TraceRecord>,
}

impl RecordingTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[TraceRecord] {
        &self.records
    }

    pub fn lines(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.message.as_str()).collect()
    }

    /// Number of error lines tagged with `kind`
    pub fn count_kind(&self, kind: &str) -> usize {
        self.records
            .iter()
            .filter(|r| r.kind == Some(kind))
            .count()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.records.iter().any(|r| r.message.contains(needle))
    }
}

impl TraceSink for RecordingTrace {
    fn record(&mut self, record: TraceRecord) {
        self.records.push(record);
    }
}
