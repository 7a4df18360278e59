//! Core types for the LHE rewriter library
//!
//! This module defines the error taxonomy, the per-event replacement record
//! reported in verbose mode, and the counters collected over a run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for rewriter operations
pub type Result<T> = std::result::Result<T, RewriteError>;

/// Malformed event-record input
///
/// Every variant carries the 1-based counter of the event being processed
/// when the problem was detected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("Event {event}: </event> tag before </weights> tag")]
    UnclosedWeights { event: u64 },

    #[error("Event {event}: Malformed line: {line}")]
    MalformedWeight { event: u64, line: String },

    #[error("Event {event}: No virtual weight found in event")]
    NoWeight { event: u64 },

    #[error("Event {event}: header line has {found} fields, field index {required} is required")]
    HeaderTooShort {
        event: u64,
        found: usize,
        required: usize,
    },

    #[error("Event {event}: input ended before </event> tag")]
    UnterminatedEvent { event: u64 },
}

impl FormatError {
    /// The event counter at the time of failure
    pub fn event(&self) -> u64 {
        match self {
            FormatError::UnclosedWeights { event }
            | FormatError::MalformedWeight { event, .. }
            | FormatError::NoWeight { event }
            | FormatError::HeaderTooShort { event, .. }
            | FormatError::UnterminatedEvent { event } => *event,
        }
    }
}

/// Errors that can occur during a rewrite run
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid output path: {0}")]
    OutputPath(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// One generator weight substitution, reported after an event is written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    /// 1-based event counter
    pub event: u64,
    /// Value previously found in the header weight field
    pub old_value: String,
    /// Extracted weight written in its place
    pub new_value: String,
}

impl fmt::Display for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Event {}: replacing XWGTUP of {} by {}",
            self.event, self.old_value, self.new_value
        )
    }
}

/// Counters collected over a single run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteStats {
    /// Number of event records rewritten
    pub events: u64,
    /// Lines written as part of event records
    pub event_lines: u64,
    /// Lines outside any event record, copied unchanged
    pub passthrough_lines: u64,
}

impl RewriteStats {
    /// Total number of lines written to the output
    pub fn total_lines(&self) -> u64 {
        self.event_lines + self.passthrough_lines
    }
}
