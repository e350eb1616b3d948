//! Simulator Error Definitions.
//!
//! This module defines the error type returned by every fallible simulator operation. It provides:
//! 1. **Validation Errors:** Rejected cache geometry and malformed trace events.
//! 2. **Memory Errors:** Accesses that fall outside the backing store.
//! 3. **Input Errors:** Unreadable trace or configuration files.
//!
//! Every variant is fatal to a run; nothing is retried.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the simulator.
pub type SimResult<T> = Result<T, SimError>;

/// Fatal simulator errors.
#[derive(Debug, Error)]
pub enum SimError {
    /// Capacity, associativity or block size do not describe a usable cache.
    #[error("invalid cache geometry: {0}")]
    InvalidGeometry(String),

    /// A trace event could not be parsed or carries an illegal value.
    #[error("invalid trace event{}: {reason}", line_suffix(.line))]
    InvalidTraceEvent {
        /// 1-based line on which the event starts; 0 if it did not come from a trace.
        line: usize,
        /// Description of the offending token.
        reason: String,
    },

    /// An access touches bytes past the end of the backing store.
    #[error(
        "access of {size} bytes at {address:#x} exceeds backing store of {memory_size} bytes"
    )]
    AddressOutOfRange {
        /// First byte of the access.
        address: u64,
        /// Number of bytes touched.
        size: usize,
        /// Size of the backing store in bytes.
        memory_size: usize,
    },

    /// A trace or configuration file could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        /// Path that failed to open or read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A JSON configuration document failed to deserialize.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// An engine failure annotated with the trace line of the triggering event.
    #[error("line {line}: {source}")]
    AtLine {
        /// 1-based line of the event being processed.
        line: usize,
        /// The failure raised while processing it.
        #[source]
        source: Box<SimError>,
    },
}

impl SimError {
    /// Shorthand for building an [`SimError::InvalidTraceEvent`].
    pub fn trace(line: usize, reason: impl Into<String>) -> Self {
        Self::InvalidTraceEvent {
            line,
            reason: reason.into(),
        }
    }

    /// Attaches the trace line of the event that raised this error.
    ///
    /// Errors that already carry a line number, and any error when `line` is 0,
    /// are returned unchanged.
    #[must_use]
    pub fn at_line(self, line: usize) -> Self {
        if line == 0 {
            return self;
        }
        match self {
            Self::InvalidTraceEvent { line: 0, reason } => Self::InvalidTraceEvent { line, reason },
            Self::InvalidTraceEvent { .. } | Self::AtLine { .. } => self,
            other => Self::AtLine {
                line,
                source: Box::new(other),
            },
        }
    }

    /// Returns the innermost error, looking through any line annotation.
    pub fn root(&self) -> &Self {
        match self {
            Self::AtLine { source, .. } => source.root(),
            other => other,
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn line_suffix(line: &usize) -> String {
    if *line == 0 {
        String::new()
    } else {
        format!(" on line {line}")
    }
}
