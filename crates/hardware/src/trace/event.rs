//! Trace events.

use crate::common::data::AccessType;

/// One access read from a trace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceEvent {
    /// Load or store.
    pub kind: AccessType,
    /// First byte touched.
    pub address: u64,
    /// Number of bytes touched.
    pub size: usize,
    /// Store payload, `size` bytes long; empty for loads.
    pub data: Vec<u8>,
    /// 1-based line on which the event starts (0 if not read from a trace).
    pub line: usize,
}

impl TraceEvent {
    /// Builds a load of `size` bytes at `address`.
    pub const fn load(address: u64, size: usize) -> Self {
        Self {
            kind: AccessType::Load,
            address,
            size,
            data: Vec::new(),
            line: 0,
        }
    }

    /// Builds a store of `data` at `address`.
    pub fn store(address: u64, data: impl Into<Vec<u8>>) -> Self {
        let data = data.into();
        Self {
            kind: AccessType::Store,
            address,
            size: data.len(),
            data,
            line: 0,
        }
    }

    /// Sets the trace line this event was read from.
    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }
}
