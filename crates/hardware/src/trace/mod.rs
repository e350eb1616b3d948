//! Trace input.
//!
//! This module reads access traces. It provides:
//! 1. **Events:** `TraceEvent`, one load or store with its address, size and payload.
//! 2. **Reader:** `TraceReader`, an iterator of events over any buffered source.
//!
//! Input format, one event per group of tokens:
//!
//! ```text
//! <load|store> 0x<hex-address> <decimal-size> [<hex-bytes-for-store>]
//! ```

/// Trace event type.
pub mod event;

/// Trace tokenizer and parser.
pub mod reader;

pub use event::TraceEvent;
pub use reader::TraceReader;
