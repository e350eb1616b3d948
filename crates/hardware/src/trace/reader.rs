//! Trace Reader.
//!
//! This module turns a whitespace-separated trace into [`TraceEvent`]s. It performs:
//! 1. **Tokenizing:** Splits the input into words, tracking the line each event starts on.
//! 2. **Field parsing:** Operation keyword, `0x`-prefixed hex address, decimal size.
//! 3. **Payload parsing:** Store bytes as hex digit pairs, with or without whitespace between pairs.
//!
//! Running out of input, even halfway through an event, ends the trace cleanly.
//! Anything else that does not parse is an [`SimError::InvalidTraceEvent`].

use std::io::BufRead;
use std::iter::FusedIterator;
use std::path::PathBuf;

use tracing::warn;

use super::event::TraceEvent;
use crate::common::constants::HEX_PREFIX;
use crate::common::data::AccessType;
use crate::common::error::{SimError, SimResult};

/// Streaming parser over a buffered trace source.
///
/// Yields one `SimResult<TraceEvent>` per access and stops after the first error.
#[derive(Debug)]
pub struct TraceReader<R> {
    input: R,
    /// Name used in I/O error messages.
    source: PathBuf,
    /// Current input line.
    buf: String,
    /// Byte offset of the next unread character in `buf`.
    pos: usize,
    /// 1-based number of the line held in `buf`.
    line: usize,
    done: bool,
}

impl<R: BufRead> TraceReader<R> {
    /// Creates a reader over `input`.
    pub fn new(input: R) -> Self {
        Self {
            input,
            source: PathBuf::from("<trace>"),
            buf: String::new(),
            pos: 0,
            line: 0,
            done: false,
        }
    }

    /// Names the trace source for error messages (usually its file path).
    #[must_use]
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = source.into();
        self
    }

    /// Number of the line most recently read, 1-based.
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Parses the next complete event, or `None` at end of input.
    fn read_event(&mut self) -> SimResult<Option<TraceEvent>> {
        let Some(keyword) = self.next_word()? else {
            return Ok(None);
        };
        let line = self.line;
        let kind: AccessType = keyword
            .parse()
            .map_err(|reason: String| SimError::trace(line, reason))?;

        let Some(address) = self.next_word()? else {
            return Ok(truncated(kind, line));
        };
        let address = parse_address(&address).map_err(|reason| SimError::trace(line, reason))?;

        let Some(size) = self.next_word()? else {
            return Ok(truncated(kind, line));
        };
        let size = parse_size(&size).map_err(|reason| SimError::trace(line, reason))?;

        let mut data = Vec::new();
        if kind == AccessType::Store {
            for _ in 0..size {
                match self.next_hex_byte()? {
                    Some(byte) => data.push(byte),
                    None => return Ok(truncated(kind, line)),
                }
            }
        }

        Ok(Some(TraceEvent {
            kind,
            address,
            size,
            data,
            line,
        }))
    }

    /// Returns the next whitespace-delimited word.
    fn next_word(&mut self) -> SimResult<Option<String>> {
        if !self.skip_whitespace()? {
            return Ok(None);
        }
        let rest = &self.buf[self.pos..];
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let word = rest[..end].to_owned();
        self.pos += end;
        Ok(Some(word))
    }

    /// Returns the next payload byte: one or two hex digits after optional whitespace.
    fn next_hex_byte(&mut self) -> SimResult<Option<u8>> {
        if !self.skip_whitespace()? {
            return Ok(None);
        }
        let rest = &self.buf[self.pos..];
        let digits = rest
            .bytes()
            .take(2)
            .take_while(u8::is_ascii_hexdigit)
            .count();
        if digits == 0 {
            let found = rest.split_whitespace().next().unwrap_or_default();
            return Err(SimError::trace(
                self.line,
                format!("expected hex payload byte, found `{found}`"),
            ));
        }
        let byte = u8::from_str_radix(&rest[..digits], 16)
            .map_err(|e| SimError::trace(self.line, format!("bad payload byte: {e}")))?;
        self.pos += digits;
        Ok(Some(byte))
    }

    /// Moves past whitespace, reading further lines as needed.
    ///
    /// Returns `false` once the input is exhausted.
    fn skip_whitespace(&mut self) -> SimResult<bool> {
        loop {
            let rest = &self.buf[self.pos..];
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();
            if !trimmed.is_empty() {
                return Ok(true);
            }
            if !self.fill()? {
                return Ok(false);
            }
        }
    }

    /// Replaces the buffer with the next input line. Returns `false` at end of input.
    fn fill(&mut self) -> SimResult<bool> {
        let mut bytes = std::mem::take(&mut self.buf).into_bytes();
        bytes.clear();
        self.pos = 0;
        let read = self
            .input
            .read_until(b'\n', &mut bytes)
            .map_err(|source| SimError::Io {
                path: self.source.clone(),
                source,
            })?;
        if read == 0 {
            return Ok(false);
        }
        self.line += 1;
        self.buf = String::from_utf8(bytes).map_err(|e| {
            SimError::trace(
                self.line,
                format!("invalid UTF-8 at byte {}", e.utf8_error().valid_up_to()),
            )
        })?;
        Ok(true)
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = SimResult<TraceEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.read_event().transpose();
        if !matches!(item, Some(Ok(_))) {
            self.done = true;
        }
        item
    }
}

impl<R: BufRead> FusedIterator for TraceReader<R> {}

/// Logs an event cut off by end of input. The partial event is dropped.
fn truncated(kind: AccessType, line: usize) -> Option<TraceEvent> {
    warn!(line, op = %kind, "trace ends mid-event; partial access ignored");
    None
}

/// Parses a `0x`-prefixed hexadecimal address.
fn parse_address(word: &str) -> Result<u64, String> {
    let digits = word
        .strip_prefix(HEX_PREFIX)
        .ok_or_else(|| format!("address `{word}` is missing the {HEX_PREFIX} prefix"))?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!("address `{word}` is not hexadecimal"));
    }
    u64::from_str_radix(digits, 16).map_err(|_| format!("address `{word}` is too large"))
}

/// Parses a positive decimal access size.
fn parse_size(word: &str) -> Result<usize, String> {
    let digits = word.strip_prefix('-').unwrap_or(word);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("size `{word}` is not a decimal integer"));
    }
    let size: i128 = word.parse().map_err(|_| format!("size `{word}` is too large"))?;
    if size <= 0 {
        return Err(format!("size {size} must be positive"));
    }
    usize::try_from(size).map_err(|_| format!("size {size} is too large"))
}
