//! Memory Buffer Implementation.
//!
//! This module provides the owned byte array that backs the simulated memory.
//! It is allocated zeroed at a fixed size and never grows; every access is
//! bounds-checked against that size.

use std::fmt;
use std::ops::Range;

use super::traits::BackingStore;
use crate::common::error::{SimError, SimResult};

/// Owned, fixed-size, zero-initialised memory image.
#[derive(Clone, PartialEq, Eq)]
pub struct MemoryBuffer {
    bytes: Vec<u8>,
}

impl MemoryBuffer {
    /// Creates a zeroed buffer of `size` bytes.
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![0; size],
        }
    }

    /// Returns the size of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Reads a slice of memory.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::AddressOutOfRange`] if the slice does not fit in the buffer.
    pub fn read_slice(&self, address: u64, len: usize) -> SimResult<&[u8]> {
        let range = self.range(address, len)?;
        Ok(&self.bytes[range])
    }

    /// Writes a slice of memory.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::AddressOutOfRange`] if the slice does not fit in the buffer.
    pub fn write_slice(&mut self, address: u64, data: &[u8]) -> SimResult<()> {
        let range = self.range(address, data.len())?;
        self.bytes[range].copy_from_slice(data);
        Ok(())
    }

    /// Converts an absolute access into a buffer range, checking bounds and overflow.
    fn range(&self, address: u64, len: usize) -> SimResult<Range<usize>> {
        let out_of_range = || SimError::AddressOutOfRange {
            address,
            size: len,
            memory_size: self.bytes.len(),
        };
        let start = usize::try_from(address).map_err(|_| out_of_range())?;
        let end = start.checked_add(len).ok_or_else(out_of_range)?;
        if end > self.bytes.len() {
            return Err(out_of_range());
        }
        Ok(start..end)
    }
}

impl fmt::Debug for MemoryBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryBuffer")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

impl BackingStore for MemoryBuffer {
    fn size(&self) -> usize {
        self.len()
    }

    fn read_bytes(&self, address: u64, size: usize) -> SimResult<Vec<u8>> {
        self.read_slice(address, size).map(<[u8]>::to_vec)
    }

    fn write_bytes(&mut self, address: u64, data: &[u8]) -> SimResult<()> {
        self.write_slice(address, data)
    }
}
