//! Backing store trait.
//!
//! This module defines the `BackingStore` trait the cache engine reads and writes through. It provides:
//! 1. **Sizing:** The number of addressable bytes.
//! 2. **Access:** Bounds-checked multi-byte reads and writes at absolute addresses.
//!
//! The engine only ever touches memory through this trait, so tests can swap in a mock.

use crate::common::error::SimResult;

/// Byte-addressable memory behind the cache.
pub trait BackingStore {
    /// Returns the number of addressable bytes.
    fn size(&self) -> usize;

    /// Reads `size` bytes starting at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::AddressOutOfRange`](crate::common::SimError::AddressOutOfRange)
    /// if any byte of the range lies outside the store.
    fn read_bytes(&self, address: u64, size: usize) -> SimResult<Vec<u8>>;

    /// Writes `data` starting at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::AddressOutOfRange`](crate::common::SimError::AddressOutOfRange)
    /// if any byte of the range lies outside the store. Nothing is written in that case.
    fn write_bytes(&mut self, address: u64, data: &[u8]) -> SimResult<()>;
}
