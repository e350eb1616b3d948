//! Backing Memory.
//!
//! This module implements the memory image the cache sits in front of. It provides:
//! 1. **Trait:** `BackingStore`, the seam between the cache engine and memory.
//! 2. **Buffer:** `MemoryBuffer`, an owned byte array sized at construction.
//!
//! The backing store always holds the ground-truth bytes; the cache only decides hit or miss.

/// Owned byte buffer implementation.
pub mod buffer;

/// Backing store trait.
pub mod traits;

pub use buffer::MemoryBuffer;
pub use traits::BackingStore;
