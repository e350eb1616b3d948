//! Address Decomposition.
//!
//! This module splits a trace address into the fields the cache needs. It provides:
//! 1. **Decoding:** Block offset, set index and stored tag from a raw address.
//! 2. **Reconstruction:** The inverse mapping used to check that no address bits are lost.
//!
//! The stored tag is the address with only the block offset shifted away. The set
//! index bits stay inside the tag, so two addresses share a tag exactly when they
//! share a block. Hit/miss output depends on this, so it must not be narrowed to
//! the bits above the set index.

use crate::cache::CacheGeometry;

/// The fields of an address as seen by a set-associative cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedAddress {
    /// Value stored in a set slot and compared on lookup (`address >> block_offset_bits`).
    pub tag: u64,
    /// Index of the set this address maps to.
    pub set_index: usize,
    /// Byte position within the block.
    pub block_offset: u64,
}

/// Decodes `address` against `geometry`.
///
/// Pure bit arithmetic; `geometry` was validated when it was built.
#[inline]
pub fn decode(address: u64, geometry: &CacheGeometry) -> DecodedAddress {
    let offset_bits = geometry.block_offset_bits();
    let block_offset = address & low_mask(offset_bits);
    let shifted = address >> offset_bits;
    let set_index = (shifted & low_mask(geometry.set_index_bits())) as usize;

    DecodedAddress {
        tag: shifted,
        set_index,
        block_offset,
    }
}

impl DecodedAddress {
    /// Rebuilds the original address from the stored tag and block offset.
    #[inline]
    pub const fn reconstruct(&self, geometry: &CacheGeometry) -> u64 {
        (self.tag << geometry.block_offset_bits()) | self.block_offset
    }
}

/// Mask selecting the low `bits` bits of a `u64`.
#[inline]
const fn low_mask(bits: u32) -> u64 {
    if bits >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}
