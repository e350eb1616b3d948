//! Cache Geometry.
//!
//! Validated cache dimensions and the bit-field widths derived from them.
//! A geometry is built once per run and never changes; every address decode
//! reads its widths.

use crate::common::addr::{self, DecodedAddress};
use crate::common::constants::MAX_ASSOC;
use crate::common::error::{SimError, SimResult};
use crate::config::CacheConfig;

/// Immutable, validated cache dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheGeometry {
    capacity_bytes: usize,
    associativity: usize,
    block_size_bytes: usize,
    num_sets: usize,
    block_offset_bits: u32,
    set_index_bits: u32,
}

impl CacheGeometry {
    /// Validates the supplied dimensions and derives the set count and field widths.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidGeometry`] if any dimension is zero, the
    /// associativity exceeds [`MAX_ASSOC`], the block size is not a power of two,
    /// the capacity is not a whole number of sets, or the set count is not a
    /// power of two.
    pub fn new(
        capacity_bytes: usize,
        associativity: usize,
        block_size_bytes: usize,
    ) -> SimResult<Self> {
        if capacity_bytes == 0 {
            return Err(invalid("capacity must be positive"));
        }
        if associativity == 0 {
            return Err(invalid("associativity must be positive"));
        }
        if block_size_bytes == 0 {
            return Err(invalid("block size must be positive"));
        }
        if associativity > MAX_ASSOC {
            return Err(invalid(format!(
                "associativity {associativity} exceeds the maximum of {MAX_ASSOC}"
            )));
        }
        if !block_size_bytes.is_power_of_two() {
            return Err(invalid(format!(
                "block size {block_size_bytes} is not a power of two"
            )));
        }

        let set_bytes = block_size_bytes
            .checked_mul(associativity)
            .ok_or_else(|| invalid("block size times associativity overflows"))?;
        if capacity_bytes < set_bytes || capacity_bytes % set_bytes != 0 {
            return Err(invalid(format!(
                "capacity {capacity_bytes} is not a whole number of {set_bytes}-byte sets"
            )));
        }

        let num_sets = capacity_bytes / set_bytes;
        if !num_sets.is_power_of_two() {
            return Err(invalid(format!(
                "derived set count {num_sets} is not a power of two"
            )));
        }

        Ok(Self {
            capacity_bytes,
            associativity,
            block_size_bytes,
            num_sets,
            block_offset_bits: block_size_bytes.trailing_zeros(),
            set_index_bits: num_sets.trailing_zeros(),
        })
    }

    /// Builds a geometry from a [`CacheConfig`], converting its KiB capacity to bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidGeometry`] under the same conditions as [`Self::new`],
    /// or if the capacity in bytes overflows.
    pub fn from_config(config: &CacheConfig) -> SimResult<Self> {
        let capacity = config
            .size_bytes()
            .ok_or_else(|| invalid(format!("capacity of {} KiB overflows", config.size_kb)))?;
        Self::new(capacity, config.ways, config.line_bytes)
    }

    /// Total capacity in bytes.
    pub const fn capacity_bytes(&self) -> usize {
        self.capacity_bytes
    }

    /// Slots per set.
    pub const fn associativity(&self) -> usize {
        self.associativity
    }

    /// Block size in bytes.
    pub const fn block_size_bytes(&self) -> usize {
        self.block_size_bytes
    }

    /// Number of sets.
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// `log2(block_size_bytes)`.
    pub const fn block_offset_bits(&self) -> u32 {
        self.block_offset_bits
    }

    /// `log2(num_sets)`.
    pub const fn set_index_bits(&self) -> u32 {
        self.set_index_bits
    }

    /// Splits `address` into tag, set index and block offset.
    #[inline]
    pub fn decode(&self, address: u64) -> DecodedAddress {
        addr::decode(address, self)
    }
}

fn invalid(reason: impl Into<String>) -> SimError {
    SimError::InvalidGeometry(reason.into())
}
