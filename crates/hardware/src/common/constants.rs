//! Global Simulator Constants.
//!
//! This module defines constants shared by the geometry validator, the backing
//! store and the configuration defaults. It includes:
//! 1. **Cache Limits:** Upper bound on per-set slot count.
//! 2. **Memory Constants:** Default backing store size.
//! 3. **Unit Conversions:** Kilobyte scaling for capacity inputs.

/// Maximum number of slots in a single cache set.
pub const MAX_ASSOC: usize = 100;

/// Default backing store size in bytes (16 MiB).
pub const DEFAULT_MEMORY_SIZE: usize = 2 << 23;

/// Bytes per kilobyte for capacity arguments given in KiB.
pub const KILOBYTE: usize = 1024;

/// Prefix required on hexadecimal trace addresses.
pub const HEX_PREFIX: &str = "0x";
