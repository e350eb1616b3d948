//! Common utilities and types used throughout the cache simulator.
//!
//! This module provides the building blocks shared by the cache, memory and trace
//! modules. It includes:
//! 1. **Address Decoding:** Splitting addresses into tag, set index and block offset.
//! 2. **Constants:** Associativity bound and memory defaults.
//! 3. **Access Types:** Load and store classification.
//! 4. **Error Handling:** The fatal error taxonomy and result alias.

/// Address decomposition (tag, set index, block offset).
pub mod addr;

/// Common constants used throughout the simulator.
pub mod constants;

/// Access type definitions.
pub mod data;

/// Error types.
pub mod error;

pub use addr::{DecodedAddress, decode};
pub use constants::{DEFAULT_MEMORY_SIZE, MAX_ASSOC};
pub use data::AccessType;
pub use error::{SimError, SimResult};
