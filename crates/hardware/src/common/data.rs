//! Memory Access Types.
//!
//! This module defines the classification of trace accesses. These types are used for:
//! 1. **Dispatch:** Selecting the load or store path in the cache engine.
//! 2. **Parsing:** Recognising operation keywords in trace input.
//! 3. **Reporting:** Printing the operation keyword at the start of each output line.

use std::fmt;
use std::str::FromStr;

/// Type of trace access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessType {
    /// Data read access.
    ///
    /// Looks up the set, promotes on hit, inserts on miss, and echoes the
    /// bytes held by the backing store.
    Load,

    /// Data write access.
    ///
    /// Observes the set without changing it and writes the payload into the
    /// backing store.
    Store,
}

impl AccessType {
    /// Returns the trace keyword for this access type.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Store => "store",
        }
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for AccessType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "load" => Ok(Self::Load),
            "store" => Ok(Self::Store),
            other => Err(format!("unsupported operation `{other}`")),
        }
    }
}
