//! Set-Associative Cache Simulator.
//!
//! This module implements a trace-driven set-associative cache with LRU replacement
//! in front of a byte-addressable backing store. It models whether each access
//! hits or misses; the data returned always comes from the backing store.
//!
//! Loads and stores use different policies:
//! - **Load:** a hit promotes the block to MRU; a miss inserts it at MRU, evicting the LRU block of a full set.
//! - **Store:** the set is only observed. A hit is not promoted and a miss allocates nothing.

/// Validated cache dimensions.
pub mod geometry;

/// Per-set LRU slot table.
pub mod set;

use std::fmt;

use tracing::{debug, trace};

pub use self::geometry::CacheGeometry;
pub use self::set::CacheSet;
use crate::common::data::AccessType;
use crate::common::error::{SimError, SimResult};
use crate::memory::{BackingStore, MemoryBuffer};
use crate::trace::TraceEvent;

/// Hit or miss verdict for a single access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The block was resident.
    Hit,
    /// The block was not resident.
    Miss,
}

impl Verdict {
    /// Returns `true` for [`Verdict::Hit`].
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hit => "hit",
            Self::Miss => "miss",
        })
    }
}

/// Result of processing one access.
///
/// `Display` renders the trace output line:
/// `load 0x<address> <hit|miss> <bytes>` or `store 0x<address> <hit|miss>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessOutcome {
    /// Load or store.
    pub kind: AccessType,
    /// First byte accessed.
    pub address: u64,
    /// Hit or miss.
    pub verdict: Verdict,
    /// Bytes read from the backing store (empty for stores).
    pub data: Vec<u8>,
}

impl fmt::Display for AccessOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:#x} {}", self.kind, self.address, self.verdict)?;
        if self.kind == AccessType::Load {
            f.write_str(" ")?;
            for byte in &self.data {
                write!(f, "{byte:02x}")?;
            }
        }
        Ok(())
    }
}

/// Cache simulator: one [`CacheSet`] per set index plus the backing store.
///
/// Generic over the backing store so tests can observe memory traffic; the
/// default is an owned [`MemoryBuffer`].
#[derive(Debug)]
pub struct CacheEngine<M = MemoryBuffer> {
    geometry: CacheGeometry,
    sets: Vec<CacheSet>,
    memory: M,
}

impl<M: BackingStore> CacheEngine<M> {
    /// Creates an engine with every set empty.
    pub fn new(geometry: CacheGeometry, memory: M) -> Self {
        debug!(
            capacity = geometry.capacity_bytes(),
            ways = geometry.associativity(),
            block = geometry.block_size_bytes(),
            sets = geometry.num_sets(),
            memory = memory.size(),
            "cache engine initialised"
        );
        let sets = (0..geometry.num_sets())
            .map(|_| CacheSet::new(geometry.associativity()))
            .collect();
        Self {
            geometry,
            sets,
            memory,
        }
    }

    /// The geometry this engine was built with.
    pub const fn geometry(&self) -> &CacheGeometry {
        &self.geometry
    }

    /// Number of sets.
    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    /// Returns the set at `index`, if it exists.
    pub fn set(&self, index: usize) -> Option<&CacheSet> {
        self.sets.get(index)
    }

    /// The backing store.
    pub const fn memory(&self) -> &M {
        &self.memory
    }

    /// Consumes the engine and returns its backing store.
    pub fn into_memory(self) -> M {
        self.memory
    }

    /// Dispatches a trace event to the load or store path.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidTraceEvent`] for a zero size or a store whose
    /// payload length differs from its size, and [`SimError::AddressOutOfRange`]
    /// if the access leaves the backing store.
    pub fn process(&mut self, event: &TraceEvent) -> SimResult<AccessOutcome> {
        let outcome = match event.kind {
            AccessType::Load => self.process_load(event.address, event.size),
            AccessType::Store => {
                if event.data.len() != event.size {
                    return Err(SimError::trace(
                        event.line,
                        format!(
                            "store payload has {} bytes but size is {}",
                            event.data.len(),
                            event.size
                        ),
                    ));
                }
                self.process_store(event.address, &event.data)
            }
        };
        outcome.map_err(|e| e.at_line(event.line))
    }

    /// Processes a load of `size` bytes at `address`.
    ///
    /// A hit promotes the block to MRU; a miss inserts it at MRU, evicting the
    /// set's LRU block if it is full. The returned bytes come from the backing
    /// store either way.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidTraceEvent`] if `size` is zero and
    /// [`SimError::AddressOutOfRange`] if the range leaves the backing store.
    /// The cache state is untouched on error.
    pub fn process_load(&mut self, address: u64, size: usize) -> SimResult<AccessOutcome> {
        if size == 0 {
            return Err(SimError::trace(0, "access size must be positive"));
        }
        let data = self.memory.read_bytes(address, size)?;

        let decoded = self.geometry.decode(address);
        let set = &mut self.sets[decoded.set_index];
        let verdict = if let Some(position) = set.lookup(decoded.tag) {
            set.promote(position);
            Verdict::Hit
        } else {
            let evicted = set.insert_at_front(decoded.tag);
            trace!(set = decoded.set_index, evicted = ?evicted, "load allocated block");
            Verdict::Miss
        };
        trace!(
            op = "load",
            address,
            set = decoded.set_index,
            tag = decoded.tag,
            %verdict
        );

        Ok(AccessOutcome {
            kind: AccessType::Load,
            address,
            verdict,
            data,
        })
    }

    /// Processes a store of `data` at `address`.
    ///
    /// The set is only looked up: a hit is not promoted and a miss allocates
    /// nothing. `data` is written to the backing store.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidTraceEvent`] if `data` is empty and
    /// [`SimError::AddressOutOfRange`] if the range leaves the backing store,
    /// in which case nothing is written.
    pub fn process_store(&mut self, address: u64, data: &[u8]) -> SimResult<AccessOutcome> {
        if data.is_empty() {
            return Err(SimError::trace(0, "access size must be positive"));
        }
        let decoded = self.geometry.decode(address);
        let verdict = if self.sets[decoded.set_index].lookup(decoded.tag).is_some() {
            Verdict::Hit
        } else {
            Verdict::Miss
        };

        self.memory.write_bytes(address, data)?;
        trace!(
            op = "store",
            address,
            set = decoded.set_index,
            tag = decoded.tag,
            %verdict
        );

        Ok(AccessOutcome {
            kind: AccessType::Store,
            address,
            verdict,
            data: Vec::new(),
        })
    }
}

impl CacheEngine<MemoryBuffer> {
    /// Creates an engine over a fresh zeroed buffer of `memory_size` bytes.
    pub fn with_memory_size(geometry: CacheGeometry, memory_size: usize) -> Self {
        Self::new(geometry, MemoryBuffer::new(memory_size))
    }
}
