//! Trace-driven cache simulator library.
//!
//! This crate replays a trace of loads and stores against a set-associative
//! cache with LRU replacement and reports, per access, whether the block was
//! resident. It is organised as follows:
//! 1. **Cache:** Geometry validation, per-set LRU tables, and the load/store engine.
//! 2. **Memory:** The backing store that always holds the real bytes.
//! 3. **Trace:** Parsing of `load`/`store` trace events.
//! 4. **Simulation:** Trace loading, configuration, and the replay driver.
//!
//! ```
//! use cachesim_core::cache::{CacheEngine, CacheGeometry};
//!
//! let geometry = CacheGeometry::new(1024, 1, 64).unwrap();
//! let mut engine = CacheEngine::with_memory_size(geometry, 4096);
//!
//! let store = engine.process_store(0x0, &[0xde, 0xad, 0xbe, 0xef]).unwrap();
//! let load = engine.process_load(0x0, 4).unwrap();
//! assert_eq!(store.to_string(), "store 0x0 miss");
//! assert_eq!(load.to_string(), "load 0x0 miss deadbeef");
//! ```

/// Set-associative cache engine (geometry, sets, load/store paths).
pub mod cache;
/// Common types and constants (address decoding, access types, errors).
pub mod common;
/// Simulator configuration (defaults and JSON loading).
pub mod config;
/// Backing store trait and owned memory buffer.
pub mod memory;
/// Trace loading and the replay driver.
pub mod sim;
/// Trace events and parsing.
pub mod trace;

/// Cache engine; construct from a validated `CacheGeometry`.
pub use crate::cache::{CacheEngine, CacheGeometry};
/// Fatal error type and result alias.
pub use crate::common::{SimError, SimResult};
/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// Trace replay driver.
pub use crate::sim::Simulator;
