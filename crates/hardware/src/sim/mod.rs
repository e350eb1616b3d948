//! Simulation driver and trace loading.
//!
//! Provides the `Simulator` that replays a trace through the cache engine and
//! the loader that opens trace files.

/// Trace file loading.
pub mod loader;

/// Trace replay driver.
pub mod simulator;

pub use simulator::Simulator;
