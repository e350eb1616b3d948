//! Simulator: drives the cache engine over a trace.
//!
//! Events are processed strictly in order, one at a time; each one's LRU effect
//! depends on every access before it. One output line is written per event.
//! The first fatal error stops the run before anything is written for the
//! failing event.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tracing::{debug, info};

use crate::cache::{AccessOutcome, CacheEngine, CacheGeometry};
use crate::common::error::{SimError, SimResult};
use crate::config::Config;
use crate::memory::{BackingStore, MemoryBuffer};
use crate::trace::{TraceEvent, TraceReader};

/// Top-level simulator: owns the cache engine for the length of one trace.
#[derive(Debug)]
pub struct Simulator<M = MemoryBuffer> {
    engine: CacheEngine<M>,
}

impl Simulator<MemoryBuffer> {
    /// Builds a simulator from configuration: validated geometry plus a zeroed backing store.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidGeometry`] if the cache configuration is not usable.
    pub fn new(config: &Config) -> SimResult<Self> {
        let geometry = CacheGeometry::from_config(&config.cache)?;
        Ok(Self::with_engine(CacheEngine::with_memory_size(
            geometry,
            config.memory.size_bytes,
        )))
    }
}

impl<M: BackingStore> Simulator<M> {
    /// Wraps an existing engine.
    pub const fn with_engine(engine: CacheEngine<M>) -> Self {
        Self { engine }
    }

    /// The cache engine.
    pub const fn engine(&self) -> &CacheEngine<M> {
        &self.engine
    }

    /// Processes a single event.
    ///
    /// # Errors
    ///
    /// Propagates engine errors annotated with the event's trace line.
    pub fn step(&mut self, event: &TraceEvent) -> SimResult<AccessOutcome> {
        self.engine.process(event)
    }

    /// Replays every event from `trace`, writing one output line per event to `out`.
    ///
    /// Returns the number of events processed. Output written before a failure
    /// is flushed before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns the first trace, engine or output error encountered.
    pub fn run<R, W>(&mut self, trace: TraceReader<R>, out: &mut W) -> SimResult<usize>
    where
        R: BufRead,
        W: Write,
    {
        let mut processed = 0;
        let result = self.replay(trace, out, &mut processed);
        let flushed = out.flush().map_err(output_error);

        if let Err(e) = &result {
            debug!(processed, "simulation stopped: {e}");
        } else {
            info!(processed, "trace complete");
        }
        result.and(flushed).map(|()| processed)
    }

    fn replay<R, W>(
        &mut self,
        trace: TraceReader<R>,
        out: &mut W,
        processed: &mut usize,
    ) -> SimResult<()>
    where
        R: BufRead,
        W: Write,
    {
        for event in trace {
            let outcome = self.step(&event?)?;
            writeln!(out, "{outcome}").map_err(output_error)?;
            *processed += 1;
        }
        Ok(())
    }

    /// Consumes the simulator and returns its engine.
    pub fn into_engine(self) -> CacheEngine<M> {
        self.engine
    }
}

fn output_error(source: io::Error) -> SimError {
    SimError::Io {
        path: PathBuf::from("<output>"),
        source,
    }
}
