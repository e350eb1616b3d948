//! Trace Loader.
//!
//! Opens trace files from disk and wraps them in a buffered [`TraceReader`].

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::common::error::{SimError, SimResult};
use crate::trace::TraceReader;

/// Opens the trace at `path` for reading.
///
/// # Errors
///
/// Returns [`SimError::Io`] if the file cannot be opened.
pub fn open_trace(path: impl AsRef<Path>) -> SimResult<TraceReader<BufReader<File>>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(TraceReader::new(BufReader::new(file)).with_source(path))
}
