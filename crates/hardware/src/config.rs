//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structures used to parameterize a run.
//! It provides:
//! 1. **Defaults:** Baseline cache geometry and backing store size.
//! 2. **Structures:** Root config with cache and memory sections.
//! 3. **Loading:** JSON deserialization from strings or files.
//!
//! The CLI builds a `Config` from its positional arguments, optionally starting
//! from a JSON file supplied with `--config`.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::constants::{DEFAULT_MEMORY_SIZE, KILOBYTE};
use crate::common::error::{SimError, SimResult};

/// Default configuration constants for the simulator.
mod defaults {
    /// Default cache capacity in KiB.
    pub const CACHE_SIZE_KB: usize = 4;

    /// Default cache block size in bytes.
    pub const CACHE_LINE: usize = 64;

    /// Default cache associativity (1 way = direct-mapped).
    pub const CACHE_WAYS: usize = 1;

    /// Default backing store size in bytes.
    pub const MEMORY_SIZE: usize = super::DEFAULT_MEMORY_SIZE;
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.cache.size_kb, 4);
/// assert_eq!(config.memory.size_bytes, 16 * 1024 * 1024);
/// ```
///
/// Deserializing from JSON; missing fields fall back to their defaults:
///
/// ```
/// use cachesim_core::config::Config;
///
/// let json = r#"{ "cache": { "size_kb": 16, "ways": 4, "line_bytes": 32 } }"#;
/// let config = Config::from_json_str(json).unwrap();
/// assert_eq!(config.cache.ways, 4);
/// assert_eq!(config.memory.size_bytes, 16 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Cache geometry.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Backing store settings.
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] if the document is not valid configuration JSON.
    pub fn from_json_str(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] if the file cannot be read and
    /// [`SimError::Config`] if its contents do not parse.
    pub fn from_json_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}

/// Cache geometry as supplied by the user.
///
/// Values are not validated here; see [`CacheGeometry`](crate::cache::CacheGeometry).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Total cache capacity in KiB
    #[serde(default = "CacheConfig::default_size_kb")]
    pub size_kb: usize,

    /// Associativity (slots per set)
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Block size in bytes
    #[serde(default = "CacheConfig::default_line")]
    pub line_bytes: usize,
}

impl CacheConfig {
    /// Returns the default cache capacity in KiB.
    const fn default_size_kb() -> usize {
        defaults::CACHE_SIZE_KB
    }

    /// Returns the default cache associativity.
    const fn default_ways() -> usize {
        defaults::CACHE_WAYS
    }

    /// Returns the default block size in bytes.
    const fn default_line() -> usize {
        defaults::CACHE_LINE
    }

    /// Total capacity in bytes, or `None` if it overflows `usize`.
    pub const fn size_bytes(&self) -> Option<usize> {
        self.size_kb.checked_mul(KILOBYTE)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            size_kb: defaults::CACHE_SIZE_KB,
            ways: defaults::CACHE_WAYS,
            line_bytes: defaults::CACHE_LINE,
        }
    }
}

/// Backing store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemoryConfig {
    /// Backing store size in bytes; every trace access must fall inside it
    #[serde(default = "MemoryConfig::default_size")]
    pub size_bytes: usize,
}

impl MemoryConfig {
    /// Returns the default backing store size in bytes.
    const fn default_size() -> usize {
        defaults::MEMORY_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size_bytes: defaults::MEMORY_SIZE,
        }
    }
}
