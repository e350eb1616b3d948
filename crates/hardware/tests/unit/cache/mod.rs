//! Cache tests.



/// Load/store policies of the cache engine.
pub mod engine;
