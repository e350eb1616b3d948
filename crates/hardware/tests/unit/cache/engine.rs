//! Cache Engine Unit Tests.
//!
//! Verifies the load and store paths: hit/miss decisions, LRU promotion and
//! eviction on loads, the non-mutating store path, and that returned bytes come
//! from the backing store rather than the cache.
//!
//! The engine is built directly from a geometry; no trace parsing is involved.

use cachesim_core::SimError;
use cachesim_core::cache::{CacheEngine, CacheGeometry, Verdict};
use cachesim_core::common::AccessType;
use cachesim_core::memory::BackingStore;
use cachesim_core::trace::TraceEvent;

use crate::common::mocks::memory::sized_store;

// ──────────────────────────────────────────────────────────
// Helper: build a small test engine
// ──────────────────────────────────────────────────────────

/// 256 bytes, 2-way, 64-byte blocks: 2 sets.
///
/// Set index = (addr >> 6) & 1, stored tag = addr >> 6.
/// Addresses 0x000, 0x080 and 0x100 all map to set 0.
fn two_way_engine() -> CacheEngine {
    let geometry = CacheGeometry::new(256, 2, 64).unwrap();
    CacheEngine::with_memory_size(geometry, 4096)
}

/// 1 KiB, direct-mapped, 64-byte blocks.
fn direct_mapped_engine() -> CacheEngine {
    let geometry = CacheGeometry::new(1024, 1, 64).unwrap();
    CacheEngine::with_memory_size(geometry, 4096)
}

// ══════════════════════════════════════════════════════════
// 1. Load path
// ══════════════════════════════════════════════════════════

#[test]
fn cold_load_misses_then_hits() {
    let mut engine = two_way_engine();
    assert_eq!(engine.process_load(0x40, 4).unwrap().verdict, Verdict::Miss);
    assert_eq!(engine.process_load(0x40, 4).unwrap().verdict, Verdict::Hit);
}

#[test]
fn load_within_same_block_hits() {
    let mut engine = two_way_engine();
    let _ = engine.process_load(0x40, 1).unwrap();
    assert!(engine.process_load(0x7f, 1).unwrap().verdict.is_hit());
}

#[test]
fn load_miss_inserts_at_front() {
    let mut engine = two_way_engine();
    let _ = engine.process_load(0x000, 1).unwrap();
    let _ = engine.process_load(0x080, 1).unwrap();
    assert_eq!(engine.set(0).unwrap().tags(), &[0x080 >> 6, 0x000 >> 6]);
}

#[test]
fn load_hit_promotes_to_front() {
    let mut engine = two_way_engine();
    let _ = engine.process_load(0x000, 1).unwrap();
    let _ = engine.process_load(0x080, 1).unwrap();
    let _ = engine.process_load(0x000, 1).unwrap();
    assert_eq!(engine.set(0).unwrap().tags(), &[0x000 >> 6, 0x080 >> 6]);
}

#[test]
fn conflicting_load_evicts_lru_block() {
    let mut engine = two_way_engine();
    let _ = engine.process_load(0x000, 1).unwrap();
    let _ = engine.process_load(0x080, 1).unwrap();

    // Third block in set 0 evicts 0x000, the LRU.
    assert_eq!(engine.process_load(0x100, 1).unwrap().verdict, Verdict::Miss);
    assert_eq!(engine.set(0).unwrap().len(), 2);
    assert_eq!(engine.process_load(0x080, 1).unwrap().verdict, Verdict::Hit);
    assert_eq!(engine.process_load(0x000, 1).unwrap().verdict, Verdict::Miss);
}

#[test]
fn loads_in_other_sets_do_not_interfere() {
    let mut engine = two_way_engine();
    let _ = engine.process_load(0x000, 1).unwrap();
    let _ = engine.process_load(0x040, 1).unwrap();
    let _ = engine.process_load(0x0c0, 1).unwrap();
    let _ = engine.process_load(0x140, 1).unwrap();

    assert_eq!(engine.set(0).unwrap().len(), 1);
    assert_eq!(engine.set(1).unwrap().len(), 2);
    assert!(engine.process_load(0x000, 1).unwrap().verdict.is_hit());
}

#[test]
fn direct_mapped_conflict_replaces_block() {
    let mut engine = direct_mapped_engine();
    let _ = engine.process_load(0x000, 4).unwrap();
    // 1 KiB apart: same set, different block.
    assert_eq!(engine.process_load(0x400, 4).unwrap().verdict, Verdict::Miss);
    assert_eq!(engine.process_load(0x000, 4).unwrap().verdict, Verdict::Miss);
}

#[test]
fn load_returns_backing_store_bytes() {
    let mut engine = direct_mapped_engine();
    let outcome = engine.process_load(0x10, 3).unwrap();
    assert_eq!(outcome.kind, AccessType::Load);
    assert_eq!(outcome.data, vec![0, 0, 0]);
}

// ══════════════════════════════════════════════════════════
// 2. Store path
// ══════════════════════════════════════════════════════════

#[test]
fn store_miss_does_not_allocate() {
    let mut engine = direct_mapped_engine();
    let store = engine.process_store(0x0, &[0xde, 0xad, 0xbe, 0xef]).unwrap();
    assert_eq!(store.verdict, Verdict::Miss);
    assert!(store.data.is_empty());
    assert!(engine.set(0).unwrap().is_empty());

    let load = engine.process_load(0x0, 4).unwrap();
    assert_eq!(load.verdict, Verdict::Miss);
    assert_eq!(load.data, vec![0xde, 0xad, 0xbe, 0xef]);
}

#[test]
fn store_hit_does_not_promote() {
    let mut engine = two_way_engine();
    let _ = engine.process_load(0x000, 1).unwrap();
    let _ = engine.process_load(0x080, 1).unwrap();

    let store = engine.process_store(0x000, &[1]).unwrap();
    assert_eq!(store.verdict, Verdict::Hit);
    assert_eq!(engine.set(0).unwrap().tags(), &[0x080 >> 6, 0x000 >> 6]);

    // 0x000 is still LRU, so the next conflicting load evicts it.
    let _ = engine.process_load(0x100, 1).unwrap();
    assert_eq!(engine.process_load(0x000, 1).unwrap().verdict, Verdict::Miss);
}

#[test]
fn repeated_loads_return_stored_bytes() {
    let mut engine = direct_mapped_engine();
    let _ = engine.process_store(0x0, &[0xde, 0xad, 0xbe, 0xef]).unwrap();

    let first = engine.process_load(0x0, 4).unwrap();
    let second = engine.process_load(0x0, 4).unwrap();
    assert_eq!(first.verdict, Verdict::Miss);
    assert_eq!(second.verdict, Verdict::Hit);
    assert_eq!(first.data, vec![0xde, 0xad, 0xbe, 0xef]);
    assert_eq!(second.data, vec![0xde, 0xad, 0xbe, 0xef]);
}

#[test]
fn store_after_load_overwrites_memory_not_cache_state() {
    let mut engine = direct_mapped_engine();
    let _ = engine.process_load(0x20, 2).unwrap();
    let store = engine.process_store(0x20, &[0x12, 0x34]).unwrap();
    assert_eq!(store.verdict, Verdict::Hit);

    let load = engine.process_load(0x20, 2).unwrap();
    assert_eq!(load.verdict, Verdict::Hit);
    assert_eq!(load.data, vec![0x12, 0x34]);
}

// ══════════════════════════════════════════════════════════
// 3. Errors
// ══════════════════════════════════════════════════════════

#[test]
fn zero_size_load_is_invalid() {
    let mut engine = direct_mapped_engine();
    assert!(matches!(
        engine.process_load(0x0, 0),
        Err(SimError::InvalidTraceEvent { .. })
    ));
}

#[test]
fn empty_store_is_invalid() {
    let mut engine = direct_mapped_engine();
    assert!(matches!(
        engine.process_store(0x0, &[]),
        Err(SimError::InvalidTraceEvent { .. })
    ));
}

#[test]
fn out_of_range_load_leaves_cache_untouched() {
    let mut engine = direct_mapped_engine();
    let err = engine.process_load(4094, 4).unwrap_err();
    assert!(matches!(
        err,
        SimError::AddressOutOfRange {
            address: 4094,
            size: 4,
            memory_size: 4096
        }
    ));
    assert!((0..engine.num_sets()).all(|i| engine.set(i).unwrap().is_empty()));
}

#[test]
fn out_of_range_store_writes_nothing() {
    let mut engine = direct_mapped_engine();
    assert!(engine.process_store(4095, &[1, 2]).is_err());
    assert_eq!(engine.memory().read_bytes(4095, 1).unwrap(), vec![0]);
}

#[test]
fn process_dispatches_and_tags_errors_with_line() {
    let mut engine = direct_mapped_engine();
    let store = TraceEvent::store(0x8, vec![0xaa]).at_line(1);
    let load = TraceEvent::load(0x8, 1).at_line(2);
    assert_eq!(engine.process(&store).unwrap().to_string(), "store 0x8 miss");
    assert_eq!(engine.process(&load).unwrap().to_string(), "load 0x8 miss aa");

    let bad = TraceEvent::load(0x10_0000, 1).at_line(5);
    let err = engine.process(&bad).unwrap_err();
    assert!(matches!(err, SimError::AtLine { line: 5, .. }));
}

#[test]
fn process_rejects_payload_size_mismatch() {
    let mut engine = direct_mapped_engine();
    let mut event = TraceEvent::store(0x0, vec![1, 2]).at_line(4);
    event.size = 3;
    assert!(matches!(
        engine.process(&event),
        Err(SimError::InvalidTraceEvent { line: 4, .. })
    ));
}

// ══════════════════════════════════════════════════════════
// 4. Memory traffic (mock backing store)
// ══════════════════════════════════════════════════════════

#[test]
fn load_reads_exact_range_from_store() {
    let mut store = sized_store(4096);
    let _ = store
        .expect_read_bytes()
        .withf(|&address, &size| address == 0x44 && size == 3)
        .times(2)
        .returning(|_, size| Ok(vec![0x5a; size]));
    let _ = store.expect_write_bytes().never();

    let geometry = CacheGeometry::new(1024, 1, 64).unwrap();
    let mut engine = CacheEngine::new(geometry, store);
    let miss = engine.process_load(0x44, 3).unwrap();
    let hit = engine.process_load(0x44, 3).unwrap();

    assert_eq!(miss.to_string(), "load 0x44 miss 5a5a5a");
    assert_eq!(hit.to_string(), "load 0x44 hit 5a5a5a");
}

#[test]
fn store_writes_payload_and_never_reads() {
    let mut store = sized_store(4096);
    let _ = store.expect_read_bytes().never();
    let _ = store
        .expect_write_bytes()
        .withf(|&address, data| address == 0x100 && *data == [0xca, 0xfe])
        .times(1)
        .returning(|_, _| Ok(()));

    let geometry = CacheGeometry::new(1024, 1, 64).unwrap();
    let mut engine = CacheEngine::new(geometry, store);
    let outcome = engine.process_store(0x100, &[0xca, 0xfe]).unwrap();
    assert_eq!(outcome.to_string(), "store 0x100 miss");
}

#[test]
fn store_error_from_backing_store_propagates() {
    let mut store = sized_store(16);
    let _ = store.expect_write_bytes().returning(|address, data| {
        Err(SimError::AddressOutOfRange {
            address,
            size: data.len(),
            memory_size: 16,
        })
    });

    let geometry = CacheGeometry::new(1024, 1, 64).unwrap();
    let mut engine = CacheEngine::new(geometry, store);
    assert!(matches!(
        engine.process_store(0x20, &[1]),
        Err(SimError::AddressOutOfRange { address: 0x20, .. })
    ));
}
