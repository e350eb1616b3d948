//! Cache Set with LRU ordering.
//!
//! A set is a fixed-capacity slot table whose order is its recency: slot 0 is
//! the most recently used tag and slot `len - 1` the least recently used. It provides:
//! 1. **Lookup:** Linear scan over the occupied slots.
//! 2. **Promotion:** Moving a hit to the MRU position.
//! 3. **Insertion:** Placing a new tag at the MRU position, evicting the LRU tag if full.
//!
//! Occupancy is an explicit count; slots past it hold stale values and are never read.
//!
//! # Performance
//!
//! - **Time Complexity:** `lookup()`, `promote()` and `insert_at_front()` are O(W)
//!   where W is the associativity.
//! - **Space Complexity:** O(W) per set, allocated once.

/// One set of a set-associative cache.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheSet {
    /// Tag storage, `associativity` slots long. Index 0 is MRU.
    slots: Box<[u64]>,
    /// Number of leading slots holding live tags.
    occupied: usize,
}

impl CacheSet {
    /// Creates an empty set with room for `associativity` tags.
    ///
    /// `associativity` must be nonzero; [`CacheGeometry`](super::CacheGeometry)
    /// guarantees this for sets built by the engine.
    pub fn new(associativity: usize) -> Self {
        debug_assert!(associativity > 0, "a cache set needs at least one slot");
        Self {
            slots: vec![0; associativity].into_boxed_slice(),
            occupied: 0,
        }
    }

    /// Maximum number of tags this set can hold.
    pub const fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub const fn len(&self) -> usize {
        self.occupied
    }

    /// Returns `true` if no tag has been inserted yet.
    pub const fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    /// Returns `true` once every slot is occupied.
    pub const fn is_full(&self) -> bool {
        self.occupied == self.slots.len()
    }

    /// Resident tags in recency order, MRU first.
    pub fn tags(&self) -> &[u64] {
        &self.slots[..self.occupied]
    }

    /// Returns the position of `tag`, or `None` if it is not resident.
    #[inline]
    pub fn lookup(&self, tag: u64) -> Option<usize> {
        self.tags().iter().position(|&t| t == tag)
    }

    /// Moves the tag at `position` to the MRU slot.
    ///
    /// Tags ahead of it shift back by one. Position 0 and positions past the
    /// occupied range leave the set unchanged.
    pub fn promote(&mut self, position: usize) {
        if position == 0 || position >= self.occupied {
            return;
        }
        self.slots[..=position].rotate_right(1);
    }

    /// Inserts `tag` at the MRU slot and returns the evicted tag, if any.
    ///
    /// A full set drops its LRU tag first, so occupancy never exceeds the capacity.
    /// `tag` must not already be resident.
    pub fn insert_at_front(&mut self, tag: u64) -> Option<u64> {
        debug_assert!(self.lookup(tag).is_none(), "tag {tag:#x} already resident");

        let evicted = if self.is_full() {
            self.occupied -= 1;
            Some(self.slots[self.occupied])
        } else {
            None
        };

        self.slots.copy_within(..self.occupied, 1);
        self.slots[0] = tag;
        self.occupied += 1;
        evicted
    }
}
