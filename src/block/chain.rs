//! The match chain store: a last-seen hash table plus two ring-indexed
//! distance tables that persist across blocks.
//!
//! Chains are logically linked lists of prior positions, but they are stored
//! as 16-bit deltas in fixed arrays indexed by `position mod 65536`.  No
//! per-node allocation, and the structure prunes itself as the window slides:
//! a slot overwritten by a newer position only ever shadowed data that had
//! already fallen out of the 64 KiB window.
//!
//! Two chains run in parallel:
//! - the *hash* chain links positions whose 4-byte keys share a hash bucket
//!   (collisions included), preserving time order;
//! - the *exact* chain links positions whose first four bytes are
//!   byte-identical, which is what the longest-match search actually walks.

use crate::block::types::{hash4, MAX_DISTANCE, NO_PREVIOUS, WINDOW_SIZE};

/// Sentinel for "this hash bucket has never been seen".
const NO_LAST_HASH: usize = usize::MAX;

/// Hash table plus dual distance rings.  One instance lives for the whole
/// stream; match references may legally span into the previous block.
pub struct ChainStore {
    /// Absolute input position of the most recent occurrence per hash bucket.
    last_hash: Vec<usize>,
    /// Delta to the previous same-hash position, per `pos mod 65536`.
    prev_hash: Vec<u16>,
    /// Delta to the previous position with identical first four bytes.
    prev_exact: Vec<u16>,
}

impl ChainStore {
    pub fn new() -> Self {
        ChainStore {
            last_hash: vec![NO_LAST_HASH; crate::block::types::HASH_SIZE],
            prev_hash: vec![NO_PREVIOUS; WINDOW_SIZE],
            prev_exact: vec![NO_PREVIOUS; WINDOW_SIZE],
        }
    }

    /// Record `pos` as the latest occurrence of the 4-byte key `four` and
    /// return the previous occurrence, if any was ever seen.
    #[inline]
    pub fn record_hash(&mut self, pos: usize, four: u32) -> Option<usize> {
        let h = hash4(four) as usize;
        let last = self.last_hash[h];
        self.last_hash[h] = pos;
        (last != NO_LAST_HASH).then_some(last)
    }

    /// Delta from `pos` to its previous same-hash position.
    #[inline]
    pub fn hash_delta(&self, pos: usize) -> u16 {
        self.prev_hash[pos % WINDOW_SIZE]
    }

    /// Delta from `pos` to its previous exact-prefix position.
    #[inline]
    pub fn exact_delta(&self, pos: usize) -> u16 {
        self.prev_exact[pos % WINDOW_SIZE]
    }

    /// Store the hash-chain delta for `pos` (`NO_PREVIOUS` to terminate).
    #[inline]
    pub fn set_hash_delta(&mut self, pos: usize, delta: u16) {
        debug_assert!(delta as usize <= MAX_DISTANCE);
        self.prev_hash[pos % WINDOW_SIZE] = delta;
    }

    /// Store the exact-chain delta for `pos` (`NO_PREVIOUS` to terminate).
    #[inline]
    pub fn set_exact_delta(&mut self, pos: usize, delta: u16) {
        debug_assert!(delta as usize <= MAX_DISTANCE);
        self.prev_exact[pos % WINDOW_SIZE] = delta;
    }
}

impl Default for ChainStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_hash_returns_previous_occurrence() {
        let mut store = ChainStore::new();
        let four = 0x6463_6261; // "abcd"
        assert_eq!(store.record_hash(100, four), None);
        assert_eq!(store.record_hash(200, four), Some(100));
        assert_eq!(store.record_hash(300, four), Some(200));
    }

    #[test]
    fn deltas_default_to_sentinel() {
        let store = ChainStore::new();
        assert_eq!(store.hash_delta(0), NO_PREVIOUS);
        assert_eq!(store.exact_delta(123_456), NO_PREVIOUS);
    }

    #[test]
    fn ring_slots_alias_at_window_size() {
        let mut store = ChainStore::new();
        store.set_exact_delta(5, 17);
        assert_eq!(store.exact_delta(5 + WINDOW_SIZE), 17);
        store.set_exact_delta(5 + WINDOW_SIZE, 42);
        assert_eq!(store.exact_delta(5), 42);
    }
}
