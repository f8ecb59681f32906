//! Match finding: chain maintenance at every processed position, and the
//! step-limited longest-match search over the exact chain.
//!
//! [`link_position`] performs the hash-to-exact conversion: starting from the
//! newest same-hash predecessor it skips collisions (pruning stale links on
//! the way) until it lands on a position whose first four bytes are
//! byte-identical, then records the cumulative distance in the exact chain.
//!
//! [`find_longest_match`] walks the exact chain.  Each candidate is screened
//! with a two-phase comparison: first a backward scan over the bytes that a
//! longer-than-best match would have to share, then — only when that
//! succeeds — a forward scan for the actual length.  Most candidates fail
//! the backward phase within a few 4-byte compares.

use crate::block::chain::ChainStore;
use crate::block::types::{hash4, read_u32_le, Match, MAX_DISTANCE, NO_PREVIOUS};

/// Insert `pos` into the chain store: record its hash-table occurrence,
/// its hash-chain delta, and — via the hash-to-exact conversion — its
/// exact-chain delta.
///
/// `data_zero` is the absolute input position of `data[0]`; `pos` is
/// absolute.  Returns `true` when an exact predecessor exists within the
/// 64 KiB window, i.e. when a match search at `pos` can possibly succeed.
pub fn link_position(store: &mut ChainStore, data: &[u8], data_zero: usize, pos: usize) -> bool {
    let four = read_u32_le(data, pos - data_zero);
    let hash = hash4(four);

    let last = store.record_hash(pos, four);

    // No predecessor, or the newest one already out of range?
    let Some(mut last) = last.filter(|&l| pos - l <= MAX_DISTANCE) else {
        store.set_hash_delta(pos, NO_PREVIOUS);
        store.set_exact_delta(pos, NO_PREVIOUS);
        return false;
    };

    let mut distance = pos - last;
    store.set_hash_delta(pos, distance as u16);

    // Skip pseudo-matches (hash collisions) along the hash chain until the
    // first four bytes match exactly.
    loop {
        let cur_four = read_u32_le(data, last - data_zero);
        if cur_four == four {
            break;
        }

        // A different hash means we hopped onto an outdated chain.
        if hash4(cur_four) != hash {
            distance = 0;
            break;
        }

        let next = store.hash_delta(last) as usize;
        distance += next;
        if distance > MAX_DISTANCE {
            // Prune the stale link so later walks stop here immediately.
            store.set_hash_delta(last, NO_PREVIOUS);
            distance = 0;
            break;
        }

        if next == 0 || last < data_zero + next {
            distance = 0;
            break;
        }
        last -= next;
    }

    store.set_exact_delta(pos, distance as u16);
    distance != 0
}

/// Find the longest match for the absolute position `pos`, walking the exact
/// chain for at most `max_chain_length` candidates.
///
/// `end` is the absolute position one past the last byte a match may cover
/// (the caller passes `nextBlock - 5`, keeping the final five block bytes as
/// literals).  Returns a literal decision when nothing of length ≥ 4 exists
/// within the window; the returned length can also be 2 or 3, which callers
/// treat as a literal as well.
pub fn find_longest_match(
    store: &ChainStore,
    data: &[u8],
    pos: usize,
    data_zero: usize,
    end: usize,
    max_chain_length: u32,
) -> Match {
    debug_assert!(pos >= data_zero && pos < end);

    let mut result = Match::literal();
    let mut steps_left = max_chain_length as i64;

    // Buffer index of the matched position, and of the first unmatchable byte.
    let cur = pos - data_zero;
    let stop = cur + (end - pos);

    let mut distance = store.exact_delta(pos) as usize;
    let mut total_distance = 0usize;
    while distance != 0 {
        total_distance += distance;
        if total_distance > MAX_DISTANCE {
            break;
        }

        // Next candidate for the following iteration.
        distance = store.exact_delta(pos - total_distance) as usize;

        if steps_left <= 0 {
            break;
        }
        steps_left -= 1;

        // First byte a longer-than-best match has to reach.
        let at_least = cur + result.length as usize + 1;
        if at_least > stop {
            break;
        }

        // Phase 1: walk backward from at_least toward cur in 4-byte chunks;
        // any mismatch disqualifies the candidate outright.  The bytes below
        // cur + 4 are identical by exact-chain construction, so a few double
        // compares near cur are cheaper than guarding against them.
        let mut ok = true;
        let mut back = at_least as isize - 4;
        while back > cur as isize {
            let b = back as usize;
            if read_u32_le(data, b) != read_u32_le(data, b - total_distance) {
                ok = false;
                break;
            }
            back -= 4;
        }
        if !ok {
            continue;
        }

        // Phase 2: the candidate matches everything up to at_least; scan
        // forward for the real length, 4 bytes at a time then byte-wise.
        let mut fwd = at_least;
        while fwd + 4 <= stop && read_u32_le(data, fwd) == read_u32_le(data, fwd - total_distance) {
            fwd += 4;
        }
        while fwd < stop && data[fwd] == data[fwd - total_distance] {
            fwd += 1;
        }

        result = Match {
            distance: total_distance as u16,
            length: (fwd - cur) as u32,
        };
    }

    result
}
