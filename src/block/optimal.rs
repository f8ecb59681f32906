//! Backwards optimal parse: walk the candidate vector right-to-left and
//! replace each position's match with the length (possibly 1 == literal)
//! that minimises the byte cost of encoding the rest of the block.
//!
//! `cost[i]` is the number of output bytes needed for input positions
//! `[i, blockEnd)`.  Literal runs are charged their 255-escape extension
//! bytes exactly when one more literal would add such a byte; match costs
//! are token + 2-byte distance plus the escape bytes of long lengths.

use crate::block::types::{
    Match, BLOCK_END_LITERALS, MAX_SAME_LETTER, MIN_MATCH, NO_PREVIOUS,
};

/// Byte cost from a block position to the end of the block.
type Cost = u32;

/// Rewrite `matches` into the cheapest parse and return the cost vector.
///
/// On entry, `matches[i]` holds the longest match found at `i` (or a
/// literal).  On exit it holds the decision the serializer should follow:
/// matches may have been shortened, or demoted to literals, wherever that
/// lowers the total encoded size.
///
/// The caller runs this only for blocks longer than 12 bytes and when
/// parsing effort is above greedy.
pub fn estimate_costs(matches: &mut [Match]) -> Vec<Cost> {
    let block_end = matches.len();
    let mut cost: Vec<Cost> = vec![0; block_end];

    // Index of the closest match-start to the right of i; everything between
    // is a literal run whose length decides extension-byte charges.
    let mut pos_last_match = block_end;

    // The last 5 positions stay literals, their cost stays 0.
    for i in (0..block_end - BLOCK_END_LITERALS).rev() {
        let num_literals = (pos_last_match - i) as u32;
        // Assume a literal at i.
        let mut min_cost = cost[i + 1] + 1;
        // One extra byte for every 255 literals beyond the first 14.
        if num_literals >= 15 && (num_literals - 15) % 255 == 0 {
            min_cost += 1;
        }
        let mut best_length: u32 = 1;

        let mut m = matches[i];

        // A match must not run into the trailing literal region.
        if m.is_match() && i + m.length as usize + BLOCK_END_LITERALS > block_end {
            m.length = (block_end - (i + BLOCK_END_LITERALS)) as u32;
        }

        let mut length = MIN_MATCH as u32;
        while length <= m.length {
            // Token byte + 2 distance bytes.
            let mut current_cost = cost[i + length as usize] + 1 + 2;
            // Long matches pay escape bytes for their length field.
            if length >= 19 {
                current_cost += 1 + (length - 19) / 255;
            }

            // `<=` deliberately prefers the longer match on equal cost: the
            // literal-extension charge above only sees literals to the right
            // of i, so an equal-cost match must win to break literal runs
            // whose extension byte was paid further left.
            if current_cost <= min_cost {
                min_cost = current_cost;
                best_length = length;
            }

            // Long self-referential runs: take the full length at once
            // instead of iterating tens of thousands of candidate lengths.
            if m.distance == 1 && m.length >= MAX_SAME_LETTER {
                best_length = m.length;
                min_cost = cost[i + m.length as usize] + 1 + 2 + 1 + (m.length - 19) / 255;
                break;
            }

            length += 1;
        }

        if best_length >= MIN_MATCH as u32 {
            pos_last_match = i;
        }

        cost[i] = min_cost;
        matches[i].length = best_length;
        if best_length == 1 {
            matches[i].distance = NO_PREVIOUS;
        }
    }

    cost
}
