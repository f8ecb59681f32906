//! The compression driver: reads the source into a sliding buffer, runs the
//! block pipeline (chain maintenance → match finding → cost optimization →
//! token serialization), frames each block, and trims the buffer to the
//! trailing 64 KiB so cross-block back-references keep working.
//!
//! The core is a pure function over its two streams plus the chain-length
//! parameter; it owns every other resource it touches.

use std::io::{self, Read, Write};

use crate::block::chain::ChainStore;
use crate::block::encode::serialize_matches;
use crate::block::finder::{find_longest_match, link_position};
use crate::block::optimal::estimate_costs;
use crate::block::types::{
    Match, BLOCK_END_LITERALS, BLOCK_END_NO_MATCH, MAX_BLOCK_SIZE, MAX_DISTANCE, MAX_SAME_LETTER,
    WINDOW_SIZE,
};
use crate::config::{READ_BUFFER_SIZE, SHORT_CHAINS_GREEDY, SHORT_CHAINS_LAZY};
use crate::frame::{write_frame_header, BLOCK_UNCOMPRESSED};

/// Compress everything in `src` into an LZ4 frame on `dst`.
///
/// `max_chain_length` selects the effort: `0` stores blocks uncompressed,
/// `1..=3` parse greedily, `4..=6` lazily, anything above runs the optimal
/// parse over every position.
pub fn compress_frame<R: Read, W: Write>(
    src: &mut R,
    dst: &mut W,
    max_chain_length: u32,
) -> io::Result<()> {
    compress_frame_with_dict(src, dst, max_chain_length, &[])
}

/// Like [`compress_frame`], seeding the 64 KiB window with `dictionary`
/// before the first block.  Only the most recent 65536 dictionary bytes are
/// used; shorter dictionaries are front-padded with never-hashed zeros so
/// the first block always starts at a window boundary.
pub fn compress_frame_with_dict<R: Read, W: Write>(
    src: &mut R,
    dst: &mut W,
    max_chain_length: u32,
    dictionary: &[u8],
) -> io::Result<()> {
    write_frame_header(dst)?;

    // Sliding input buffer; `data_zero` is the absolute input position of
    // data[0], so absolute position p lives at data[p - data_zero].
    let mut data: Vec<u8> = Vec::new();
    let mut data_zero = 0usize;
    let mut num_read = 0usize;

    // -0: wrap the input in frame format without compressing.
    let uncompressed = max_chain_length == 0;

    let mut store = ChainStore::new();
    let mut buffer = vec![0u8; READ_BUFFER_SIZE];

    let mut next_block = 0usize;
    let mut parse_dictionary = !dictionary.is_empty();

    loop {
        // ── Start a new block ────────────────────────────────────────────
        if parse_dictionary {
            if dictionary.len() < WINDOW_SIZE {
                data.resize(WINDOW_SIZE - dictionary.len(), 0);
                data.extend_from_slice(dictionary);
            } else {
                data.extend_from_slice(&dictionary[dictionary.len() - WINDOW_SIZE..]);
            }
            next_block = data.len();
            num_read = data.len();
        }

        // Refill until a whole block is buffered or the source is drained.
        while num_read - next_block < MAX_BLOCK_SIZE {
            let incoming = src.read(&mut buffer)?;
            if incoming == 0 {
                break;
            }
            num_read += incoming;
            data.extend_from_slice(&buffer[..incoming]);
        }

        if next_block == num_read {
            break;
        }

        let last_block = next_block;
        next_block = (last_block + MAX_BLOCK_SIZE).min(num_read);
        let block_size = next_block - last_block;

        // ── Match finder pass ────────────────────────────────────────────
        let is_greedy = max_chain_length <= SHORT_CHAINS_GREEDY;
        let is_lazy = !is_greedy && max_chain_length <= SHORT_CHAINS_LAZY;
        // Positions still covered by the previous match (greedy/lazy only).
        let mut skip_matches = 0usize;
        // One extra probe allowed right after a match (lazy only).
        let mut lazy_evaluation = false;

        // The trailing positions of the previous block skipped the chain
        // update (no match may start there), so revisit them now; with a
        // dictionary, the whole seed buffer needs linking.
        let lookback = if parse_dictionary {
            dictionary.len().min(last_block - data_zero)
        } else {
            BLOCK_END_NO_MATCH.min(last_block - data_zero)
        };

        let mut matches = vec![Match::literal(); block_size];
        for pos in (last_block - lookback)..next_block {
            // No match may start in the last 12 bytes of the block.
            if pos + BLOCK_END_NO_MATCH > next_block || uncompressed {
                continue;
            }

            // Inside a long single-byte run, inherit the predecessor's match
            // with the length decremented — no chain update, no search.
            if pos > last_block {
                let cur = pos - data_zero;
                if data[cur] == data[cur - 1] {
                    let prev = matches[pos - 1 - last_block];
                    if prev.distance == 1 && prev.length > MAX_SAME_LETTER {
                        matches[pos - last_block] = Match {
                            distance: 1,
                            length: prev.length - 1,
                        };
                        continue;
                    }
                }
            }

            if !link_position(&mut store, &data, data_zero, pos) {
                continue;
            }

            // Lookback positions only feed the tables; no decisions for them.
            if pos < last_block {
                continue;
            }

            if skip_matches > 0 {
                skip_matches -= 1;
                if !lazy_evaluation {
                    continue;
                }
                lazy_evaluation = false;
            }

            let longest = find_longest_match(
                &store,
                &data,
                pos,
                data_zero,
                next_block - BLOCK_END_LITERALS,
                max_chain_length,
            );
            matches[pos - last_block] = longest;

            if longest.is_match() && (is_lazy || is_greedy) {
                lazy_evaluation = skip_matches == 0;
                // The match covers length - 1 further positions; the lazy
                // probe spends the first of them.
                skip_matches = longest.length as usize - 1;
            }
        }

        // The seed buffer applies to the first block only.
        parse_dictionary = false;

        // ── Optimal parse ────────────────────────────────────────────────
        if matches.len() > BLOCK_END_NO_MATCH && max_chain_length > SHORT_CHAINS_GREEDY {
            estimate_costs(&mut matches);
        }

        // ── Serialize and emit ───────────────────────────────────────────
        let block_bytes = last_block - data_zero..next_block - data_zero;
        let block = if uncompressed {
            Vec::new()
        } else {
            serialize_matches(&matches, &data[block_bytes.clone()])
        };

        // Fall back to the raw bytes whenever encoding did not help.
        let use_compression = !uncompressed && block.len() < block_size;
        let payload: &[u8] = if use_compression {
            &block
        } else {
            &data[block_bytes]
        };
        let tagged =
            payload.len() as u32 | if use_compression { 0 } else { BLOCK_UNCOMPRESSED };
        dst.write_all(&tagged.to_le_bytes())?;
        dst.write_all(payload)?;

        // ── Trim: keep only the reachable 64 KiB window ──────────────────
        if data.len() > MAX_DISTANCE {
            let remove = data.len() - MAX_DISTANCE;
            data_zero += remove;
            data.drain(..remove);
        }
    }

    // End-of-stream marker.
    dst.write_all(&0u32.to_le_bytes())
}
