//! Token serializer: turn a decided parse into LZ4 block bytes.
//!
//! Each emitted record is `token | extended literal length | literals |
//! distance (LE) | extended match length`.  Length fields at or above 15
//! spill into 255-escaped extension bytes.  The final record of a block
//! carries only literals: its match nibble is zero and no distance follows.

use crate::block::types::{Match, MIN_MATCH};

/// Serialize the per-position decisions in `matches` against the block's
/// bytes.  Positions covered by an emitted match are skipped; literal
/// positions accumulate into the run flushed by the next match (or by the
/// final record).
pub fn serialize_matches(matches: &[Match], block: &[u8]) -> Vec<u8> {
    debug_assert_eq!(matches.len(), block.len());

    let mut out = Vec::with_capacity(block.len() / 2);

    // Current literal run, [from, to).
    let mut literals_from = 0usize;
    let mut literals_to = 0usize;

    let mut offset = 0usize;
    while offset < matches.len() {
        let mut m = matches[offset];

        if !m.is_match() {
            if literals_from == literals_to {
                literals_from = offset;
                literals_to = offset;
            }
            literals_to += 1;
            m.length = 1;
        }

        offset += m.length as usize;
        let last_token = offset == matches.len();
        debug_assert!(!(last_token && m.is_match()), "block must end in literals");

        if !m.is_match() && !last_token {
            continue;
        }

        // ── Token byte ───────────────────────────────────────────────────
        let num_literals = literals_to - literals_from;
        let mut token = (num_literals.min(15) as u8) << 4;
        if !last_token {
            token |= (m.length as usize - MIN_MATCH).min(15) as u8;
        }
        out.push(token);

        // ── Extended literal length ──────────────────────────────────────
        if num_literals >= 15 {
            let mut rest = num_literals - 15;
            while rest >= 255 {
                out.push(255);
                rest -= 255;
            }
            out.push(rest as u8);
        }

        // ── Literal payload ──────────────────────────────────────────────
        if literals_from != literals_to {
            out.extend_from_slice(&block[literals_from..literals_to]);
            literals_from = 0;
            literals_to = 0;
        }

        if last_token {
            break;
        }

        // ── Distance, little-endian ──────────────────────────────────────
        out.push((m.distance & 0xFF) as u8);
        out.push((m.distance >> 8) as u8);

        // ── Extended match length ────────────────────────────────────────
        let match_length = m.length as usize - MIN_MATCH;
        if match_length >= 15 {
            let mut rest = match_length - 15;
            while rest >= 255 {
                out.push(255);
                rest -= 255;
            }
            out.push(rest as u8);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::types::NO_PREVIOUS;

    fn lit(n: usize) -> Vec<Match> {
        vec![Match { length: 1, distance: NO_PREVIOUS }; n]
    }

    #[test]
    fn literal_only_block() {
        let block = b"hello";
        let out = serialize_matches(&lit(5), block);
        // token: 5 literals, no match nibble; then the bytes.
        assert_eq!(out, vec![0x50, b'h', b'e', b'l', b'l', b'o']);
    }

    #[test]
    fn fifteen_literals_take_an_extension_byte() {
        let block = [b'x'; 15];
        let out = serialize_matches(&lit(15), &block);
        assert_eq!(out[0], 0xF0);
        assert_eq!(out[1], 0); // 15 - 15 == 0 remainder byte is mandatory
        assert_eq!(&out[2..], &block[..]);
    }

    #[test]
    fn long_literal_run_escapes_with_255() {
        let n = 15 + 255 + 10;
        let block = vec![b'y'; n];
        let out = serialize_matches(&lit(n), &block);
        assert_eq!(&out[..3], &[0xF0, 255, 10]);
        assert_eq!(out.len(), 3 + n);
    }

    #[test]
    fn match_record_layout() {
        // "abcdabcd" + 5 trailing literals: literal run of 4, match len 4
        // dist 4, then the final literal-only record.
        let block = b"abcdabcdzyxwv";
        let mut matches = lit(13);
        matches[4] = Match { length: 4, distance: 4 };
        let out = serialize_matches(&matches, block);
        assert_eq!(
            out,
            vec![
                0x40, b'a', b'b', b'c', b'd', // 4 literals, match nibble 0 (len 4)
                0x04, 0x00, // distance 4, little-endian
                0x50, b'z', b'y', b'x', b'w', b'v', // final record: literals only
            ]
        );
    }

    #[test]
    fn long_match_length_escapes() {
        // Match of length 19 + 255 + 4 = 278 → nibble 15, ext bytes 255, 4.
        let len = 278usize;
        let total = 4 + len + 5;
        let mut block = vec![b'a'; total];
        block[0] = b'q'; // any bytes; serializer copies literals verbatim
        let mut matches = lit(total);
        matches[4] = Match { length: len as u32, distance: 1 };
        let out = serialize_matches(&matches, &block);
        assert_eq!(out[0], 0x4F); // 4 literals, match nibble 15
        assert_eq!(&out[5..7], &[0x01, 0x00]); // distance 1
        assert_eq!(&out[7..9], &[255, 4]); // (278 - 4 - 15) = 259 = 255 + 4
    }

    #[test]
    fn final_record_has_zero_match_nibble() {
        let block = b"0123456789abc";
        let out = serialize_matches(&lit(13), block);
        assert_eq!(out[0] & 0x0F, 0);
    }
}
