//! Byte-compatibility against the `lz4_flex` reference implementation.
//!
//! Every compressed block payload this crate emits must be accepted by an
//! independent LZ4 decoder and reproduce the original bytes.  Single-block
//! frames are used so block payloads decode without external history; the
//! frame-level check additionally runs our output through the reference
//! frame decoder (header parsing, size words, terminator).

use std::io::Read;

use lz4opt::compress_frame;

const HEADER_LEN: usize = 7;

fn compress(input: &[u8], level: u32) -> Vec<u8> {
    let mut src = input;
    let mut out = Vec::new();
    compress_frame(&mut src, &mut out, level).unwrap();
    out
}

/// Extract the first block of a single-block frame.
fn first_block(frame: &[u8]) -> (bool, &[u8]) {
    let word = u32::from_le_bytes(frame[HEADER_LEN..HEADER_LEN + 4].try_into().unwrap());
    let size = (word & 0x7FFF_FFFF) as usize;
    let payload = &frame[HEADER_LEN + 4..HEADER_LEN + 4 + size];
    (word & 0x8000_0000 == 0, payload)
}

fn lorem(len: usize) -> Vec<u8> {
    b"Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do \
      eiusmod tempor incididunt ut labore et dolore magna aliqua. "
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Block-level parity
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn reference_decoder_accepts_level9_blocks() {
    let lorem_text = lorem(10_000);
    let run = vec![b'a'; 65_536];
    for input in [&b"abcdabcdabcdabcd"[..], &lorem_text[..], &run[..]] {
        let frame = compress(input, 65_535);
        let (compressed, payload) = first_block(&frame);
        assert!(compressed, "these inputs must all compress");
        let decoded = lz4_flex::block::decompress(payload, input.len()).unwrap();
        assert_eq!(decoded, input);
    }
}

#[test]
fn reference_decoder_accepts_greedy_and_lazy_blocks() {
    let input = lorem(30_000);
    for level in [1u32, 2, 3, 4, 5, 6, 7, 8] {
        let frame = compress(&input, level);
        let (compressed, payload) = first_block(&frame);
        assert!(compressed, "level {}", level);
        let decoded = lz4_flex::block::decompress(payload, input.len()).unwrap();
        assert_eq!(decoded, input, "level {}", level);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Frame-level parity
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn reference_frame_decoder_reads_whole_frames() {
    for (input, level) in [
        (lorem(50_000), 65_535u32),
        (lorem(123), 9),
        (Vec::new(), 9),
        (vec![b'a'; 65_536], 9),
    ] {
        let frame = compress(&input, level);
        let mut decoder = lz4_flex::frame::FrameDecoder::new(&frame[..]);
        let mut decoded = Vec::new();
        decoder.read_to_end(&mut decoded).unwrap();
        assert_eq!(decoded, input);
    }
}
