//! LZ4 frame format: magic number, frame descriptor, block framing.
//!
//! The compressor always emits the same 7-byte header: magic, flag byte
//! `0x40` (format version 1, linked blocks, no checksums or content size),
//! block-max-size byte `0x70` (id 7 = 4 MiB), and the descriptor checksum.
//! Every block is framed by a 4-byte little-endian size word whose high bit
//! marks an uncompressed payload; a 4-byte zero word ends the stream.

use std::io::{self, Write};

use xxhash_rust::xxh32::xxh32;

pub mod compress;
pub mod decompress;

/// Frame magic number, serialized little-endian as `04 22 4D 18`.
pub const FRAME_MAGIC: u32 = 0x184D_2204;

/// Magic number of the deprecated legacy frame format.  Recognised only to
/// be rejected with a precise error.
pub const LEGACY_FRAME_MAGIC: u32 = 0x184C_2102;

/// Flag byte: version 01 in bits 7–6, everything else off (linked blocks,
/// no content size, no checksums).
pub const FRAME_FLAGS: u8 = 1 << 6;

/// Block-max-size byte: id 7 (4 MiB) in bits 6–4.
pub const FRAME_BD: u8 = 7 << 4;

/// Descriptor checksum for the fixed flags above; `header_checksum` derives
/// the same value at runtime.
pub const FRAME_HC: u8 = 0xDF;

/// High bit of the block size word: payload stored uncompressed.
pub const BLOCK_UNCOMPRESSED: u32 = 0x8000_0000;

/// Frame-descriptor checksum: second byte of the xxHash32 of the descriptor
/// (flags through optional content size), seed 0.
#[inline]
pub fn header_checksum(descriptor: &[u8]) -> u8 {
    ((xxh32(descriptor, 0) >> 8) & 0xFF) as u8
}

/// Write the fixed 7-byte frame header.
pub fn write_frame_header<W: Write>(dst: &mut W) -> io::Result<()> {
    dst.write_all(&FRAME_MAGIC.to_le_bytes())?;
    dst.write_all(&[FRAME_FLAGS, FRAME_BD, FRAME_HC])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magic_serializes_to_expected_bytes() {
        assert_eq!(FRAME_MAGIC.to_le_bytes(), [0x04, 0x22, 0x4D, 0x18]);
    }

    /// The precomputed descriptor checksum must equal the xxHash32-derived
    /// value for this flag combination.
    #[test]
    fn precomputed_header_checksum_matches_xxh32() {
        assert_eq!(header_checksum(&[FRAME_FLAGS, FRAME_BD]), FRAME_HC);
    }

    #[test]
    fn header_is_seven_bytes() {
        let mut out = Vec::new();
        write_frame_header(&mut out).unwrap();
        assert_eq!(out, [0x04, 0x22, 0x4D, 0x18, 0x40, 0x70, 0xDF]);
    }
}
