//! Streaming frame decompressor.
//!
//! Reads an LZ4 frame byte-by-byte through a small input buffer and decodes
//! blocks into a 64 KiB history ring, flushing the ring to the output sink
//! as it wraps.  The ring doubles as the back-reference window, so matches
//! may reach into the previous block (linked-block mode) and uncompressed
//! blocks enter the ring too.
//!
//! Content and block checksums are skipped, not verified.  The 1-byte
//! descriptor checksum *is* verified — it guards the header fields this
//! parser just consumed.

use std::fmt;
use std::io::{self, Read, Write};

use crate::config::DECODE_BUFFER_SIZE;
use crate::frame::{header_checksum, FRAME_MAGIC, LEGACY_FRAME_MAGIC};

/// Size of the decode history; back-references never reach further.
const HISTORY_SIZE: usize = 64 * 1024;

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Failure modes of frame decoding.  All are fatal to the stream.
#[derive(Debug)]
pub enum DecodeError {
    /// Underlying read or write failed.
    Io(io::Error),
    /// The stream does not start with the LZ4 frame magic.
    BadMagic(u32),
    /// The frame descriptor checksum byte does not match the descriptor.
    HeaderChecksum { expected: u8, found: u8 },
    /// A match record carries distance zero.
    ZeroDistance,
    /// The stream ended in the middle of a frame element.
    TruncatedStream,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Io(e) => write!(f, "i/o error: {}", e),
            DecodeError::BadMagic(m) if *m == LEGACY_FRAME_MAGIC => {
                write!(f, "legacy frame format is not supported")
            }
            DecodeError::BadMagic(m) => write!(f, "invalid frame magic {:#010x}", m),
            DecodeError::HeaderChecksum { expected, found } => write!(
                f,
                "frame descriptor checksum mismatch (expected {:#04x}, found {:#04x})",
                expected, found
            ),
            DecodeError::ZeroDistance => write!(f, "invalid match distance 0"),
            DecodeError::TruncatedStream => write!(f, "unexpected end of stream"),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for DecodeError {
    fn from(e: io::Error) -> Self {
        DecodeError::Io(e)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Buffered byte source
// ─────────────────────────────────────────────────────────────────────────────

/// Minimal pull-one-byte reader; refills in [`DECODE_BUFFER_SIZE`] chunks.
struct ByteReader<'a, R: Read> {
    inner: &'a mut R,
    buf: Vec<u8>,
    pos: usize,
    available: usize,
}

impl<'a, R: Read> ByteReader<'a, R> {
    fn new(inner: &'a mut R) -> Self {
        ByteReader {
            inner,
            buf: vec![0u8; DECODE_BUFFER_SIZE],
            pos: 0,
            available: 0,
        }
    }

    fn byte(&mut self) -> Result<u8, DecodeError> {
        if self.pos == self.available {
            self.pos = 0;
            self.available = self.inner.read(&mut self.buf)?;
            if self.available == 0 {
                return Err(DecodeError::TruncatedStream);
            }
        }
        let b = self.buf[self.pos];
        self.pos += 1;
        Ok(b)
    }

    fn le32(&mut self) -> Result<u32, DecodeError> {
        let mut v = 0u32;
        for shift in [0, 8, 16, 24] {
            v |= (self.byte()? as u32) << shift;
        }
        Ok(v)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Frame decoding
// ─────────────────────────────────────────────────────────────────────────────

/// Decompress one LZ4 frame from `src` onto `dst`.
pub fn decompress_frame<R: Read, W: Write>(src: &mut R, dst: &mut W) -> Result<(), DecodeError> {
    let mut rd = ByteReader::new(src);

    let magic = rd.le32()?;
    if magic != FRAME_MAGIC {
        return Err(DecodeError::BadMagic(magic));
    }

    // ── Frame descriptor ─────────────────────────────────────────────────
    let flags = rd.byte()?;
    let has_block_checksum = flags & 16 != 0;
    let has_content_size = flags & 8 != 0;
    let has_content_checksum = flags & 4 != 0;
    let bd = rd.byte()?;

    let mut descriptor = vec![flags, bd];
    if has_content_size {
        for _ in 0..8 {
            descriptor.push(rd.byte()?);
        }
    }
    let hc = rd.byte()?;
    let expected = header_checksum(&descriptor);
    if hc != expected {
        return Err(DecodeError::HeaderChecksum { expected, found: hc });
    }

    // ── Blocks ───────────────────────────────────────────────────────────
    let mut history = vec![0u8; HISTORY_SIZE];
    let mut pos = 0usize;

    loop {
        let size_word = rd.le32()?;
        let is_compressed = size_word & 0x8000_0000 == 0;
        let block_size = (size_word & 0x7FFF_FFFF) as usize;
        if block_size == 0 {
            break;
        }

        if is_compressed {
            decode_block(&mut rd, dst, &mut history, &mut pos, block_size)?;
        } else {
            // Raw copy — still enters the history for later back-references.
            for _ in 0..block_size {
                history[pos] = rd.byte()?;
                pos += 1;
                if pos == HISTORY_SIZE {
                    dst.write_all(&history)?;
                    pos = 0;
                }
            }
        }

        if has_block_checksum {
            for _ in 0..4 {
                rd.byte()?;
            }
        }
    }

    if has_content_checksum {
        for _ in 0..4 {
            rd.byte()?;
        }
    }

    dst.write_all(&history[..pos])?;
    Ok(())
}

/// Decode one compressed block into the history ring, flushing on wrap.
fn decode_block<R: Read, W: Write>(
    rd: &mut ByteReader<'_, R>,
    dst: &mut W,
    history: &mut [u8],
    pos: &mut usize,
    block_size: usize,
) -> Result<(), DecodeError> {
    let mut block_offset = 0usize;

    while block_offset < block_size {
        let token = rd.byte()?;
        block_offset += 1;

        // ── Literals ─────────────────────────────────────────────────────
        let mut num_literals = (token >> 4) as usize;
        if num_literals == 15 {
            loop {
                let cur = rd.byte()?;
                num_literals += cur as usize;
                block_offset += 1;
                if cur != 255 {
                    break;
                }
            }
        }
        block_offset += num_literals;
        for _ in 0..num_literals {
            history[*pos] = rd.byte()?;
            *pos += 1;
            if *pos == HISTORY_SIZE {
                dst.write_all(history)?;
                *pos = 0;
            }
        }

        // The final record of a block carries no match.
        if block_offset == block_size {
            break;
        }

        // ── Match ────────────────────────────────────────────────────────
        block_offset += 2;
        let mut delta = rd.byte()? as usize;
        delta |= (rd.byte()? as usize) << 8;
        if delta == 0 {
            return Err(DecodeError::ZeroDistance);
        }

        let mut match_length = 4 + (token & 0x0F) as usize;
        if token & 0x0F == 0x0F {
            loop {
                let cur = rd.byte()?;
                match_length += cur as usize;
                block_offset += 1;
                if cur != 255 {
                    break;
                }
            }
        }

        // Copy the match out of the ring.  The fast path needs both source
        // and destination contiguous and non-overlapping; otherwise copy
        // byte-wise with wrap-around (which also realises the overlapping
        // run-replication semantics).
        let mut reference = if *pos >= delta {
            *pos - delta
        } else {
            HISTORY_SIZE + *pos - delta
        };

        if *pos + match_length < HISTORY_SIZE
            && reference + match_length < HISTORY_SIZE
            && (*pos >= reference + match_length || reference >= *pos + match_length)
        {
            history.copy_within(reference..reference + match_length, *pos);
            *pos += match_length;
        } else {
            for _ in 0..match_length {
                history[*pos] = history[reference];
                *pos += 1;
                reference += 1;
                if *pos == HISTORY_SIZE {
                    dst.write_all(history)?;
                    *pos = 0;
                }
                if reference == HISTORY_SIZE {
                    reference = 0;
                }
            }
        }
    }

    Ok(())
}
