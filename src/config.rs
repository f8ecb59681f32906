//! Compile-time configuration constants for the `lz4opt` programs layer.
//!
//! These govern the default compression effort and I/O buffer sizes.  The
//! chain-length thresholds decide which parsing strategy runs; the effort
//! itself is chosen per invocation through the `-0` … `-9` CLI flags, which
//! map directly onto a maximum chain length.

/// Chain lengths up to this value use greedy parsing: after a match, match
/// finding is skipped for the covered positions.
pub const SHORT_CHAINS_GREEDY: u32 = 3;

/// Chain lengths above [`SHORT_CHAINS_GREEDY`] and up to this value use lazy
/// evaluation: one extra probe on the position right after a match, then the
/// remaining covered positions are skipped.
pub const SHORT_CHAINS_LAZY: u32 = 6;

/// Chain length selected by `-9`: effectively unlimited, every candidate
/// within the 64 KiB window is examined.
pub const MAX_CHAIN_UNLIMITED: u32 = 65_535;

/// Default effort when no level flag is given (`-9`, optimal parsing).
pub const DEFAULT_MAX_CHAIN: u32 = MAX_CHAIN_UNLIMITED;

/// Size of the reusable input read buffer.  Any non-zero value works; reads
/// are accumulated until a whole block is available.
pub const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Size of the decompressor's input buffer.
pub const DECODE_BUFFER_SIZE: usize = 4 * 1024;
