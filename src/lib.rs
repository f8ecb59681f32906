//! `lz4opt` — an LZ4-compatible compressor with optimal parsing, plus the
//! matching streaming decompressor and command-line program.
//!
//! The compressor produces standard LZ4 frames (magic + descriptor + blocks +
//! terminator) and spends its effort on the parse: a dual match-chain finder
//! over a 64 KiB sliding window feeds a backwards dynamic-programming pass
//! that picks, per position, the literal-or-match decision minimising the
//! encoded byte count of the remaining block.
//!
//! # Crate layout
//!
//! | Module   | Contents |
//! |----------|----------|
//! | `block`  | Match model, chain store, match finder, cost optimizer, token serializer. |
//! | `frame`  | Frame header, block framing, the compress driver and the decompressor. |
//! | `io`     | stdin/stdout sentinels and file open helpers with overwrite policy. |
//! | `cli`    | Argument parsing, help text, verbosity macros. |
//! | `config` | Compile-time tunables (chain-length thresholds, buffer sizes). |

pub mod config;

pub mod block;
pub mod cli;
pub mod frame;
pub mod io;

/// Crate version, reported by `-h`.
pub const VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use frame::compress::{compress_frame, compress_frame_with_dict};
pub use frame::decompress::{decompress_frame, DecodeError};
