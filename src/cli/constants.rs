//! CLI constants, the shared verbosity level, and the output macros.

use std::sync::atomic::{AtomicU32, Ordering};

// ── Identity strings ────────────────────────────────────────────────────────
/// Program name used in diagnostics and help output.
pub const PROGRAM_NAME: &str = "lz4opt";

// ── Verbosity level ──────────────────────────────────────────────────────────
//
// Semantics:
//   0 — completely silent
//   1 — errors only
//   2 — normal informational output (default)
//   3 — verbose / diagnostic
//
// Stored as a process-wide atomic so it is accessible from any module without
// threading through a context struct.
pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

/// Returns the current verbosity level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the verbosity level.
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

// ── Output macros ────────────────────────────────────────────────────────────

/// Write a formatted message to **stderr** unconditionally.
///
/// Prefer [`displaylevel!`] when the message should be suppressible.
#[macro_export]
macro_rules! display {
    ($($arg:tt)*) => { eprint!($($arg)*) };
}

/// Write a formatted message to **stderr** if the current verbosity level is
/// at least `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_level_round_trips() {
        let prev = display_level();
        set_display_level(3);
        assert_eq!(display_level(), 3);
        set_display_level(prev);
    }
}
