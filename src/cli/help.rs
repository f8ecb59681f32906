//! Help and usage text for the `lz4opt` CLI.

use crate::cli::constants::PROGRAM_NAME;
use crate::config::SHORT_CHAINS_GREEDY;

/// Print the full help message to stderr.
pub fn print_help() {
    eprintln!(
        "{} {}: LZ4 compressor with optimal parsing, fully compatible with LZ4",
        PROGRAM_NAME,
        crate::VERSION_STRING
    );
    eprintln!();
    eprintln!("Basic usage:");
    eprintln!("  {} [flags] [input] [output]", PROGRAM_NAME);
    eprintln!();
    eprintln!("Reads from STDIN when no input is given (or input is '-') and");
    eprintln!("writes to STDOUT when no output is given.");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {}    < abc.txt > abc.txt.lz4    # use STDIN and STDOUT", PROGRAM_NAME);
    eprintln!("  {}      abc.txt   abc.txt.lz4    # read from and write to file", PROGRAM_NAME);
    eprintln!("  {} -6   abc.txt   abc.txt.lz4    # compression level 6", PROGRAM_NAME);
    eprintln!("  {} -f9  abc.txt   abc.txt.lz4    # level 9, overwrite output", PROGRAM_NAME);
    eprintln!("  {} -d   abc.txt.lz4 abc.txt     # decompress", PROGRAM_NAME);
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  -0, -1 ... -9   Set compression level, default: 9 (see below)");
    eprintln!("  -d              Decompress");
    eprintln!("  -D FILE         Use FILE as compression dictionary");
    eprintln!("  -f              Overwrite an existing output file");
    eprintln!("  -q / -v         Quieter / more verbose diagnostics");
    eprintln!("  -h              Display this help message");
    eprintln!();
    eprintln!("Compression levels:");
    eprintln!("  -0              No compression");
    eprintln!(
        "  -1 ... -{}       Greedy search, check 1 to {} matches",
        SHORT_CHAINS_GREEDY, SHORT_CHAINS_GREEDY
    );
    eprintln!(
        "  -{} ... -8       Lazy matching with optimal parsing, check {} to 8 matches",
        SHORT_CHAINS_GREEDY + 1,
        SHORT_CHAINS_GREEDY + 1
    );
    eprintln!("  -9              Optimal parsing, check all possible matches");
}
