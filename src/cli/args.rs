//! Command-line argument parsing for `lz4opt`.
//!
//! The entry points are [`parse_args`] (reads `std::env::args()`) and
//! [`parse_args_from`] (takes an explicit slice, suitable for unit tests).
//! Short flags may be aggregated (`-f7`).  `-D` consumes the rest of its
//! cluster or the following argument as the dictionary path.  A lone `-`
//! stands for stdin/stdout in the positional slots.
//!
//! Unrecognised flags return an `Err` with a human-readable message.

use anyhow::{anyhow, bail};

use crate::cli::constants::{display_level, set_display_level};
use crate::config::{DEFAULT_MAX_CHAIN, MAX_CHAIN_UNLIMITED};

/// Everything the dispatch phase needs, produced by the argument loop.
#[derive(Debug)]
pub struct ParsedArgs {
    /// Match-finder effort; `0` disables compression, 65535 is unlimited.
    pub max_chain_length: u32,
    /// Overwrite an existing output file.
    pub force_overwrite: bool,
    /// Decompress instead of compress.
    pub decompress: bool,
    /// Optional compression dictionary path.
    pub dictionary_filename: Option<String>,
    /// Input path; `None` = stdin.
    pub input_filename: Option<String>,
    /// Output path; `None` = stdout.
    pub output_filename: Option<String>,
    /// `-h` was processed; the caller should exit 0 without any I/O.
    pub exit_early: bool,
}

impl Default for ParsedArgs {
    fn default() -> Self {
        ParsedArgs {
            max_chain_length: DEFAULT_MAX_CHAIN,
            force_overwrite: false,
            decompress: false,
            dictionary_filename: None,
            input_filename: None,
            output_filename: None,
            exit_early: false,
        }
    }
}

/// Parse `std::env::args()` (skipping argv[0]).
pub fn parse_args() -> anyhow::Result<ParsedArgs> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    parse_args_from(&argv)
}

/// Parse an explicit argument list.  Callable from tests without touching
/// `std::env`.
pub fn parse_args_from(argv: &[String]) -> anyhow::Result<ParsedArgs> {
    let mut args = ParsedArgs::default();
    let mut positionals: Vec<Option<String>> = Vec::new();

    let mut iter = argv.iter();
    while let Some(argument) = iter.next() {
        if argument == "-" {
            // Positional stdin/stdout marker.
            positionals.push(None);
            continue;
        }

        if let Some(cluster) = argument.strip_prefix('-') {
            let mut chars = cluster.char_indices();
            while let Some((idx, flag)) = chars.next() {
                match flag {
                    'h' => {
                        crate::cli::help::print_help();
                        args.exit_early = true;
                        return Ok(args);
                    }
                    'f' => args.force_overwrite = true,
                    'd' => args.decompress = true,
                    'q' => set_display_level(display_level().saturating_sub(1)),
                    'v' => set_display_level(display_level() + 1),
                    'D' => {
                        // Path is the rest of this cluster, or the next arg.
                        let rest = &cluster[idx + 1..];
                        let path = if !rest.is_empty() {
                            rest.to_owned()
                        } else {
                            iter.next()
                                .ok_or_else(|| anyhow!("missing dictionary file after -D"))?
                                .clone()
                        };
                        args.dictionary_filename = Some(path);
                        break;
                    }
                    '0'..='8' => {
                        args.max_chain_length = flag as u32 - '0' as u32;
                    }
                    '9' => args.max_chain_length = MAX_CHAIN_UNLIMITED,
                    other => bail!("unknown flag '-{}'", other),
                }
            }
            continue;
        }

        positionals.push(Some(argument.clone()));
    }

    if positionals.len() > 2 {
        bail!("too many file arguments");
    }
    let mut positionals = positionals.into_iter();
    args.input_filename = positionals.next().flatten();
    args.output_filename = positionals.next().flatten();

    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<ParsedArgs> {
        let argv: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        parse_args_from(&argv)
    }

    #[test]
    fn defaults_to_optimal_parsing() {
        let a = parse(&[]).unwrap();
        assert_eq!(a.max_chain_length, MAX_CHAIN_UNLIMITED);
        assert!(!a.force_overwrite);
        assert!(a.input_filename.is_none());
        assert!(a.output_filename.is_none());
    }

    #[test]
    fn level_digits_map_to_chain_lengths() {
        assert_eq!(parse(&["-0"]).unwrap().max_chain_length, 0);
        assert_eq!(parse(&["-1"]).unwrap().max_chain_length, 1);
        assert_eq!(parse(&["-8"]).unwrap().max_chain_length, 8);
        assert_eq!(parse(&["-9"]).unwrap().max_chain_length, MAX_CHAIN_UNLIMITED);
    }

    #[test]
    fn aggregated_flags() {
        let a = parse(&["-f7"]).unwrap();
        assert!(a.force_overwrite);
        assert_eq!(a.max_chain_length, 7);
    }

    #[test]
    fn positional_files() {
        let a = parse(&["-6", "in.bin", "out.lz4"]).unwrap();
        assert_eq!(a.max_chain_length, 6);
        assert_eq!(a.input_filename.as_deref(), Some("in.bin"));
        assert_eq!(a.output_filename.as_deref(), Some("out.lz4"));
    }

    #[test]
    fn dash_means_stdin() {
        let a = parse(&["-", "out.lz4"]).unwrap();
        assert!(a.input_filename.is_none());
        assert_eq!(a.output_filename.as_deref(), Some("out.lz4"));
    }

    #[test]
    fn dictionary_inline_and_separate() {
        let a = parse(&["-Dwords.dict", "in", "out"]).unwrap();
        assert_eq!(a.dictionary_filename.as_deref(), Some("words.dict"));
        let b = parse(&["-D", "words.dict"]).unwrap();
        assert_eq!(b.dictionary_filename.as_deref(), Some("words.dict"));
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(parse(&["-x"]).is_err());
    }

    #[test]
    fn too_many_positionals_rejected() {
        assert!(parse(&["a", "b", "c"]).is_err());
    }

    #[test]
    fn decompress_flag() {
        assert!(parse(&["-d"]).unwrap().decompress);
    }
}
