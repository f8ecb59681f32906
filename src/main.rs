//! Binary entry point for the `lz4opt` command-line tool.
//!
//! Control flow: parse flags and filenames, resolve the two streams (with
//! stdin/stdout fallbacks and the overwrite policy), then run either the
//! compressor or the decompressor over them.  Exit code 0 on success, 1 on
//! any error, with a message on stderr.

use lz4opt::cli::args::{parse_args, ParsedArgs};
use lz4opt::cli::constants::PROGRAM_NAME;
use lz4opt::io::{load_dict_file, open_dst_file, open_src_file};
use lz4opt::{compress_frame_with_dict, decompress_frame, display, displaylevel};

/// Execute the operation selected by argument parsing; returns the exit code.
fn run(args: ParsedArgs) -> i32 {
    let dictionary = match args.dictionary_filename.as_deref() {
        Some(path) => match load_dict_file(path) {
            Ok(d) => d,
            Err(e) => {
                displaylevel!(1, "{}: {}\n", PROGRAM_NAME, e);
                return 1;
            }
        },
        None => Vec::new(),
    };

    let mut src = match open_src_file(args.input_filename.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            displaylevel!(1, "{}: {}\n", PROGRAM_NAME, e);
            return 1;
        }
    };
    let mut dst = match open_dst_file(args.output_filename.as_deref(), args.force_overwrite) {
        Ok(d) => d,
        Err(e) => {
            displaylevel!(1, "{}: {}\n", PROGRAM_NAME, e);
            return 1;
        }
    };

    let result: std::io::Result<()> = if args.decompress {
        decompress_frame(&mut src, &mut dst)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    } else {
        compress_frame_with_dict(&mut src, &mut dst, args.max_chain_length, &dictionary)
    };

    let result = result.and_then(|()| dst.flush());
    match result {
        Ok(()) => 0,
        Err(e) => {
            displaylevel!(1, "{}: {}\n", PROGRAM_NAME, e);
            1
        }
    }
}

fn main() {
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            display!("{}: {}\n", PROGRAM_NAME, e);
            std::process::exit(1);
        }
    };

    // -h prints help inside the parser; nothing left to do.
    if args.exit_early {
        return;
    }

    std::process::exit(run(args));
}
