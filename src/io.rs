//! File I/O primitives for the CLI: source/destination resolution with
//! stdin/stdout fallbacks and the overwrite policy.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Opens the input, returning a buffered boxed [`Read`].
///
/// `None` means standard input.
pub fn open_src_file(path: Option<&str>) -> io::Result<Box<dyn Read>> {
    match path {
        None => Ok(Box::new(io::stdin().lock())),
        Some(p) => {
            let f = File::open(p)
                .map_err(|e| io::Error::new(e.kind(), format!("{}: {}", p, e)))?;
            Ok(Box::new(BufReader::new(f)))
        }
    }
}

/// Opens the output, returning a buffered boxed [`Write`].
///
/// `None` means standard output.  For regular paths, an existing file is an
/// error unless `force_overwrite` is set.
pub fn open_dst_file(path: Option<&str>, force_overwrite: bool) -> io::Result<Box<dyn Write>> {
    match path {
        None => Ok(Box::new(io::stdout().lock())),
        Some(p) => {
            if !force_overwrite && Path::new(p).exists() {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("{}: output file already exists (use -f to overwrite)", p),
                ));
            }
            let f = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(p)
                .map_err(|e| io::Error::new(e.kind(), format!("{}: {}", p, e)))?;
            Ok(Box::new(BufWriter::new(f)))
        }
    }
}

/// Reads a dictionary file, keeping at most the final 64 KiB — the block
/// format cannot reference anything further back.
pub fn load_dict_file(path: &str) -> io::Result<Vec<u8>> {
    let mut data = std::fs::read(path)
        .map_err(|e| io::Error::new(e.kind(), format!("{}: {}", path, e)))?;
    const MAX_DICT_SIZE: usize = 64 * 1024;
    if data.len() > MAX_DICT_SIZE {
        data.drain(..data.len() - MAX_DICT_SIZE);
    }
    Ok(data)
}
