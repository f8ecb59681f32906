//! Command-line layer: argument parsing, help text, and the verbosity
//! constants shared by the binary.

pub mod args;
pub mod constants;
pub mod help;
