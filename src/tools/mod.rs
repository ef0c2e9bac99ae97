//! The tools module wraps the codec for use from the command line.
//!
//! - cli: Command line options, parsed with clap.
//! - file_io: Compress, decompress and test files or standard input, one payload each.
//!
pub mod cli;
pub mod file_io;
