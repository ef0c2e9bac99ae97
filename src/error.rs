use thiserror::Error;

/// Input the compressor refuses to encode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("Empty string passed to compressor")]
    EmptyInput,
    #[error("Character {ch:?} at position {position} does not fit in a single byte")]
    UnsupportedChar { ch: char, position: usize },
    #[error("Input needs {count} literals, but the payload header holds at most 255")]
    LiteralOverflow { count: usize },
}

/// Payloads that are not a valid compressed record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Empty payload")]
    Empty,
    #[error("Payload declares no leftovers")]
    NoLeftovers,
    #[error("Payload declares {declared} leftovers, but only {available} bytes follow the header")]
    Truncated { declared: usize, available: usize },
    #[error("Payload has no flag bytes")]
    MissingFlags,
    #[error("Flag bits for the two context positions must be zero")]
    ReservedBits,
    #[error("Leftovers ran out at text position {position} with set flag bits remaining")]
    LeftoversExhausted { position: usize },
    #[error("{unused} leftovers were never consumed")]
    UnusedLeftovers { unused: usize },
    #[error("Text of {text_len} characters needs {expected} flag bytes, payload has {actual}")]
    TrailingBytes {
        text_len: usize,
        expected: usize,
        actual: usize,
    },
}

/// Umbrella error for the file layer and the command line tool.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ArgumentError),
    #[error("Invalid payload: {0}")]
    Format(#[from] FormatError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Integrity check failed for {name}")]
    Integrity { name: String },
}

pub type Result<T> = std::result::Result<T, CodecError>;
