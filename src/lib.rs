//! Context-predictive payload compression.
//!
//! Each character is predicted from the two characters that precede it, using a 65536 slot
//! guess table indexed by a hash of that context. A correct prediction is stored as a single
//! 1 bit. A wrong one is stored as a 0 bit plus the literal character, which then becomes the
//! prediction for that context. Decompression replays the same table updates, so the table
//! itself is never transmitted.
//!
//! The payload layout is
//!
//! `[leftover count: 1 byte][leftovers][flag bits, LSB-first, one per text position]`
//!
//! Basic usage:
//!
//! ```
//! use payload_predictor::{compress, decompress};
//!
//! let payload = compress("abababab").unwrap();
//! assert_eq!(payload, [4, b'a', b'b', b'a', b'b', 0b1111_0000]);
//! assert_eq!(decompress(&payload).unwrap(), "abababab");
//! ```
//!
//! Characters must fit in one byte, and the literal count must fit in the one byte header.
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod tools;

pub use bitstream::{bitpacker::pack, bitreader::unpack};
pub use compression::compress::{compress, compress_bytes};
pub use compression::context::{context_hash, GuessTable};
pub use compression::decompress::{decompress, decompress_bytes};
pub use compression::Codec;
pub use error::{ArgumentError, CodecError, FormatError};
