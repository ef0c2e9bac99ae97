//! The bitstream module packs and unpacks the flag area of a payload.
//!
//! Every character after the two-character context gets one flag bit: 1 when the guess table
//! predicted it, 0 when a literal had to be stored. Bits are written least significant bit first,
//! so bit `p` of the area lives in byte `p / 8` at bit `p % 8`.
//!
//! - bitpacker: BitPacker and `pack`.
//! - bitreader: BitReader and `unpack`.
//!
pub mod bitpacker;
pub mod bitreader;
