//! The compression module holds the predictive codec.
//!
//! Compression happens in the following steps:
//! - The first two characters are stored verbatim. There is no context to predict them from.
//! - Every later character is predicted from a hash of the two characters before it.
//! - A hit costs one flag bit. A miss costs one flag bit plus the literal character, and the
//!   literal becomes the new prediction for that context.
//! - The payload is the leftover count, the leftovers, then the packed flag bits.
//!
//! Decompression replays the same table updates in the same order, so the decoder's guess table
//! matches the encoder's at every step without ever being transmitted.
//!
//! Each call owns its guess table. [`Codec`] keeps one table around and resets it between calls
//! for callers that compress many small payloads.
//!
pub mod compress;
pub mod context;
pub mod decompress;

use crate::error::{ArgumentError, FormatError};

use compress::{compress_with, latin1_bytes};
use context::GuessTable;
use decompress::decompress_with;

/// Reusable compressor/decompressor that owns one guess table.
#[derive(Debug, Default)]
pub struct Codec {
    table: GuessTable,
}

impl Codec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compress(&mut self, text: &str) -> Result<Vec<u8>, ArgumentError> {
        let data = latin1_bytes(text)?;
        self.compress_bytes(&data)
    }

    pub fn compress_bytes(&mut self, data: &[u8]) -> Result<Vec<u8>, ArgumentError> {
        self.table.reset();
        compress_with(data, &mut self.table)
    }

    pub fn decompress(&mut self, payload: &[u8]) -> Result<String, FormatError> {
        Ok(self
            .decompress_bytes(payload)?
            .into_iter()
            .map(char::from)
            .collect())
    }

    pub fn decompress_bytes(&mut self, payload: &[u8]) -> Result<Vec<u8>, FormatError> {
        self.table.reset();
        decompress_with(payload, &mut self.table)
    }
}

#[cfg(test)]
mod test {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::compress::{compress, compress_bytes};
    use super::decompress::{decompress, decompress_bytes};
    use super::Codec;
    use crate::error::ArgumentError;

    const SAMPLES: [&str; 8] = [
        "a",
        "ab",
        "abc",
        "aaaabbbb",
        "Hello World",
        "the rain in spain stays mainly in the plain",
        "   leading and trailing spaces   ",
        "café crème brûlée",
    ];

    #[test]
    fn round_trip_samples() {
        for text in SAMPLES {
            let payload = compress(text).unwrap();
            assert_eq!(decompress(&payload).unwrap(), text, "payload {:?}", payload);
        }
    }

    #[test]
    fn round_trip_random_bytes() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..500 {
            let len = rng.gen_range(1..200);
            // Small alphabets keep the literal count under the header limit
            let alphabet = rng.gen_range(1..6u8);
            let data: Vec<u8> = (0..len).map(|_| b'a' + rng.gen_range(0..alphabet)).collect();
            match compress_bytes(&data) {
                Ok(payload) => assert_eq!(decompress_bytes(&payload).unwrap(), data),
                Err(ArgumentError::LiteralOverflow { count }) => assert!(count > 255),
                Err(e) => panic!("unexpected error {}", e),
            }
        }
    }

    #[test]
    fn round_trip_full_byte_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let len = rng.gen_range(1..120);
            let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
            if let Ok(payload) = compress_bytes(&data) {
                assert_eq!(decompress_bytes(&payload).unwrap(), data);
            }
        }
    }

    #[test]
    fn colliding_contexts_round_trip() {
        // (0, 'a') and (1, 0) hash to the same slot
        let data = [0, b'a', b'x', 1, 0, b'x', 0, b'a', b'y', 1, 0, b'y'];
        let payload = compress_bytes(&data).unwrap();
        assert_eq!(decompress_bytes(&payload).unwrap(), data);
    }

    #[test]
    fn codec_resets_between_calls() {
        let mut codec = Codec::new();
        let first = codec.compress("abababab").unwrap();
        let second = codec.compress("abababab").unwrap();
        assert_eq!(first, second);
        assert_eq!(first, compress("abababab").unwrap());

        assert_eq!(codec.decompress(&first).unwrap(), "abababab");
        assert_eq!(codec.decompress(&second).unwrap(), "abababab");
    }

    #[test]
    fn codec_matches_free_functions() {
        let mut codec = Codec::new();
        for text in SAMPLES {
            let payload = codec.compress(text).unwrap();
            assert_eq!(payload, compress(text).unwrap());
            assert_eq!(codec.decompress_bytes(&payload).unwrap(), decompress_bytes(&payload).unwrap());
        }
    }

    #[test]
    fn threads_do_not_share_state() {
        let handles: Vec<_> = SAMPLES
            .iter()
            .map(|&text| std::thread::spawn(move || decompress(&compress(text).unwrap()).unwrap()))
            .collect();
        for (handle, text) in handles.into_iter().zip(SAMPLES) {
            assert_eq!(handle.join().unwrap(), text);
        }
    }
}
