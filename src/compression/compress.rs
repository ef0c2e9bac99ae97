use crate::bitstream::bitpacker::BitPacker;
use crate::error::ArgumentError;

use super::context::{context_hash, GuessTable, CONTEXT_LEN};

/// Largest leftover count the one-byte payload header can describe.
pub const MAX_LEFTOVERS: usize = u8::MAX as usize;

/*
    The payload is laid out as
        [leftover count][leftovers][flag area]

    The first two characters always go to the leftovers because there is no context to
    predict them from. After that, each character either matches the guess table entry for
    the hash of the two characters before it (flag 1) or it is stored as a leftover and
    becomes the new guess for that context (flag 0).

    The flag area has one bit per text position, so positions 0 and 1 are always 0.
*/

/// Compress a Latin-1 string. Every char must be at most U+00FF.
pub fn compress(text: &str) -> Result<Vec<u8>, ArgumentError> {
    compress_bytes(&latin1_bytes(text)?)
}

/// Compress raw single-byte characters.
pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>, ArgumentError> {
    let mut table = GuessTable::new();
    compress_with(data, &mut table)
}

/// Compress with a caller supplied table. The table must hold only default guesses.
pub(crate) fn compress_with(data: &[u8], table: &mut GuessTable) -> Result<Vec<u8>, ArgumentError> {
    if data.is_empty() {
        return Err(ArgumentError::EmptyInput);
    }

    let head = data.len().min(CONTEXT_LEN);
    let mut leftovers = data[..head].to_vec();

    // One bit per text position. The context positions never carry a prediction.
    let mut bp = BitPacker::new(data.len());
    (0..head).for_each(|_| bp.out_bit(false));

    for window in data.windows(CONTEXT_LEN + 1) {
        let hash = context_hash(window[0], window[1]);
        let ch = window[2];
        if table.get(hash) == ch {
            bp.out_bit(true);
        } else {
            bp.out_bit(false);
            leftovers.push(ch);
            table.set(hash, ch);
        }
    }
    bp.flush();

    let count = u8::try_from(leftovers.len()).map_err(|_| ArgumentError::LiteralOverflow {
        count: leftovers.len(),
    })?;

    let mut payload = Vec::with_capacity(1 + leftovers.len() + bp.output.len());
    payload.push(count);
    payload.extend_from_slice(&leftovers);
    payload.extend_from_slice(&bp.output);
    Ok(payload)
}

/// Map a string onto single bytes, rejecting anything outside Latin-1.
pub(crate) fn latin1_bytes(text: &str) -> Result<Vec<u8>, ArgumentError> {
    text.chars()
        .enumerate()
        .map(|(position, ch)| {
            u8::try_from(ch).map_err(|_| ArgumentError::UnsupportedChar { ch, position })
        })
        .collect()
}
