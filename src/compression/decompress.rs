use crate::bitstream::bitreader::BitReader;
use crate::error::FormatError;

use super::context::{context_hash, GuessTable, CONTEXT_LEN};

/// The fixed-layout part of a payload, split but not yet decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header<'a> {
    /// Literal characters, in the order the decoder consumes them.
    pub leftovers: &'a [u8],
    /// Packed flag area, one bit per text position.
    pub flags: &'a [u8],
}

impl<'a> Header<'a> {
    /// Split a payload into leftovers and flag bytes, checking only the sizes.
    pub fn parse(payload: &'a [u8]) -> Result<Self, FormatError> {
        let (&count, body) = payload.split_first().ok_or(FormatError::Empty)?;
        let count = count as usize;
        if count == 0 {
            return Err(FormatError::NoLeftovers);
        }
        if body.len() < count {
            return Err(FormatError::Truncated {
                declared: count,
                available: body.len(),
            });
        }
        let (leftovers, flags) = body.split_at(count);
        if flags.is_empty() {
            return Err(FormatError::MissingFlags);
        }
        Ok(Self { leftovers, flags })
    }
}

/// Decompress a payload into a Latin-1 string.
pub fn decompress(payload: &[u8]) -> Result<String, FormatError> {
    Ok(decompress_bytes(payload)?
        .into_iter()
        .map(char::from)
        .collect())
}

/// Decompress a payload into raw single-byte characters.
pub fn decompress_bytes(payload: &[u8]) -> Result<Vec<u8>, FormatError> {
    let mut table = GuessTable::new();
    decompress_with(payload, &mut table)
}

/*
    The payload does not store the text length. The text ends at the first 0 flag that finds
    no leftover left to consume, or at the end of the flag area. Any bit after that point is
    padding and must be 0, and the padding must fit in the final byte. Anything else is
    rejected rather than returned as a truncated text.
*/

/// Decompress with a caller supplied table. The table must hold only default guesses.
pub(crate) fn decompress_with(
    payload: &[u8],
    table: &mut GuessTable,
) -> Result<Vec<u8>, FormatError> {
    let Header { leftovers, flags } = Header::parse(payload)?;
    let mut br = BitReader::new(flags);

    // Context positions never carry a prediction.
    for _ in 0..CONTEXT_LEN {
        if br.bool_bit() == Some(true) {
            return Err(FormatError::ReservedBits);
        }
    }

    let head = leftovers.len().min(CONTEXT_LEN);
    let mut text = Vec::with_capacity(flags.len() * 8);
    text.extend_from_slice(&leftovers[..head]);
    let mut cursor = head;

    // A single leftover is a one character text. There is no context to predict from.
    if head == CONTEXT_LEN {
        while let Some(flag) = br.bool_bit() {
            let hash = context_hash(text[text.len() - 2], text[text.len() - 1]);
            if flag {
                text.push(table.get(hash));
            } else if let Some(&ch) = leftovers.get(cursor) {
                cursor += 1;
                text.push(ch);
                table.set(hash, ch);
            } else {
                break;
            }
        }
    }

    if !br.rest_is_zero() {
        return Err(FormatError::LeftoversExhausted {
            position: text.len(),
        });
    }
    if cursor < leftovers.len() {
        return Err(FormatError::UnusedLeftovers {
            unused: leftovers.len() - cursor,
        });
    }
    let expected = (text.len() + 7) / 8;
    if expected != flags.len() {
        return Err(FormatError::TrailingBytes {
            text_len: text.len(),
            expected,
            actual: flags.len(),
        });
    }
    Ok(text)
}
