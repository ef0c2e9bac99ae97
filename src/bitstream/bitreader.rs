//! BitReader: reads the packed flag area of a payload, least significant bit first.
//!
//! NOTE: Unlike the packer, the reader borrows its source. Payloads are always one
//! complete buffer, so there is nothing to refill.
//!

/// Reads flag bits from a byte slice.
#[derive(Debug)]
pub struct BitReader<'a> {
    source: &'a [u8],
    cursor: usize,
    bit_index: u8,
}

impl<'a> BitReader<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        Self {
            source,
            cursor: 0,
            bit_index: 0,
        }
    }

    /// Return Option<Bool> *true* if the next bit is 1, *false* if 0, consuming the bit,
    /// or None if there is no more data to read
    pub fn bool_bit(&mut self) -> Option<bool> {
        let byte = *self.source.get(self.cursor)?;
        let bit = (byte >> self.bit_index) & 1 == 1;
        self.bit_index += 1;
        if self.bit_index == 8 {
            self.bit_index = 0;
            self.cursor += 1;
        }
        Some(bit)
    }

    /// Bits not yet read.
    pub fn remaining(&self) -> usize {
        (self.source.len() - self.cursor) * 8 - self.bit_index as usize
    }

    /// Position of the next bit, counted from the start of the source.
    pub fn position(&self) -> usize {
        self.cursor * 8 + self.bit_index as usize
    }

    /// True when every unread bit is 0. Does not consume anything.
    pub fn rest_is_zero(&self) -> bool {
        match self.source.get(self.cursor) {
            None => true,
            Some(&byte) => {
                byte >> self.bit_index == 0
                    && self.source[self.cursor + 1..].iter().all(|&b| b == 0)
            }
        }
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;
    fn next(&mut self) -> Option<Self::Item> {
        self.bool_bit()
    }
}

/// Unpacks at most `count` flags from `bytes`. Never yields more than `8 * bytes.len()` entries.
pub fn unpack(bytes: &[u8], count: usize) -> Vec<bool> {
    BitReader::new(bytes).take(count).collect()
}
