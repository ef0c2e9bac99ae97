/// Packs a sequence of flag bits into bytes, least significant bit first.
pub struct BitPacker {
    pub output: Vec<u8>,
    queue: u8,
    q_bits: u8,
}

impl BitPacker {
    /// Create a new BitPacker with room for `bits` flags. Call flush() to push the
    /// final partial byte to the output buffer.
    pub fn new(bits: usize) -> Self {
        Self {
            output: Vec::with_capacity((bits + 7) / 8),
            queue: 0,
            q_bits: 0,
        }
    }

    /// Puts one bit on the stream. The first bit written lands in bit 0 of the first byte.
    pub fn out_bit(&mut self, bit: bool) {
        if bit {
            self.queue |= 1 << self.q_bits;
        }
        self.q_bits += 1;
        if self.q_bits == 8 {
            self.output.push(self.queue);
            self.queue = 0;
            self.q_bits = 0;
        }
    }

    /// Puts every bit of the slice on the stream, in order.
    pub fn out_bits(&mut self, bits: &[bool]) {
        bits.iter().for_each(|&bit| self.out_bit(bit));
    }

    /// Flushes the remaining bits (1-7) from the queue. The unused high bits stay 0.
    pub fn flush(&mut self) {
        if self.q_bits > 0 {
            self.output.push(self.queue);
            self.queue = 0;
            self.q_bits = 0;
        }
    }

    /// Number of bits written so far, including those still queued.
    pub fn len(&self) -> usize {
        self.output.len() * 8 + self.q_bits as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.len() / 8, self.len() % 8)
    }
}

/// Packs `flags` into `ceil(flags.len() / 8)` bytes. Flag `i` lives at byte `i / 8`, bit `i % 8`.
pub fn pack(flags: &[bool]) -> Vec<u8> {
    let mut bp = BitPacker::new(flags.len());
    bp.out_bits(flags);
    bp.flush();
    bp.output
}
