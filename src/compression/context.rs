//! Context hashing and the guess table shared (by construction, never by memory) between the
//! compressor and the decompressor.
//!
//! Both directions must compute exactly the same hash for the same two characters. Any
//! divergence corrupts every payload from that point on.

/// Number of characters of context used to predict the next one.
pub const CONTEXT_LEN: usize = 2;
/// Number of slots in a guess table, one per possible 16 bit hash.
pub const TABLE_SIZE: usize = 1 << 16;
/// Prediction held by every slot until it is first written.
pub const DEFAULT_GUESS: u8 = b' ';

const HASH_SEED: u16 = 5381;

/// Hash a two-character context into a table index.
///
/// Each step is `seed = ((seed << 5) + seed) ^ c`, reduced mod 65536. Reducing after every step
/// gives the same result as reducing once at the end, so u16 wrapping arithmetic is enough.
/// Distinct contexts may collide; that only costs prediction accuracy.
#[inline]
pub fn context_hash(c0: u8, c1: u8) -> u16 {
    let step = |seed: u16, c: u8| (seed << 5).wrapping_add(seed) ^ c as u16;
    step(step(HASH_SEED, c0), c1)
}

/// Per-call predictive dictionary: the last character seen after each hashed context.
#[derive(Clone)]
pub struct GuessTable {
    slots: Box<[u8; TABLE_SIZE]>,
}

impl GuessTable {
    pub fn new() -> Self {
        Self {
            slots: Box::new([DEFAULT_GUESS; TABLE_SIZE]),
        }
    }

    #[inline]
    pub fn get(&self, hash: u16) -> u8 {
        self.slots[hash as usize]
    }

    #[inline]
    pub fn set(&mut self, hash: u16, ch: u8) {
        self.slots[hash as usize] = ch;
    }

    /// Put every slot back to the default guess so the table can serve another call.
    pub fn reset(&mut self) {
        self.slots.fill(DEFAULT_GUESS);
    }
}

impl Default for GuessTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GuessTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let written = self.slots.iter().filter(|&&c| c != DEFAULT_GUESS).count();
        f.debug_struct("GuessTable")
            .field("non_default_slots", &written)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn hash_known_values() {
        assert_eq!(context_hash(b'a', b'a'), 28197);
        assert_eq!(context_hash(b'a', b'b'), 28198);
        assert_eq!(context_hash(b'b', b'b'), 28357);
        assert_eq!(context_hash(b' ', b' '), 26117);
        assert_eq!(context_hash(0xff, 0xff), 24677);
    }

    #[test]
    fn hash_collides_on_some_contexts() {
        assert_eq!(context_hash(0, b'a'), context_hash(1, 0));
    }

    #[test]
    fn table_defaults_to_space() {
        let table = GuessTable::new();
        assert_eq!(table.get(0), b' ');
        assert_eq!(table.get(u16::MAX), b' ');
    }

    #[test]
    fn set_get_and_reset() {
        let mut table = GuessTable::default();
        let h = context_hash(b'x', b'y');
        table.set(h, b'z');
        assert_eq!(table.get(h), b'z');
        assert_eq!(format!("{:?}", table), "GuessTable { non_default_slots: 1 }");
        table.reset();
        assert_eq!(table.get(h), b' ');
    }
}
