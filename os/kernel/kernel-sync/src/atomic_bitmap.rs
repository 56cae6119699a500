use core::sync::atomic::{AtomicU64, Ordering};

const WORD_BITS: usize = u64::BITS as usize;

/// Fixed-size set of small integers, one bit each, backed by `AtomicU64` words.
///
/// Inserts and removals are single atomic read-modify-write operations, so the
/// bitmap can be shared between cores without a lock. Membership tests use
/// `Acquire`, updates use `AcqRel`: an observer that sees a bit also sees
/// everything its writer did before setting it.
pub struct AtomicBitmap<const WORDS: usize> {
    words: [AtomicU64; WORDS],
}

impl<const WORDS: usize> Default for AtomicBitmap<WORDS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const WORDS: usize> AtomicBitmap<WORDS> {
    /// Number of representable bits.
    pub const BITS: usize = WORDS * WORD_BITS;

    #[must_use]
    pub const fn new() -> Self {
        Self {
            words: [const { AtomicU64::new(0) }; WORDS],
        }
    }

    /// Set `bit`. Returns `true` if the bit was previously clear.
    ///
    /// # Panics
    /// Panics if `bit >= Self::BITS`.
    #[inline]
    pub fn insert(&self, bit: usize) -> bool {
        let (word, mask) = Self::locate(bit);
        self.words[word].fetch_or(mask, Ordering::AcqRel) & mask == 0
    }

    /// Clear `bit`. Returns `true` if the bit was previously set.
    ///
    /// # Panics
    /// Panics if `bit >= Self::BITS`.
    #[inline]
    pub fn remove(&self, bit: usize) -> bool {
        let (word, mask) = Self::locate(bit);
        self.words[word].fetch_and(!mask, Ordering::AcqRel) & mask != 0
    }

    /// # Panics
    /// Panics if `bit >= Self::BITS`.
    #[inline]
    #[must_use]
    pub fn contains(&self, bit: usize) -> bool {
        let (word, mask) = Self::locate(bit);
        self.words[word].load(Ordering::Acquire) & mask != 0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| w.load(Ordering::Acquire) == 0)
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.words
            .iter()
            .map(|w| w.load(Ordering::Acquire).count_ones() as usize)
            .sum()
    }

    /// Copy of the current words. Bits set concurrently with the copy may or
    /// may not be included.
    #[must_use]
    pub fn snapshot(&self) -> [u64; WORDS] {
        core::array::from_fn(|i| self.words[i].load(Ordering::Acquire))
    }

    /// Iterate the set bits of a [`snapshot`](Self::snapshot) in ascending order.
    #[must_use]
    pub fn iter(&self) -> Bits<WORDS> {
        Bits::new(self.snapshot())
    }

    #[inline]
    const fn locate(bit: usize) -> (usize, u64) {
        assert!(bit < Self::BITS, "bit index out of range");
        (bit / WORD_BITS, 1 << (bit % WORD_BITS))
    }
}

/// Ascending iterator over the set bits of a bitmap snapshot.
#[derive(Debug, Clone)]
pub struct Bits<const WORDS: usize> {
    words: [u64; WORDS],
    word: usize,
}

impl<const WORDS: usize> Bits<WORDS> {
    #[must_use]
    pub const fn new(words: [u64; WORDS]) -> Self {
        Self { words, word: 0 }
    }
}

impl<const WORDS: usize> Iterator for Bits<WORDS> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.word < WORDS {
            let w = self.words[self.word];
            if w != 0 {
                let bit = w.trailing_zeros() as usize;
                // clear lowest set bit
                self.words[self.word] = w & (w - 1);
                return Some(self.word * WORD_BITS + bit);
            }
            self.word += 1;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_iterates_across_words() {
        let bits: Vec<usize> = Bits::new([0b1001, 1 << 63, 0]).collect();
        assert_eq!(bits, [0, 3, 127]);
    }

    #[test]
    fn bits_of_empty_snapshot() {
        assert_eq!(Bits::new([0u64; 2]).next(), None);
    }

    #[test]
    #[should_panic(expected = "bit index out of range")]
    fn out_of_range_bit_panics() {
        let map = AtomicBitmap::<1>::new();
        let _ = map.insert(64);
    }
}
