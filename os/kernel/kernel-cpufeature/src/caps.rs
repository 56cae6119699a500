use crate::capability::CapabilityId;
use kernel_sync::{AtomicBitmap, Bits};

/// Upper bound (exclusive) for [`CapabilityId`] values.
pub const MAX_CAPABILITIES: usize = 64;

const WORDS: usize = MAX_CAPABILITIES.div_ceil(u64::BITS as usize);

/// Set of capabilities the whole system has committed to.
///
/// Grows only: there is no removal. Writes happen while the boot CPU runs
/// alone; afterwards any number of CPUs read it concurrently.
#[derive(Default)]
pub struct CapabilitySet {
    bits: AtomicBitmap<WORDS>,
}

impl CapabilitySet {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bits: AtomicBitmap::new(),
        }
    }

    /// Add `id`. Returns `true` on the first insertion.
    ///
    /// # Panics
    /// Panics if `id` is not below [`MAX_CAPABILITIES`].
    pub fn insert(&self, id: CapabilityId) -> bool {
        self.bits.insert(id.index())
    }

    /// # Panics
    /// Panics if `id` is not below [`MAX_CAPABILITIES`].
    #[must_use]
    pub fn contains(&self, id: CapabilityId) -> bool {
        self.bits.contains(id.index())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.count()
    }

    /// A read-only copy of the current membership.
    #[must_use]
    pub fn snapshot(&self) -> CapabilitySnapshot {
        CapabilitySnapshot {
            words: self.bits.snapshot(),
        }
    }
}

/// Point-in-time copy of a [`CapabilitySet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilitySnapshot {
    words: [u64; WORDS],
}

impl CapabilitySnapshot {
    #[must_use]
    pub fn contains(&self, id: CapabilityId) -> bool {
        let bit = id.index();
        bit < MAX_CAPABILITIES && self.words[bit / 64] & (1 << (bit % 64)) != 0
    }

    /// Whether every capability in `self` is also in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .all(|(a, b)| a & !b == 0)
    }

    /// Member ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = CapabilityId> + use<> {
        Bits::new(self.words).map_while(|bit| u16::try_from(bit).ok().map(CapabilityId::new))
    }
}
