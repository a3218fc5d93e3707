//! The 64-bit participation mask and seed-order iteration.
//!
//! Each entity carries one [`ParticipationMask`]: bit *i* is set when the
//! entity is registered with the entity at index *i* of the other list.
//! Ascending bit order is the canonical seed order used by bracket and
//! group construction, so this is the single place that defines it.

use crate::id::{EntityIndex, Seeds};

/// Fixed-width bitset of counterpart entity indices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ParticipationMask(pub u64);

impl ParticipationMask {
    /// Create an empty mask.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Set the bit for `index`.
    pub fn insert(&mut self, index: EntityIndex) {
        self.0 |= index.bit();
    }

    /// Clear the bit for `index`.
    pub fn remove(&mut self, index: EntityIndex) {
        self.0 &= !index.bit();
    }

    /// Check whether the bit for `index` is set.
    pub fn contains(&self, index: EntityIndex) -> bool {
        self.0 & index.bit() != 0
    }

    /// Returns `true` if no bit is set.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of set bits.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Clear every bit.
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Iterate over set-bit positions, lowest first.
    pub fn iter(&self) -> MaskIter {
        MaskIter { bits: self.0 }
    }

    /// Collect the seed order: set-bit positions in ascending order.
    pub fn seeds(&self) -> Seeds {
        self.iter().collect()
    }
}

impl FromIterator<EntityIndex> for ParticipationMask {
    fn from_iter<I: IntoIterator<Item = EntityIndex>>(iter: I) -> Self {
        let mut mask = Self::empty();
        for index in iter {
            mask.insert(index);
        }
        mask
    }
}

impl IntoIterator for ParticipationMask {
    type Item = EntityIndex;
    type IntoIter = MaskIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the set bits of a [`ParticipationMask`], ascending.
pub struct MaskIter {
    bits: u64,
}

impl Iterator for MaskIter {
    type Item = EntityIndex;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        let pos = self.bits.trailing_zeros();
        // Clear the lowest set bit.
        self.bits &= self.bits - 1;
        Some(EntityIndex(pos))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for MaskIter {}
