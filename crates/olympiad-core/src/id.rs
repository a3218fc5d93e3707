//! Strongly-typed entity indices and the [`Seeds`] alias.

use smallvec::SmallVec;
use std::fmt;

/// Position of an entity within its owning list.
///
/// Index 0 and index `capacity - 1` are the list's head and tail sentinels
/// and never identify a real entity. Because list capacity is capped at
/// [`MAX_ENTITIES`](crate::MAX_ENTITIES), an index doubles as a bit position
/// in the counterpart list's [`ParticipationMask`](crate::ParticipationMask).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityIndex(pub u32);

impl EntityIndex {
    /// Bit selecting this entity in a participation mask.
    pub fn bit(self) -> u64 {
        1u64 << self.0
    }

    /// Compact form stored in bracket and group cells, where 0 means empty.
    pub fn as_cell(self) -> u8 {
        self.0 as u8
    }

    /// Decode a bracket or group cell. Returns `None` for an empty cell.
    pub fn from_cell(cell: u8) -> Option<Self> {
        (cell != 0).then_some(Self(cell as u32))
    }
}

impl fmt::Display for EntityIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for EntityIndex {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// An ordered list of entrants.
///
/// Inline capacity covers every possible entrant set, so seed lists never
/// touch the heap.
pub type Seeds = SmallVec<[EntityIndex; 64]>;
