//! Region identifiers and allocation spans.
//!
//! A [`Span`] encodes where an allocation lives inside its region. It is
//! the safe stand-in for a raw pointer: cheap to copy, resolved in O(1)
//! through [`Region::bytes`](crate::Region::bytes).

use std::fmt;

/// Identifier of a region within its [`ScratchSet`](crate::ScratchSet).
///
/// Used by [`ScratchSet::acquire`](crate::ScratchSet::acquire) conflict sets
/// to tell regions apart without comparing addresses. A set numbers its
/// regions from 1; every region created outside a set is
/// [`RegionId::UNTRACKED`], which never conflicts with a scratch region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(u32);

impl RegionId {
    /// Id of a region that belongs to no scratch set.
    pub const UNTRACKED: Self = Self(0);

    /// Id of the scratch region at `slot` of its set.
    pub(crate) fn scratch(slot: usize) -> Self {
        Self(slot as u32 + 1)
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Location of an allocation within a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct Span {
    pub(crate) offset: usize,
    pub(crate) len: usize,
}

impl Span {
    pub(crate) fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Byte offset from the start of the region block.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the allocation in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this is a zero-length allocation.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// One past the last byte.
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Sub-span of `len` bytes starting `at` bytes into this span.
    ///
    /// # Panics
    ///
    /// Panics if the sub-span does not lie inside `self`.
    pub fn slice(&self, at: usize, len: usize) -> Span {
        assert!(at + len <= self.len, "sub-span {at}+{len} outside span of {}", self.len);
        Span::new(self.offset + at, len)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Span(off={}, len={})", self.offset, self.len)
    }
}
