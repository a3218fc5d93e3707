//! Fixed-size bump-allocated regions and scope-guarded checkpoints.
//!
//! A [`Region`] owns one contiguous byte block, allocated in full at
//! creation. Allocation advances a cursor; nothing is freed individually.
//! [`Region::position`] and [`Region::rewind`] release everything allocated
//! after a checkpoint, and [`TempRegion`] pairs the two so the rewind runs on
//! every exit path.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::config::RegionConfig;
use crate::error::ArenaError;
use crate::handle::{RegionId, Span};

/// A bump allocator over a fixed byte block.
///
/// Offsets below the configured header size are never handed out. The
/// cursor never exceeds the block length and never goes below the header.
#[derive(Clone)]
pub struct Region {
    id: RegionId,
    /// Backing storage. Allocated to full size at creation.
    data: Vec<u8>,
    /// Bump pointer: next free byte offset.
    cursor: usize,
    header_size: usize,
}

impl Region {
    /// Create a region from a validated config.
    ///
    /// The block is zero-initialised.
    pub fn new(config: &RegionConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        Ok(Self {
            id: RegionId::UNTRACKED,
            data: vec![0; config.block_size],
            cursor: config.header_size,
            header_size: config.header_size,
        })
    }

    /// Create a region of `block_size` bytes with the default header.
    pub fn with_capacity(block_size: usize) -> Result<Self, ArenaError> {
        Self::new(&RegionConfig::new(block_size))
    }

    pub(crate) fn tracked(mut self, id: RegionId) -> Self {
        self.id = id;
        self
    }

    /// Identity of this region within its scratch set, or
    /// [`RegionId::UNTRACKED`].
    pub fn id(&self) -> RegionId {
        self.id
    }

    /// Bump-allocate `size` bytes aligned to `align`.
    ///
    /// The returned bytes are zero-filled (they may hold stale data from
    /// before a rewind). Fails with `CapacityExceeded` when the block cannot
    /// hold the request; the region never grows.
    pub fn alloc(&mut self, size: usize, align: usize) -> Result<Span, ArenaError> {
        if align == 0 || !align.is_power_of_two() {
            return Err(ArenaError::InvalidAlignment { align });
        }
        let exceeded = ArenaError::CapacityExceeded {
            requested: size,
            remaining: self.remaining(),
        };
        let start = match self.cursor.checked_add(align - 1) {
            Some(v) => v & !(align - 1),
            None => return Err(exceeded),
        };
        let end = match start.checked_add(size) {
            Some(end) if end <= self.data.len() => end,
            _ => return Err(exceeded),
        };
        self.data[start..end].fill(0);
        self.cursor = end;
        Ok(Span::new(start, size))
    }

    /// Allocate a copy of `bytes` aligned to `align`.
    pub fn alloc_copy(&mut self, bytes: &[u8], align: usize) -> Result<Span, ArenaError> {
        let span = self.alloc(bytes.len(), align)?;
        self.data[span.offset..span.end()].copy_from_slice(bytes);
        Ok(span)
    }

    /// Resolve a span to its bytes.
    ///
    /// # Panics
    ///
    /// Panics if the span extends past the cursor, which means it was
    /// allocated after a checkpoint that has since been rewound.
    pub fn bytes(&self, span: Span) -> &[u8] {
        self.check_live(span);
        &self.data[span.offset..span.end()]
    }

    /// Resolve a span to its bytes for in-place writes.
    ///
    /// # Panics
    ///
    /// Panics if the span extends past the cursor.
    pub fn bytes_mut(&mut self, span: Span) -> &mut [u8] {
        self.check_live(span);
        &mut self.data[span.offset..span.end()]
    }

    /// Resolve a span holding UTF-8 text.
    ///
    /// # Panics
    ///
    /// Panics if the span extends past the cursor.
    pub fn str(&self, span: Span) -> Result<&str, ArenaError> {
        std::str::from_utf8(self.bytes(span)).map_err(|_| ArenaError::InvalidUtf8 {
            offset: span.offset,
        })
    }

    /// Current cursor, usable as a checkpoint for [`Region::rewind`].
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Restore the cursor to a previously observed position.
    ///
    /// The position is clamped to the header size and the block length.
    /// Every span allocated after the checkpoint becomes invalid.
    pub fn rewind(&mut self, checkpoint: usize) {
        self.cursor = checkpoint.clamp(self.header_size, self.data.len());
    }

    /// Release every allocation.
    pub fn reset(&mut self) {
        self.cursor = self.header_size;
    }

    /// Open a temporary scope; allocations made through the guard are
    /// released when it drops.
    pub fn temp(&mut self) -> TempRegion<'_> {
        TempRegion::new(self)
    }

    /// Bytes allocated since creation or the last reset, header excluded.
    pub fn used(&self) -> usize {
        self.cursor - self.header_size
    }

    /// Total block length in bytes, header included.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.cursor
    }

    /// Size of the reserved header prefix.
    pub fn header_size(&self) -> usize {
        self.header_size
    }

    fn check_live(&self, span: Span) {
        assert!(
            span.offset >= self.header_size && span.end() <= self.cursor,
            "span {span} is outside the live part of region {} (cursor {})",
            self.id,
            self.cursor,
        );
    }
}

impl fmt::Debug for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Region")
            .field("id", &self.id)
            .field("cursor", &self.cursor)
            .field("capacity", &self.data.len())
            .finish()
    }
}

/// Checkpoint guard that rewinds its region on drop.
///
/// Dereferences to the underlying [`Region`], so allocations go through the
/// guard as usual. Spans obtained inside the scope must not outlive it.
pub struct TempRegion<'a> {
    region: &'a mut Region,
    checkpoint: usize,
}

impl<'a> TempRegion<'a> {
    fn new(region: &'a mut Region) -> Self {
        let checkpoint = region.position();
        Self { region, checkpoint }
    }

    /// Cursor position that will be restored on drop.
    pub fn checkpoint(&self) -> usize {
        self.checkpoint
    }
}

impl Deref for TempRegion<'_> {
    type Target = Region;

    fn deref(&self) -> &Region {
        self.region
    }
}

impl DerefMut for TempRegion<'_> {
    fn deref_mut(&mut self) -> &mut Region {
        self.region
    }
}

impl Drop for TempRegion<'_> {
    fn drop(&mut self) {
        self.region.rewind(self.checkpoint);
    }
}
