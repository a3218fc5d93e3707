//! Short-lived scratch regions passed down the call chain explicitly.
//!
//! [`ScratchSet`] owns a small fixed number of regions. A function that
//! needs temporary memory acquires one with [`ScratchSet::acquire`], naming
//! the regions it already holds (its own scratch, or an arena its caller
//! handed it) as conflicts, so that two nested call sites never alias the
//! same region. The returned [`ScratchGuard`] rewinds the region to the
//! acquisition checkpoint when dropped.

use std::cell::{RefCell, RefMut};
use std::ops::{Deref, DerefMut};

use log::warn;

use crate::config::ScratchConfig;
use crate::error::ArenaError;
use crate::handle::RegionId;
use crate::region::Region;

/// A set of scratch regions shared by straight-line code on one thread.
///
/// This is a context value, not global state: create one at startup and
/// pass `&ScratchSet` to every function that needs scratch memory.
pub struct ScratchSet {
    ids: Vec<RegionId>,
    regions: Vec<RefCell<Region>>,
}

impl ScratchSet {
    /// Create `config.count` scratch regions.
    pub fn new(config: &ScratchConfig) -> Result<Self, ArenaError> {
        let mut ids = Vec::with_capacity(config.count);
        let mut regions = Vec::with_capacity(config.count);
        for slot in 0..config.count {
            let region = Region::new(&config.region)?.tracked(RegionId::scratch(slot));
            ids.push(region.id());
            regions.push(RefCell::new(region));
        }
        Ok(Self { ids, regions })
    }

    /// Check out the first scratch region whose id is not in `conflicts`.
    ///
    /// The guard remembers the region's cursor and restores it on drop.
    /// Fails with `NoScratchAvailable` when every region conflicts, and
    /// with `ScratchAliased` when the chosen region is already held by a
    /// caller that left it out of `conflicts`.
    pub fn acquire(&self, conflicts: &[RegionId]) -> Result<ScratchGuard<'_>, ArenaError> {
        let slot = self
            .ids
            .iter()
            .position(|id| !conflicts.contains(id))
            .ok_or(ArenaError::NoScratchAvailable {
                conflicts: conflicts.len(),
            })?;
        let region = self.regions[slot].try_borrow_mut().map_err(|_| {
            warn!("scratch region {} requested while already held", self.ids[slot]);
            ArenaError::ScratchAliased {
                region: self.ids[slot],
            }
        })?;
        let checkpoint = region.position();
        Ok(ScratchGuard { region, checkpoint })
    }

    /// Ids of the regions in this set, in acquisition priority order.
    pub fn ids(&self) -> &[RegionId] {
        &self.ids
    }

    /// Number of regions in this set.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns `true` if the set holds no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// A checked-out scratch region.
///
/// Dereferences to [`Region`]. Dropping the guard rewinds the region to the
/// position it had at acquisition and makes it available again.
pub struct ScratchGuard<'a> {
    region: RefMut<'a, Region>,
    checkpoint: usize,
}

impl ScratchGuard<'_> {
    /// Id of the held region; list it as a conflict for nested acquisitions.
    pub fn id(&self) -> RegionId {
        self.region.id()
    }

    /// Cursor position restored on drop.
    pub fn checkpoint(&self) -> usize {
        self.checkpoint
    }
}

impl Deref for ScratchGuard<'_> {
    type Target = Region;

    fn deref(&self) -> &Region {
        &self.region
    }
}

impl DerefMut for ScratchGuard<'_> {
    fn deref_mut(&mut self) -> &mut Region {
        &mut self.region
    }
}

impl Drop for ScratchGuard<'_> {
    fn drop(&mut self) {
        let checkpoint = self.checkpoint;
        self.region.rewind(checkpoint);
    }
}
