//! Fixed-slot name storage for an entity list.
//!
//! Every live entity owns one slot of a [`SlotPool`] carved from the
//! list's own [`Region`]. A slot holds a length byte followed by the name
//! bytes. Names are copied in on add and rename, and the slot returns to
//! the pool on remove and rename, so the store never grows and a
//! long-running registry never runs out of name space.

use olympiad_arena::{text, ArenaError, Region, RegionConfig, SlotPool};
use olympiad_core::{RegistryError, MAX_NAME_LEN, NAME_SLOT_BYTES};

/// Name slot of an entity that has no name (sentinels and free slots).
pub(crate) const NO_NAME: u32 = u32::MAX;

const SLOT_ALIGN: usize = 4;

/// Names of one entity list, stored in a region it owns.
#[derive(Clone, Debug)]
pub struct NameTable {
    region: Region,
    pool: SlotPool,
}

impl NameTable {
    /// Block size, header included, of a region that holds `slots` names.
    pub fn block_size(slots: u32) -> usize {
        RegionConfig::DEFAULT_HEADER_SIZE + slots as usize * NAME_SLOT_BYTES
    }

    /// A table for `slots` names in a region of exactly
    /// [`block_size`](NameTable::block_size) bytes.
    pub fn new(slots: u32) -> Result<Self, RegistryError> {
        let region = Region::with_capacity(Self::block_size(slots)).map_err(storage)?;
        Self::in_region(region, slots)
    }

    /// A table for `slots` names carved from a caller-supplied block.
    pub fn in_region(mut region: Region, slots: u32) -> Result<Self, RegistryError> {
        let pool =
            SlotPool::new(&mut region, slots, NAME_SLOT_BYTES, SLOT_ALIGN).map_err(storage)?;
        Ok(Self { region, pool })
    }

    /// Copy `name` into a free slot and return the slot.
    pub fn insert(&mut self, name: &str) -> Result<u32, RegistryError> {
        let slot = encode(name)?;
        self.pool.push(&mut self.region, &slot).map_err(storage)
    }

    /// Give `slot` back to the pool. The no-name marker is ignored.
    pub fn release(&mut self, slot: u32) {
        if slot != NO_NAME {
            self.pool.pop(&mut self.region, slot);
        }
    }

    /// The name held in `slot`; empty for the no-name marker.
    pub fn get(&self, slot: u32) -> &str {
        if slot == NO_NAME {
            return "";
        }
        let bytes = self.pool.get(&self.region, slot);
        let len = usize::from(bytes[0]);
        std::str::from_utf8(&bytes[1..=len]).unwrap_or_default()
    }

    /// Whether `slot` holds exactly `name`.
    pub fn matches(&self, slot: u32, name: &str) -> bool {
        slot != NO_NAME && text::eq(self.get(slot), name)
    }

    /// Number of names stored.
    pub fn len(&self) -> u32 {
        self.pool.live()
    }

    /// Returns `true` if no name is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The region backing this table.
    pub fn region(&self) -> &Region {
        &self.region
    }
}

fn encode(name: &str) -> Result<[u8; NAME_SLOT_BYTES], RegistryError> {
    let len = name.len();
    if len > MAX_NAME_LEN {
        return Err(RegistryError::NameTooLong {
            len,
            max: MAX_NAME_LEN,
        });
    }
    let mut slot = [0u8; NAME_SLOT_BYTES];
    slot[0] = len as u8;
    slot[1..=len].copy_from_slice(name.as_bytes());
    Ok(slot)
}

fn storage(err: ArenaError) -> RegistryError {
    RegistryError::NameStorage {
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_release_reuses_slot() {
        let mut names = NameTable::new(4).unwrap();
        let a = names.insert("Lucia").unwrap();
        let b = names.insert("").unwrap();
        assert_eq!(names.get(a), "Lucia");
        assert_eq!(names.get(b), "");
        assert_eq!(names.len(), 2);
        names.release(a);
        assert_eq!(names.insert("Antonia").unwrap(), a);
        assert_eq!(names.get(a), "Antonia");
    }

    #[test]
    fn longest_name_fits() {
        let mut names = NameTable::new(2).unwrap();
        let long = "é".repeat(MAX_NAME_LEN / 2) + "x";
        assert_eq!(long.len(), MAX_NAME_LEN);
        let slot = names.insert(&long).unwrap();
        assert_eq!(names.get(slot), long);
        assert_eq!(
            names.insert(&(long + "y")),
            Err(RegistryError::NameTooLong {
                len: MAX_NAME_LEN + 1,
                max: MAX_NAME_LEN
            })
        );
    }

    #[test]
    fn exact_block_holds_every_slot() {
        let mut names = NameTable::new(64).unwrap();
        for i in 0..64 {
            names.insert(&format!("P{i}")).unwrap();
        }
        assert_eq!(names.region().remaining(), 0);
        assert!(matches!(
            names.insert("one more"),
            Err(RegistryError::NameStorage { .. })
        ));
    }

    #[test]
    fn undersized_block_is_rejected() {
        let region = Region::with_capacity(NameTable::block_size(2)).unwrap();
        assert!(matches!(
            NameTable::in_region(region, 3),
            Err(RegistryError::NameStorage { .. })
        ));
    }

    #[test]
    fn no_name_matches_nothing() {
        let names = NameTable::new(2).unwrap();
        assert_eq!(names.get(NO_NAME), "");
        assert!(!names.matches(NO_NAME, ""));
    }
}
