//! Entities and the payload trait that makes lists symmetric.
//!
//! Players and events are stored by the same [`EntityList`](crate::EntityList)
//! code. What differs is the payload: players carry nothing, events carry
//! their tournament state. [`EntityData`] is the seam where a payload reacts
//! to changes in the participation relation.

use olympiad_core::ParticipationMask;

use crate::names::NO_NAME;

/// Per-list payload stored inline in every entity slot.
pub trait EntityData: Clone {
    /// The entity's participation mask changed (register, unregister, or a
    /// counterpart was removed). Derived state must be rebuilt before this
    /// returns.
    fn participation_changed(&mut self, participation: ParticipationMask);
}

/// Payload of a participant. Players hold no derived state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerData;

impl EntityData for PlayerData {
    fn participation_changed(&mut self, _participation: ParticipationMask) {}
}

/// One slot of an entity list.
///
/// `next`/`prev` link the slot into the active chain; free slots use
/// `next` for the free chain. The name lives in the owning list's
/// [`NameTable`](crate::NameTable); resolve it with
/// [`EntityList::name_of`](crate::EntityList::name_of).
#[derive(Clone, Debug)]
pub struct Entity<D> {
    pub(crate) next: u32,
    pub(crate) prev: u32,
    pub(crate) name: u32,
    pub(crate) participation: ParticipationMask,
    pub(crate) data: D,
}

impl<D> Entity<D> {
    pub(crate) fn vacant(data: D) -> Self {
        Self {
            next: 0,
            prev: 0,
            name: NO_NAME,
            participation: ParticipationMask::empty(),
            data,
        }
    }

    /// Counterparts this entity is registered with.
    pub fn participation(&self) -> ParticipationMask {
        self.participation
    }

    /// The per-list payload.
    pub fn data(&self) -> &D {
        &self.data
    }

    /// Index of the next entity in the active chain (the tail sentinel
    /// ends it).
    pub fn next(&self) -> u32 {
        self.next
    }

    /// Index of the previous entity in the active chain (the head sentinel
    /// starts it).
    pub fn prev(&self) -> u32 {
        self.prev
    }
}

/// A participant slot.
pub type Player = Entity<PlayerData>;
