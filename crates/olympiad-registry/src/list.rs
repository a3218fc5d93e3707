//! Array-backed intrusive entity lists.
//!
//! An [`EntityList`] is one fixed allocation of `capacity` slots. Slot 0 is
//! the head sentinel and slot `capacity - 1` the tail sentinel; neither ever
//! holds an entity. Occupied slots form a doubly-linked active chain from
//! head to tail, most recently added first. Unoccupied slots form a
//! singly-linked free chain through `next`, terminated by the tail index.
//! The two chains partition the non-sentinel slots.
//!
//! Names are copied into the list's [`NameTable`], so callers may pass
//! transient strings. Lookup by name is a linear scan of the active chain;
//! with at most 62 live entities that is cheaper than maintaining an
//! index. Structural updates are O(1) and never touch the heap: slots and
//! name space are allocated once, at construction.

use log::debug;
use olympiad_arena::Region;
use olympiad_core::{EntityIndex, RegistryError, MAX_ENTITIES};

use crate::entity::{Entity, EntityData};
use crate::names::{NameTable, NO_NAME};

/// `prev` value of a slot on the free chain.
const FREE: u32 = u32::MAX;

/// Fixed-capacity list of named entities with a per-slot payload `D`.
#[derive(Clone, Debug)]
pub struct EntityList<D> {
    entities: Box<[Entity<D>]>,
    names: NameTable,
    first_free: u32,
    len: u32,
    template: D,
}

impl<D: EntityData + Default> EntityList<D> {
    /// Create a list of `capacity` slots (sentinels included) whose new
    /// entities start with `D::default()`.
    pub fn new(capacity: u32) -> Result<Self, RegistryError> {
        Self::with_template(capacity, D::default())
    }
}

impl<D: EntityData> EntityList<D> {
    /// Create a list of `capacity` slots whose new entities start as a
    /// copy of `template`. Names get a region of their own.
    ///
    /// `capacity` must be in `3..=MAX_ENTITIES`: two sentinels plus at
    /// least one usable slot, and every index must fit the mask width.
    pub fn with_template(capacity: u32, template: D) -> Result<Self, RegistryError> {
        check_capacity(capacity)?;
        Self::build(capacity, template, NameTable::new(capacity)?)
    }

    /// Like [`with_template`](EntityList::with_template), with names
    /// stored in a caller-supplied block of at least
    /// [`NameTable::block_size`]`(capacity)` bytes.
    pub fn in_region(capacity: u32, template: D, region: Region) -> Result<Self, RegistryError> {
        check_capacity(capacity)?;
        Self::build(capacity, template, NameTable::in_region(region, capacity)?)
    }

    fn build(capacity: u32, template: D, names: NameTable) -> Result<Self, RegistryError> {
        let tail = capacity - 1;
        let mut entities: Vec<Entity<D>> = (0..capacity)
            .map(|_| Entity::vacant(template.clone()))
            .collect();

        entities[0].next = tail;
        entities[0].prev = 0;
        entities[tail as usize].next = tail;
        entities[tail as usize].prev = 0;
        for i in 1..tail {
            entities[i as usize].next = i + 1;
            entities[i as usize].prev = FREE;
        }

        Ok(Self {
            entities: entities.into_boxed_slice(),
            names,
            first_free: 1,
            len: capacity,
            template,
        })
    }

    /// Index of the head sentinel.
    pub fn head(&self) -> u32 {
        0
    }

    /// Index of the tail sentinel, also the "not found" result of
    /// [`find`](EntityList::find).
    pub fn tail(&self) -> u32 {
        self.len - 1
    }

    /// Number of slots, sentinels included.
    pub fn capacity(&self) -> u32 {
        self.len
    }

    /// Head of the free chain; equals [`tail`](EntityList::tail) when full.
    pub fn first_free(&self) -> u32 {
        self.first_free
    }

    /// Scan the active chain for `name` (exact byte equality).
    ///
    /// Returns the entity's index, or the tail index when absent.
    pub fn find(&self, name: &str) -> u32 {
        let tail = self.tail();
        let mut idx = self.entities[0].next;
        while idx != tail {
            let entity = &self.entities[idx as usize];
            if self.names.matches(entity.name, name) {
                return idx;
            }
            idx = entity.next;
        }
        idx
    }

    /// [`find`](EntityList::find) as an `Option`.
    pub fn lookup(&self, name: &str) -> Option<EntityIndex> {
        let idx = self.find(name);
        (idx != self.tail()).then_some(EntityIndex(idx))
    }

    /// Resolve `name` or report it missing.
    pub fn require(&self, name: &str) -> Result<EntityIndex, RegistryError> {
        self.lookup(name).ok_or_else(|| RegistryError::NotFound {
            name: name.to_string(),
        })
    }

    /// Add an entity named `name` right after the head sentinel.
    ///
    /// The name is copied in. The slot's participation mask is cleared and
    /// its payload reset to the list template in place.
    pub fn add(&mut self, name: &str) -> Result<EntityIndex, RegistryError> {
        if self.lookup(name).is_some() {
            return Err(RegistryError::DuplicateName {
                name: name.to_string(),
            });
        }
        let idx = self.first_free;
        if idx == self.tail() {
            return Err(RegistryError::ListFull { capacity: self.len });
        }
        let slot = self.names.insert(name)?;
        self.first_free = self.entities[idx as usize].next;

        let old_first = self.entities[0].next;
        self.entities[0].next = idx;
        self.entities[old_first as usize].prev = idx;

        let entity = &mut self.entities[idx as usize];
        entity.prev = 0;
        entity.next = old_first;
        entity.name = slot;
        entity.participation.clear();
        entity.data.clone_from(&self.template);

        debug!("added '{name}' at index {idx}");
        Ok(EntityIndex(idx))
    }

    /// Give the entity at `index` a new name, in place.
    ///
    /// Renaming to the entity's current name is allowed.
    pub fn rename(&mut self, index: EntityIndex, name: &str) -> Result<(), RegistryError> {
        if !self.is_active(index) {
            return Err(RegistryError::NotActive { index });
        }
        let existing = self.find(name);
        if existing != self.tail() && existing != index.0 {
            return Err(RegistryError::DuplicateName {
                name: name.to_string(),
            });
        }
        let slot = self.names.insert(name)?;
        let old = std::mem::replace(&mut self.entities[index.0 as usize].name, slot);
        debug!("renamed '{}' to '{name}' at index {index}", self.names.get(old));
        self.names.release(old);
        Ok(())
    }

    /// Remove the entity named `name` and withdraw it from every
    /// counterpart in `other`.
    ///
    /// Each affected counterpart loses this entity's bit and rebuilds its
    /// derived state before this returns.
    pub fn remove<O: EntityData>(
        &mut self,
        other: &mut EntityList<O>,
        name: &str,
    ) -> Result<EntityIndex, RegistryError> {
        let index = self.require(name)?;
        let participation = self.entities[index.0 as usize].participation;

        for counterpart in participation {
            if let Some(entity) = other.get_mut(counterpart) {
                entity.participation.remove(index);
                let mask = entity.participation;
                entity.data.participation_changed(mask);
            }
        }

        let (prev, next) = {
            let entity = &self.entities[index.0 as usize];
            (entity.prev, entity.next)
        };
        self.entities[prev as usize].next = next;
        self.entities[next as usize].prev = prev;

        let entity = &mut self.entities[index.0 as usize];
        entity.next = self.first_free;
        entity.prev = FREE;
        entity.participation.clear();
        let slot = std::mem::replace(&mut entity.name, NO_NAME);
        self.names.release(slot);
        self.first_free = index.0;

        debug!(
            "removed '{name}' from index {index}, withdrew from {} counterparts",
            participation.len()
        );
        Ok(index)
    }

    /// Number of active entities, by walking the active chain.
    pub fn count(&self) -> u32 {
        let tail = self.tail();
        let mut idx = self.entities[0].next;
        let mut count = 0;
        while idx != tail {
            idx = self.entities[idx as usize].next;
            count += 1;
        }
        count
    }

    /// Returns `true` if no entity is active.
    pub fn is_empty(&self) -> bool {
        self.entities[0].next == self.tail()
    }

    /// Whether `index` holds an active entity.
    pub fn is_active(&self, index: EntityIndex) -> bool {
        index.0 != 0 && index.0 < self.tail() && self.entities[index.0 as usize].prev != FREE
    }

    /// The active entity at `index`.
    pub fn get(&self, index: EntityIndex) -> Option<&Entity<D>> {
        self.is_active(index)
            .then(|| &self.entities[index.0 as usize])
    }

    /// The active entity named `name`.
    pub fn by_name(&self, name: &str) -> Option<&Entity<D>> {
        self.lookup(name).map(|index| &self.entities[index.0 as usize])
    }

    /// Name of the active entity at `index`.
    pub fn name(&self, index: EntityIndex) -> Option<&str> {
        self.get(index).map(|entity| self.names.get(entity.name))
    }

    /// Name of `entity`, which must belong to this list. Empty for
    /// sentinels and free slots.
    pub fn name_of(&self, entity: &Entity<D>) -> &str {
        self.names.get(entity.name)
    }

    /// The list's name store.
    pub fn names(&self) -> &NameTable {
        &self.names
    }

    /// Active entities, most recently added first.
    pub fn iter(&self) -> Iter<'_, D> {
        Iter {
            list: self,
            idx: self.entities[0].next,
        }
    }

    /// Raw slot access, sentinels and free slots included.
    pub fn slots(&self) -> &[Entity<D>] {
        &self.entities
    }

    /// Mutable access to the active entity at `index`.
    ///
    /// Links, name, and participation stay private to the list; this only
    /// reaches the payload's own operations.
    pub fn get_mut(&mut self, index: EntityIndex) -> Option<&mut Entity<D>> {
        if self.is_active(index) {
            Some(&mut self.entities[index.0 as usize])
        } else {
            None
        }
    }
}

fn check_capacity(capacity: u32) -> Result<(), RegistryError> {
    if !(3..=MAX_ENTITIES).contains(&capacity) {
        return Err(RegistryError::InvalidCapacity {
            requested: capacity,
        });
    }
    Ok(())
}

/// Iterator over the active chain of an [`EntityList`].
pub struct Iter<'a, D> {
    list: &'a EntityList<D>,
    idx: u32,
}

impl<'a, D> Iterator for Iter<'a, D> {
    type Item = (EntityIndex, &'a Entity<D>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx == self.list.len - 1 {
            return None;
        }
        let idx = self.idx;
        let entity = &self.list.entities[idx as usize];
        self.idx = entity.next;
        Some((EntityIndex(idx), entity))
    }
}
