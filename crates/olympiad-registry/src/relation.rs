//! The participation relation between two entity lists.
//!
//! Registration is stored twice, once in each side's mask, and the two
//! copies always agree. Both names are resolved before either mask is
//! touched, so a failed call changes nothing.

use log::debug;
use olympiad_core::{EntityIndex, ParticipationMask, RegistryError};

use crate::entity::EntityData;
use crate::list::EntityList;

/// Register the entity `left_name` of `left` with `right_name` of `right`.
///
/// Registering an existing pair is a no-op apart from the rebuild.
pub fn register<L: EntityData, R: EntityData>(
    left: &mut EntityList<L>,
    right: &mut EntityList<R>,
    left_name: &str,
    right_name: &str,
) -> Result<(EntityIndex, EntityIndex), RegistryError> {
    let (l, r) = resolve(left, right, left_name, right_name)?;
    update(left, right, l, r, true);
    debug!("registered '{left_name}' ({l}) with '{right_name}' ({r})");
    Ok((l, r))
}

/// Undo [`register`]. Unregistering a pair that is not registered is a
/// no-op apart from the rebuild.
pub fn unregister<L: EntityData, R: EntityData>(
    left: &mut EntityList<L>,
    right: &mut EntityList<R>,
    left_name: &str,
    right_name: &str,
) -> Result<(EntityIndex, EntityIndex), RegistryError> {
    let (l, r) = resolve(left, right, left_name, right_name)?;
    update(left, right, l, r, false);
    debug!("unregistered '{left_name}' ({l}) from '{right_name}' ({r})");
    Ok((l, r))
}

/// Whether the two named entities are registered with each other.
pub fn is_registered<L: EntityData, R: EntityData>(
    left: &EntityList<L>,
    right: &EntityList<R>,
    left_name: &str,
    right_name: &str,
) -> Result<bool, RegistryError> {
    let (l, r) = resolve(left, right, left_name, right_name)?;
    let forward = left
        .get(l)
        .is_some_and(|e| e.participation().contains(r));
    debug_assert_eq!(
        forward,
        right.get(r).is_some_and(|e| e.participation().contains(l)),
        "participation masks disagree for {l} and {r}"
    );
    Ok(forward)
}

fn resolve<L: EntityData, R: EntityData>(
    left: &EntityList<L>,
    right: &EntityList<R>,
    left_name: &str,
    right_name: &str,
) -> Result<(EntityIndex, EntityIndex), RegistryError> {
    Ok((left.require(left_name)?, right.require(right_name)?))
}

fn update<L: EntityData, R: EntityData>(
    left: &mut EntityList<L>,
    right: &mut EntityList<R>,
    l: EntityIndex,
    r: EntityIndex,
    registered: bool,
) {
    if let Some(entity) = left.get_mut(l) {
        set(&mut entity.participation, r, registered);
        let mask = entity.participation;
        entity.data.participation_changed(mask);
    }
    if let Some(entity) = right.get_mut(r) {
        set(&mut entity.participation, l, registered);
        let mask = entity.participation;
        entity.data.participation_changed(mask);
    }
}

fn set(mask: &mut ParticipationMask, index: EntityIndex, on: bool) {
    if on {
        mask.insert(index);
    } else {
        mask.remove(index);
    }
}
