//! Error types for registry operations.
//!
//! Every precondition the registry checks (unique names, list capacity,
//! lifecycle phase, group settings) maps to one variant here. Callers that
//! validate input before calling in never observe them.

use std::error::Error;
use std::fmt;

use crate::id::EntityIndex;
use crate::tournament::{Format, Phase};

/// Errors from entity-list, relation, and tournament operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// List capacity outside `3..=MAX_ENTITIES` (two sentinels plus one slot).
    InvalidCapacity {
        /// The requested capacity.
        requested: u32,
    },
    /// An active entity already holds this name.
    DuplicateName {
        /// The conflicting name.
        name: String,
    },
    /// No active entity holds this name.
    NotFound {
        /// The name that was looked up.
        name: String,
    },
    /// The name does not fit a name slot.
    NameTooLong {
        /// Length of the rejected name in bytes.
        len: usize,
        /// Longest name accepted, in bytes.
        max: usize,
    },
    /// The name store could not be carved from its region.
    NameStorage {
        /// What the region reported.
        reason: String,
    },
    /// The free list is exhausted.
    ListFull {
        /// Capacity of the list, sentinels included.
        capacity: u32,
    },
    /// The index is a sentinel, out of range, or on the free list.
    NotActive {
        /// The offending index.
        index: EntityIndex,
    },
    /// Group size or qualifiers-per-group outside the permitted range.
    InvalidGroupSettings {
        /// Requested group size.
        group_size: u8,
        /// Requested qualifiers per group.
        advance_per_group: u8,
    },
    /// The operation is not permitted in the event's current phase.
    WrongPhase {
        /// Phase the operation requires.
        expected: Phase,
        /// Phase the event is in.
        actual: Phase,
    },
    /// The operation requires a different competition format.
    WrongFormat {
        /// The event's format.
        format: Format,
    },
    /// Fewer than two participants are registered.
    NotEnoughParticipants {
        /// Registered participant count.
        count: usize,
    },
    /// Bracket position is the root, out of range, or empty.
    InvalidBracketPosition {
        /// The offending bracket cell.
        position: usize,
    },
    /// Group match coordinates do not address two distinct filled slots.
    InvalidMatch {
        /// Group index.
        group: usize,
        /// Row (self) slot.
        row: usize,
        /// Column (opponent) slot.
        col: usize,
    },
    /// The player is not registered for the event.
    NotParticipant {
        /// The player's index.
        index: EntityIndex,
    },
    /// The participant has not been dealt into a group.
    NotGrouped {
        /// The participant's index.
        index: EntityIndex,
    },
    /// The bracket root is empty.
    NoChampion,
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCapacity { requested } => {
                write!(f, "invalid list capacity {requested}")
            }
            Self::DuplicateName { name } => write!(f, "name '{name}' is already taken"),
            Self::NotFound { name } => write!(f, "no entity named '{name}'"),
            Self::NameTooLong { len, max } => {
                write!(f, "name of {len} bytes exceeds the {max}-byte limit")
            }
            Self::NameStorage { reason } => write!(f, "name storage unavailable: {reason}"),
            Self::ListFull { capacity } => {
                write!(f, "entity list full: capacity {capacity} (including sentinels)")
            }
            Self::NotActive { index } => write!(f, "index {index} is not an active entity"),
            Self::InvalidGroupSettings {
                group_size,
                advance_per_group,
            } => {
                write!(
                    f,
                    "invalid group settings: size {group_size}, advancing {advance_per_group}"
                )
            }
            Self::WrongPhase { expected, actual } => {
                write!(f, "operation requires {expected} phase, event is in {actual} phase")
            }
            Self::WrongFormat { format } => {
                write!(f, "operation not available for {format} format")
            }
            Self::NotEnoughParticipants { count } => {
                write!(f, "need at least 2 participants, have {count}")
            }
            Self::InvalidBracketPosition { position } => {
                write!(f, "invalid bracket position {position}")
            }
            Self::InvalidMatch { group, row, col } => {
                write!(f, "invalid match: group {group}, slots {row} vs {col}")
            }
            Self::NotParticipant { index } => {
                write!(f, "player {index} is not registered for this event")
            }
            Self::NotGrouped { index } => write!(f, "participant {index} is not in any group"),
            Self::NoChampion => write!(f, "bracket has no champion yet"),
        }
    }
}

impl Error for RegistryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_conflict() {
        let err = RegistryError::DuplicateName {
            name: "Alice".into(),
        };
        assert_eq!(err.to_string(), "name 'Alice' is already taken");
    }

    #[test]
    fn display_phase_mismatch() {
        let err = RegistryError::WrongPhase {
            expected: Phase::Registration,
            actual: Phase::Knockout,
        };
        assert_eq!(
            err.to_string(),
            "operation requires registration phase, event is in knockout phase"
        );
    }
}
