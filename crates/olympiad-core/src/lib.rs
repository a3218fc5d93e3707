//! Core types for the Olympiad registry.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! shared vocabulary of the workspace: entity indices, the 64-bit
//! participation mask and its seed-order iteration, tournament enums,
//! capacity constants, and the registry error type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod mask;
pub mod tournament;

pub use error::RegistryError;
pub use id::{EntityIndex, Seeds};
pub use mask::{MaskIter, ParticipationMask};
pub use tournament::{Format, MatchResult, Medal, Phase};

/// Maximum number of slots in an entity list, sentinels included.
///
/// Tied to the width of [`ParticipationMask`]: every entity index must be
/// usable directly as a bit position.
pub const MAX_ENTITIES: u32 = u64::BITS;

/// Longest entity name in bytes.
///
/// Each name lives in one fixed slot: a length byte followed by the
/// name, so the limit is what a `u8` length can describe.
pub const MAX_NAME_LEN: usize = u8::MAX as usize;

/// Bytes per name slot.
pub const NAME_SLOT_BYTES: usize = MAX_NAME_LEN + 1;

/// Number of cells in a bracket tree.
///
/// A full tree whose leaf row can hold [`MAX_ENTITIES`] entrants.
pub const BRACKET_CELLS: usize = 2 * MAX_ENTITIES as usize - 1;

/// Smallest configurable group size.
pub const MIN_GROUP_SIZE: u8 = 2;

/// Largest configurable group size.
pub const MAX_GROUP_SIZE: u8 = 8;

/// Slots per group: one more than [`MAX_GROUP_SIZE`] so a distributed
/// leftover participant always fits.
pub const GROUP_SLOTS: usize = MAX_GROUP_SIZE as usize + 1;

/// Upper bound on the number of groups (every group holds at least two).
pub const MAX_GROUPS: usize = MAX_ENTITIES as usize / MIN_GROUP_SIZE as usize;

/// Group size given to newly added events.
pub const DEFAULT_GROUP_SIZE: u8 = 4;

/// Qualifiers per group given to newly added events.
pub const DEFAULT_ADVANCE_PER_GROUP: u8 = 2;

/// Marker in the participant-to-group reverse map for "not grouped".
pub const GROUP_NONE: u8 = u8::MAX;
