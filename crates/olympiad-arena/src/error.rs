//! Arena-specific error types.

use std::error::Error;
use std::fmt;

use crate::handle::RegionId;

/// Errors that can occur during region, scratch, and pool operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The region block is exhausted.
    CapacityExceeded {
        /// Number of bytes requested.
        requested: usize,
        /// Bytes left after the cursor (before alignment).
        remaining: usize,
    },
    /// Alignment is zero or not a power of two.
    InvalidAlignment {
        /// The rejected alignment.
        align: usize,
    },
    /// The reserved header does not fit in the block.
    InvalidBlockSize {
        /// Requested block size.
        block_size: usize,
        /// Requested header size.
        header_size: usize,
    },
    /// Pool slots must be able to hold a free-list link.
    SlotTooSmall {
        /// The rejected slot size.
        slot_size: usize,
    },
    /// Every pool slot is live.
    PoolExhausted {
        /// Number of slots in the pool.
        capacity: u32,
    },
    /// Data pushed into a pool must be exactly one slot long.
    SlotSizeMismatch {
        /// The pool's slot size.
        expected: usize,
        /// Length of the data supplied.
        actual: usize,
    },
    /// Every scratch region is in the caller's conflict set.
    NoScratchAvailable {
        /// Number of regions the caller listed as held.
        conflicts: usize,
    },
    /// The selected scratch region is already checked out by a caller that
    /// did not list it as a conflict.
    ScratchAliased {
        /// The region that is already held.
        region: RegionId,
    },
    /// Bytes behind a span are not valid UTF-8.
    InvalidUtf8 {
        /// Offset of the span.
        offset: usize,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded {
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "region capacity exceeded: requested {requested} bytes, remaining {remaining} bytes"
                )
            }
            Self::InvalidAlignment { align } => {
                write!(f, "alignment {align} is not a power of two")
            }
            Self::InvalidBlockSize {
                block_size,
                header_size,
            } => {
                write!(
                    f,
                    "block of {block_size} bytes cannot hold a {header_size} byte header"
                )
            }
            Self::SlotTooSmall { slot_size } => {
                write!(f, "slot size {slot_size} cannot hold a free-list link")
            }
            Self::PoolExhausted { capacity } => {
                write!(f, "pool exhausted: all {capacity} slots are live")
            }
            Self::SlotSizeMismatch { expected, actual } => {
                write!(f, "slot data is {actual} bytes, pool slots are {expected} bytes")
            }
            Self::NoScratchAvailable { conflicts } => {
                write!(f, "no scratch region outside the {conflicts} conflicting regions")
            }
            Self::ScratchAliased { region } => {
                write!(f, "scratch region {region} is already checked out")
            }
            Self::InvalidUtf8 { offset } => {
                write!(f, "span at offset {offset} is not valid UTF-8")
            }
        }
    }
}

impl Error for ArenaError {}
