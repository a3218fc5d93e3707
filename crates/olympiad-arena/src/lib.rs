//! Region, scratch, and slot-pool allocation for the Olympiad registry.
//!
//! All memory handed out by this crate comes from fixed-size blocks that are
//! allocated once and never grow. Individual allocations are never freed;
//! a region is released wholesale by rewinding to a checkpoint.
//!
//! # Architecture
//!
//! ```text
//! Region (bump allocator over one Vec<u8>, header prefix reserved)
//! ├── Span handles (offset, len) resolved through the region
//! ├── TempRegion guard (checkpoint, rewind on drop)
//! ├── SlotPool (fixed-size slots, free list threaded through slot bytes)
//! │   └── PoolList (sentinel-headed singly-linked list of u32 values)
//! └── text helpers (dup, cat, from_u32) writing into a region
//!
//! ScratchSet (explicit context, N regions)
//! └── ScratchGuard (first region not in the caller's conflict set)
//! ```
//!
//! The crate contains no `unsafe` code: a [`Span`] is the stand-in for a raw
//! pointer, and every access is bounds-checked against the region's cursor.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod handle;
pub mod list;
pub mod pool;
pub mod region;
pub mod scratch;
pub mod text;

pub use config::{RegionConfig, ScratchConfig};
pub use error::ArenaError;
pub use handle::{RegionId, Span};
pub use list::PoolList;
pub use pool::SlotPool;
pub use region::{Region, TempRegion};
pub use scratch::{ScratchGuard, ScratchSet};
