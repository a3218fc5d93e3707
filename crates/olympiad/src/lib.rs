//! Olympiad: a participant and tournament registry for a multi-event
//! office olympics.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Olympiad sub-crates. For most users, adding `olympiad` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use olympiad::prelude::*;
//!
//! let mut games = Olympiad::new(OlympiadConfig::default()).unwrap();
//! for name in ["Alice", "Bob", "Charlie"] {
//!     games.add_player(name).unwrap();
//! }
//! games.add_event("Tennis").unwrap();
//! games.register("Alice", "Tennis").unwrap();
//! games.register("Bob", "Tennis").unwrap();
//!
//! let tennis = games.event("Tennis").unwrap();
//! assert_eq!(tennis.participation().len(), 2);
//! // Two entrants meet directly in the final.
//! assert_eq!(tennis.data().bracket().get(1), games.find_player("Alice"));
//! assert_eq!(tennis.data().bracket().get(2), games.find_player("Bob"));
//!
//! games.start("Tennis").unwrap();
//! let bob = games.advance_winner("Tennis", 2).unwrap();
//! assert_eq!(games.finish("Tennis"), Ok(bob));
//! assert_eq!(games.player_name(bob), Some("Bob"));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `olympiad-core` | Indices, participation masks, tournament enums, errors |
//! | [`arena`] | `olympiad-arena` | Regions, scratch sets, slot pools, string helpers |
//! | [`registry`] | `olympiad-registry` | Entity lists, relation, brackets, groups, the facade |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and constants (`olympiad-core`).
///
/// Contains [`types::EntityIndex`], [`types::ParticipationMask`], the
/// lifecycle enums, and [`types::RegistryError`].
pub use olympiad_core as types;

/// Region allocation and string helpers (`olympiad-arena`).
///
/// The registry keeps its names in [`arena::Region`]s through
/// [`registry::NameTable`]; [`arena::text`] cleans up typed input.
pub use olympiad_arena as arena;

/// Entity lists, participation, and tournament structures
/// (`olympiad-registry`).
pub use olympiad_registry as registry;

/// Common imports for typical Olympiad usage.
///
/// ```rust
/// use olympiad::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use olympiad_core::{
        EntityIndex, Format, MatchResult, Medal, ParticipationMask, Phase, RegistryError,
    };

    // Registry
    pub use olympiad_registry::{
        Bracket, EntityList, Event, GroupPhase, MatchScore, NameTable, Olympiad, OlympiadConfig,
        Player,
        Standing,
    };

    // Arena
    pub use olympiad_arena::{Region, RegionConfig, ScratchConfig, ScratchSet};
}
