//! Entity lists, the participation relation, and tournament structures.
//!
//! The registry holds two fixed-capacity [`EntityList`]s, players and
//! events, linked by a symmetric participation relation stored as one
//! 64-bit mask per entity. Each event derives its groups and brackets from
//! its mask and rebuilds them whenever the mask or its settings change.
//!
//! # Architecture
//!
//! ```text
//! Olympiad (facade)
//! ├── EntityList<PlayerData>   players, sentinels at 0 and capacity-1
//! ├── EntityList<EventData>    events
//! │   └── EventData
//! │       ├── Bracket          direct single-elimination tree
//! │       └── GroupPhase       round-robin groups + qualifiers' Bracket
//! ├── NameTable (per list)     owned name slots in an arena Region
//! └── relation                 register / unregister (both masks, then rebuild)
//! ```
//!
//! [`EntityData`] is the seam between the list machinery and the payload:
//! the lists call it whenever participation changes, and the event payload
//! answers by rebuilding its derived state.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bracket;
pub mod config;
pub mod entity;
pub mod event;
pub mod groups;
pub mod list;
pub mod names;
pub mod olympiad;
pub mod relation;
pub mod standings;

pub use bracket::Bracket;
pub use config::OlympiadConfig;
pub use entity::{Entity, EntityData, Player, PlayerData};
pub use event::{Event, EventData};
pub use groups::{GroupPhase, MatchScore};
pub use list::EntityList;
pub use names::NameTable;
pub use olympiad::Olympiad;
pub use standings::{Standing, Standings};
