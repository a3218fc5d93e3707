//! Test fixtures for Olympiad development.
//!
//! Provides ready-made rosters and registries so tests can start from a
//! populated [`Olympiad`](olympiad_registry::Olympiad) instead of repeating
//! the same setup calls.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    demo_olympiad, numbered_names, olympiad_with, register_all, DEMO_EVENTS, DEMO_PLAYERS,
};
