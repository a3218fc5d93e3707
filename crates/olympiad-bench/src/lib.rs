//! Benchmark profiles and utilities for the Olympiad registry.
//!
//! - [`roster`]: generated player and event names.
//! - [`churn_profile`]: a deterministic add/remove/register sequence.
//! - [`apply`]: run one step of a profile against a registry.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use olympiad_core::RegistryError;
use olympiad_registry::Olympiad;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One registry mutation, addressed by roster position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChurnOp {
    /// Add the player at this roster position.
    AddPlayer(usize),
    /// Remove the player at this roster position.
    RemovePlayer(usize),
    /// Register player for event.
    Register(usize, usize),
    /// Unregister player from event.
    Unregister(usize, usize),
}

/// `count` names `"{prefix}00"`, `"{prefix}01"`, ...
pub fn roster(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{prefix}{i:02}")).collect()
}

/// Generate `len` churn operations over `players` players and `events`
/// events from `seed`. Registrations outnumber structural changes about
/// three to one, matching a registration desk on a busy morning.
pub fn churn_profile(seed: u64, len: usize, players: usize, events: usize) -> Vec<ChurnOp> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut pick = |n: usize| (rng.next_u32() as usize) % n.max(1);
    (0..len)
        .map(|_| match pick(8) {
            0 => ChurnOp::AddPlayer(pick(players)),
            1 => ChurnOp::RemovePlayer(pick(players)),
            2..=5 => ChurnOp::Register(pick(players), pick(events)),
            _ => ChurnOp::Unregister(pick(players), pick(events)),
        })
        .collect()
}

/// Apply `op`, resolving positions through `players` and `events`.
pub fn apply(
    olympiad: &mut Olympiad,
    players: &[String],
    events: &[String],
    op: ChurnOp,
) -> Result<(), RegistryError> {
    match op {
        ChurnOp::AddPlayer(p) => olympiad.add_player(&players[p]).map(drop),
        ChurnOp::RemovePlayer(p) => olympiad.remove_player(&players[p]).map(drop),
        ChurnOp::Register(p, e) => olympiad.register(&players[p], &events[e]),
        ChurnOp::Unregister(p, e) => olympiad.unregister(&players[p], &events[e]),
    }
}
