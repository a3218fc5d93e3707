//! Reusable registry fixtures.
//!
//! - [`DEMO_PLAYERS`] / [`DEMO_EVENTS`]: a small office roster.
//! - [`demo_olympiad`]: that roster with a few registrations.
//! - [`olympiad_with`] / [`register_all`]: build arbitrary scenarios.
//! - [`numbered_names`]: generated names for capacity tests.

use olympiad_core::RegistryError;
use olympiad_registry::{Olympiad, OlympiadConfig};

/// Players of the demo roster, in insertion order.
pub const DEMO_PLAYERS: [&str; 17] = [
    "Alice", "Bob", "Charlie", "Player01", "Player02", "Player03", "Player04", "Player05",
    "Player06", "Player07", "Player08", "Player09", "Player10", "Player11", "Player12",
    "Player13", "Player14",
];

/// Events of the demo roster, in insertion order.
pub const DEMO_EVENTS: [&str; 4] = ["Tennis", "Chess", "Ping Pong", "Darts"];

/// Build a registry with default config holding `players` and `events`.
///
/// # Panics
///
/// Panics if a name repeats or a list overflows.
pub fn olympiad_with(players: &[&str], events: &[&str]) -> Olympiad {
    let mut olympiad = Olympiad::new(OlympiadConfig::default()).expect("default config is valid");
    for &name in players {
        olympiad.add_player(name).expect("fixture player added");
    }
    for &name in events {
        olympiad.add_event(name).expect("fixture event added");
    }
    olympiad
}

/// Register every player in `players` for `event`.
pub fn register_all(
    olympiad: &mut Olympiad,
    players: &[&str],
    event: &str,
) -> Result<(), RegistryError> {
    players
        .iter()
        .try_for_each(|player| olympiad.register(player, event))
}

/// The demo roster: Alice plays Tennis and Chess, Bob plays Tennis,
/// Charlie plays Chess.
pub fn demo_olympiad() -> Olympiad {
    let mut olympiad = olympiad_with(&DEMO_PLAYERS, &DEMO_EVENTS);
    for (player, event) in [
        ("Alice", "Tennis"),
        ("Alice", "Chess"),
        ("Bob", "Tennis"),
        ("Charlie", "Chess"),
    ] {
        olympiad
            .register(player, event)
            .expect("demo registration");
    }
    olympiad
}

/// `count` distinct names `"{prefix}01"`, `"{prefix}02"`, ...
pub fn numbered_names(prefix: &str, count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("{prefix}{i:02}")).collect()
}
