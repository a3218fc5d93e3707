//! Integration test: participation invariants under random churn.
//!
//! Drives a registry through random add/remove/register/unregister
//! sequences (with events started along the way) and checks after every
//! step that both sides of the relation agree and that no mask names a
//! dead entity. Every event's brackets and groups must match a fresh
//! rebuild from its mask, and no event may be in play with fewer than two
//! participants.

use olympiad_core::{ParticipationMask, Phase};
use olympiad_registry::{Bracket, GroupPhase, Olympiad, OlympiadConfig};
use proptest::prelude::*;

const PLAYERS: [&str; 10] = [
    "Aldo", "Giovanni", "Giacomo", "Lucia", "Antonia", "Tommaso", "Emilia", "Maya", "Marco",
    "Sofia",
];
const EVENTS: [&str; 4] = ["Tennis", "Chess", "Darts", "Bocce"];

#[derive(Clone, Debug)]
enum Op {
    AddPlayer(usize),
    RemovePlayer(usize),
    AddEvent(usize),
    RemoveEvent(usize),
    Register(usize, usize),
    Unregister(usize, usize),
    Start(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..PLAYERS.len()).prop_map(Op::AddPlayer),
        (0..PLAYERS.len()).prop_map(Op::RemovePlayer),
        (0..EVENTS.len()).prop_map(Op::AddEvent),
        (0..EVENTS.len()).prop_map(Op::RemoveEvent),
        (0..PLAYERS.len(), 0..EVENTS.len()).prop_map(|(p, e)| Op::Register(p, e)),
        (0..PLAYERS.len(), 0..EVENTS.len()).prop_map(|(p, e)| Op::Unregister(p, e)),
        (0..EVENTS.len()).prop_map(Op::Start),
    ]
}

fn apply(o: &mut Olympiad, op: &Op) {
    // Failures (duplicates, missing names, full lists) are expected noise.
    let _ = match *op {
        Op::AddPlayer(p) => o.add_player(PLAYERS[p]).map(drop),
        Op::RemovePlayer(p) => o.remove_player(PLAYERS[p]).map(drop),
        Op::AddEvent(e) => o.add_event(EVENTS[e]).map(drop),
        Op::RemoveEvent(e) => o.remove_event(EVENTS[e]).map(drop),
        Op::Register(p, e) => o.register(PLAYERS[p], EVENTS[e]),
        Op::Unregister(p, e) => o.unregister(PLAYERS[p], EVENTS[e]),
        Op::Start(e) => o.start(EVENTS[e]).map(drop),
    };
}

fn check(o: &Olympiad) -> Result<(), TestCaseError> {
    for (pi, player) in o.players().iter() {
        for ei in player.participation() {
            let event = o.events().get(ei);
            prop_assert!(event.is_some(), "player {} names dead event {}", pi, ei);
            prop_assert!(event.is_some_and(|e| e.participation().contains(pi)));
        }
    }
    for (ei, event) in o.events().iter() {
        let mask: ParticipationMask = event.participation();
        for pi in mask {
            let player = o.players().get(pi);
            prop_assert!(player.is_some(), "event {} names dead player {}", ei, pi);
            prop_assert!(player.is_some_and(|p| p.participation().contains(ei)));
        }
        let mut fresh = Bracket::new();
        fresh.construct(&mask.seeds());
        prop_assert_eq!(event.data().bracket(), &fresh);

        let groups = event.data().groups();
        let mut fresh_groups =
            GroupPhase::with_settings(groups.group_size(), groups.advance_per_group()).unwrap();
        fresh_groups.construct(&mask.seeds());
        fresh_groups.populate_bracket();
        prop_assert_eq!(groups, &fresh_groups);
        let grouped: usize = (0..groups.num_groups()).map(|g| groups.group_len(g)).sum();
        prop_assert_eq!(grouped, mask.len());

        if event.data().phase() != Phase::Registration {
            prop_assert!(mask.len() >= 2, "event {} in play with {} entrants", ei, mask.len());
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn relation_stays_symmetric(ops in prop::collection::vec(op(), 1..120)) {
        let mut o = Olympiad::new(OlympiadConfig::new(10, 5)).unwrap();
        for op in &ops {
            apply(&mut o, op);
            check(&o)?;
        }
    }

    #[test]
    fn register_then_unregister_restores_masks(
        setup in prop::collection::vec((0..PLAYERS.len(), 0..EVENTS.len()), 0..20),
        p in 0..PLAYERS.len(),
        e in 0..EVENTS.len(),
    ) {
        let mut o = Olympiad::new(OlympiadConfig::default()).unwrap();
        for name in PLAYERS {
            o.add_player(name).unwrap();
        }
        for name in EVENTS {
            o.add_event(name).unwrap();
        }
        for &(sp, se) in &setup {
            o.register(PLAYERS[sp], EVENTS[se]).unwrap();
        }
        prop_assume!(!o.is_registered(PLAYERS[p], EVENTS[e]).unwrap());

        let player_before = o.player(PLAYERS[p]).unwrap().participation();
        let event_before = o.event(EVENTS[e]).unwrap().participation();
        o.register(PLAYERS[p], EVENTS[e]).unwrap();
        o.unregister(PLAYERS[p], EVENTS[e]).unwrap();
        prop_assert_eq!(o.player(PLAYERS[p]).unwrap().participation(), player_before);
        prop_assert_eq!(o.event(EVENTS[e]).unwrap().participation(), event_before);
    }

    #[test]
    fn count_is_adds_minus_removes(ops in prop::collection::vec((0..PLAYERS.len(), any::<bool>()), 1..100)) {
        let mut o = Olympiad::new(OlympiadConfig::default()).unwrap();
        let mut live = std::collections::BTreeSet::new();
        for (p, add) in ops {
            if add {
                if o.add_player(PLAYERS[p]).is_ok() {
                    live.insert(p);
                }
            } else if o.remove_player(PLAYERS[p]).is_ok() {
                live.remove(&p);
            }
            prop_assert_eq!(o.player_count() as usize, live.len());
            for &l in &live {
                prop_assert!(o.find_player(PLAYERS[l]).is_some());
            }
        }
    }
}
