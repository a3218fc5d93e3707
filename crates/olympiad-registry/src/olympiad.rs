//! The registry facade: a player list, an event list, and the relation
//! between them.

use log::debug;
use olympiad_core::{EntityIndex, Format, Medal, Phase, RegistryError};

use crate::config::OlympiadConfig;
use crate::entity::{Player, PlayerData};
use crate::event::{Event, EventData};
use crate::groups::MatchScore;
use crate::list::EntityList;
use crate::relation;

/// Players, events, and who takes part in what.
///
/// Names are copied into each list's [`NameTable`](crate::NameTable), so
/// any `&str` will do, including a reused input buffer.
///
/// Every mutation leaves each affected event's groups and brackets
/// rebuilt before returning.
#[derive(Clone, Debug)]
pub struct Olympiad {
    config: OlympiadConfig,
    players: EntityList<PlayerData>,
    events: EntityList<EventData>,
}

impl Olympiad {
    /// Create an empty registry.
    pub fn new(config: OlympiadConfig) -> Result<Self, RegistryError> {
        config.validate()?;
        let players = EntityList::new(config.player_capacity)?;
        let events = EntityList::with_template(config.event_capacity, config.event_template()?)?;
        debug!(
            "olympiad created: {} player slots, {} event slots",
            config.max_players(),
            config.max_events()
        );
        Ok(Self {
            config,
            players,
            events,
        })
    }

    /// The configuration this registry was built with.
    pub fn config(&self) -> &OlympiadConfig {
        &self.config
    }

    /// All players.
    pub fn players(&self) -> &EntityList<PlayerData> {
        &self.players
    }

    /// All events.
    pub fn events(&self) -> &EntityList<EventData> {
        &self.events
    }

    // ── Players ─────────────────────────────────────────────────

    /// Add a player.
    pub fn add_player(&mut self, name: &str) -> Result<EntityIndex, RegistryError> {
        self.players.add(name)
    }

    /// Index of the player named `name`.
    pub fn find_player(&self, name: &str) -> Option<EntityIndex> {
        self.players.lookup(name)
    }

    /// The player named `name`.
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.by_name(name)
    }

    /// Rename a player in place; registrations are untouched.
    pub fn rename_player(&mut self, name: &str, new_name: &str) -> Result<(), RegistryError> {
        let index = self.players.require(name)?;
        self.players.rename(index, new_name)
    }

    /// Remove a player, withdrawing them from every event. Medals they
    /// held are withdrawn too.
    pub fn remove_player(&mut self, name: &str) -> Result<EntityIndex, RegistryError> {
        self.players.remove(&mut self.events, name)
    }

    /// Number of players.
    pub fn player_count(&self) -> u32 {
        self.players.count()
    }

    // ── Events ──────────────────────────────────────────────────

    /// Add an event in the registration phase with the configured group
    /// settings.
    pub fn add_event(&mut self, name: &str) -> Result<EntityIndex, RegistryError> {
        self.events.add(name)
    }

    /// Index of the event named `name`.
    pub fn find_event(&self, name: &str) -> Option<EntityIndex> {
        self.events.lookup(name)
    }

    /// The event named `name`.
    pub fn event(&self, name: &str) -> Option<&Event> {
        self.events.by_name(name)
    }

    /// Rename an event in place.
    pub fn rename_event(&mut self, name: &str, new_name: &str) -> Result<(), RegistryError> {
        let index = self.events.require(name)?;
        self.events.rename(index, new_name)
    }

    /// Remove an event, withdrawing every participant from it.
    pub fn remove_event(&mut self, name: &str) -> Result<EntityIndex, RegistryError> {
        self.events.remove(&mut self.players, name)
    }

    /// Number of events.
    pub fn event_count(&self) -> u32 {
        self.events.count()
    }

    // ── Participation ───────────────────────────────────────────

    /// Register `player` for `event` and rebuild the event. Registration
    /// phase only.
    pub fn register(&mut self, player: &str, event: &str) -> Result<(), RegistryError> {
        self.require_registration(event)?;
        relation::register(&mut self.players, &mut self.events, player, event).map(drop)
    }

    /// Withdraw `player` from `event` and rebuild the event. Registration
    /// phase only; removing the player altogether reopens registration
    /// instead.
    pub fn unregister(&mut self, player: &str, event: &str) -> Result<(), RegistryError> {
        self.require_registration(event)?;
        relation::unregister(&mut self.players, &mut self.events, player, event).map(drop)
    }

    /// Whether `player` is registered for `event`.
    pub fn is_registered(&self, player: &str, event: &str) -> Result<bool, RegistryError> {
        relation::is_registered(&self.players, &self.events, player, event)
    }

    /// Names of the participants of `event`, in seed order.
    pub fn participants(&self, event: &str) -> Result<Vec<&str>, RegistryError> {
        let event = self.event_ref(event)?;
        Ok(event
            .participation()
            .iter()
            .filter_map(|index| self.players.name(index))
            .collect())
    }

    /// Name of the player at `index`, for rendering brackets and groups.
    pub fn player_name(&self, index: EntityIndex) -> Option<&str> {
        self.players.name(index)
    }

    // ── Event lifecycle ─────────────────────────────────────────

    /// Choose an event's format. Registration phase only.
    pub fn set_format(&mut self, event: &str, format: Format) -> Result<(), RegistryError> {
        self.event_mut(event)?.set_format(format)
    }

    /// Change an event's group size and regroup. Registration phase only.
    pub fn set_group_size(&mut self, event: &str, group_size: u8) -> Result<(), RegistryError> {
        self.event_mut(event)?.set_group_size(group_size)
    }

    /// Change how many finishers of each group qualify.
    pub fn set_advance_per_group(&mut self, event: &str, n: u8) -> Result<(), RegistryError> {
        self.event_mut(event)?.set_advance_per_group(n)
    }

    /// Close registration and start play. Returns the phase entered.
    pub fn start(&mut self, event: &str) -> Result<Phase, RegistryError> {
        self.event_mut(event)?.start()
    }

    /// Move a groups-then-knockout event on to its knockout.
    pub fn finish_group_phase(&mut self, event: &str) -> Result<(), RegistryError> {
        self.event_mut(event)?.finish_group_phase()
    }

    /// Reopen the group phase, discarding knockout progress.
    pub fn return_to_group_phase(&mut self, event: &str) -> Result<(), RegistryError> {
        self.event_mut(event)?.return_to_group_phase()
    }

    /// Reopen registration, discarding scores and knockout progress.
    pub fn return_to_registration(&mut self, event: &str) -> Result<(), RegistryError> {
        self.event_mut(event)?.return_to_registration();
        Ok(())
    }

    /// Close an event whose bracket has a champion. Returns the champion.
    pub fn finish(&mut self, event: &str) -> Result<EntityIndex, RegistryError> {
        self.event_mut(event)?.finish()
    }

    // ── Play ────────────────────────────────────────────────────

    /// Record a group match by group and local slots.
    pub fn record_score(
        &mut self,
        event: &str,
        group: usize,
        row: usize,
        col: usize,
        score: MatchScore,
    ) -> Result<(), RegistryError> {
        self.event_mut(event)?.record_score(group, row, col, score)
    }

    /// Record a group match between two named players. `score` is from
    /// `home`'s side.
    pub fn record_match(
        &mut self,
        event: &str,
        home: &str,
        away: &str,
        score: MatchScore,
    ) -> Result<(), RegistryError> {
        let home = self.players.require(home)?;
        let away = self.players.require(away)?;
        let entity = self.event_mut(event)?;
        let groups = entity.data().groups();
        let (group, row) = groups
            .locate(home)
            .ok_or(RegistryError::NotGrouped { index: home })?;
        let (other, col) = groups
            .locate(away)
            .ok_or(RegistryError::NotGrouped { index: away })?;
        if group != other {
            return Err(RegistryError::InvalidMatch { group, row, col });
        }
        entity.record_score(group, row, col, score)
    }

    /// Advance the entrant at `position` of the event's bracket in play.
    pub fn advance_winner(
        &mut self,
        event: &str,
        position: usize,
    ) -> Result<EntityIndex, RegistryError> {
        self.event_mut(event)?.advance_winner(position)
    }

    /// Take back the advancements of the entrant at `position`.
    pub fn undo_advance(&mut self, event: &str, position: usize) -> Result<(), RegistryError> {
        self.event_mut(event)?.undo_advance(position)
    }

    /// Award `medal` of `event` to `player`, who must be registered for it.
    pub fn assign_medal(
        &mut self,
        player: &str,
        event: &str,
        medal: Medal,
    ) -> Result<(), RegistryError> {
        let player = self.players.require(player)?;
        self.event_mut(event)?.assign_medal(medal, player)
    }

    /// Events in which `player` holds a medal, with the medal.
    pub fn medals_of(&self, player: &str) -> Result<Vec<(&str, Medal)>, RegistryError> {
        let player = self.players.require(player)?;
        Ok(self
            .events
            .iter()
            .flat_map(|(_, event)| {
                Medal::ALL
                    .into_iter()
                    .filter(move |&m| event.data().medal(m) == Some(player))
                    .map(move |m| (self.events.name_of(event), m))
            })
            .collect())
    }

    fn require_registration(&self, event: &str) -> Result<(), RegistryError> {
        let actual = self.event_ref(event)?.data().phase();
        if actual != Phase::Registration {
            return Err(RegistryError::WrongPhase {
                expected: Phase::Registration,
                actual,
            });
        }
        Ok(())
    }

    fn event_ref(&self, name: &str) -> Result<&Event, RegistryError> {
        self.events.by_name(name).ok_or_else(|| RegistryError::NotFound {
            name: name.to_string(),
        })
    }

    fn event_mut(&mut self, name: &str) -> Result<&mut Event, RegistryError> {
        let index = self.events.require(name)?;
        self.events
            .get_mut(index)
            .ok_or(RegistryError::NotActive { index })
    }
}
