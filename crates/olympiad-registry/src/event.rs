//! Event payload and tournament lifecycle.
//!
//! An event's derived state (groups, the direct bracket, and the
//! qualifiers' bracket) is a pure function of its participation mask and
//! group settings, plus recorded group scores. Every change to the mask
//! or the settings rebuilds all of it before returning, so readers never
//! see a stale bracket.
//!
//! ```text
//!  Registration ──start──▶ Group ──finish_group_phase──▶ Knockout ──finish──▶ Finished
//!       │  ▲                 ▲                              │
//!       │  │                 └────return_to_group_phase─────┘
//!       │  └──────────────return_to_registration (any phase)
//!       └──start (knockout format)──────────────────────────▶ Knockout
//! ```

use log::{debug, trace};
use olympiad_core::{EntityIndex, Format, Medal, ParticipationMask, Phase, RegistryError};

use crate::bracket::Bracket;
use crate::entity::{Entity, EntityData};
use crate::groups::{GroupPhase, MatchScore};

/// Tournament state carried by every event slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventData {
    phase: Phase,
    format: Format,
    medals: [u8; 3],
    bracket: Bracket,
    groups: GroupPhase,
}

impl Default for EventData {
    fn default() -> Self {
        Self {
            phase: Phase::Registration,
            format: Format::Knockout,
            medals: [0; 3],
            bracket: Bracket::new(),
            groups: GroupPhase::default(),
        }
    }
}

impl EventData {
    /// Fresh event state with the given group settings.
    pub fn with_group_settings(
        group_size: u8,
        advance_per_group: u8,
    ) -> Result<Self, RegistryError> {
        Ok(Self {
            groups: GroupPhase::with_settings(group_size, advance_per_group)?,
            ..Self::default()
        })
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Competition format.
    pub fn format(&self) -> Format {
        self.format
    }

    /// Holder of `medal`, if awarded.
    pub fn medal(&self, medal: Medal) -> Option<EntityIndex> {
        EntityIndex::from_cell(self.medals[medal.slot()])
    }

    /// Bracket seeded directly from the participation set.
    pub fn bracket(&self) -> &Bracket {
        &self.bracket
    }

    /// The group phase and its qualifiers' bracket.
    pub fn groups(&self) -> &GroupPhase {
        &self.groups
    }

    /// The bracket the current format plays: the qualifiers' bracket for
    /// [`Format::GroupKnockout`], the direct one otherwise.
    pub fn active_bracket(&self) -> &Bracket {
        match self.format {
            Format::Knockout => &self.bracket,
            Format::GroupKnockout => self.groups.bracket(),
        }
    }

    fn active_bracket_mut(&mut self) -> &mut Bracket {
        match self.format {
            Format::Knockout => &mut self.bracket,
            Format::GroupKnockout => self.groups.bracket_mut(),
        }
    }

    fn rebuild(&mut self, participation: ParticipationMask) {
        let seeds = participation.seeds();
        self.groups.construct(&seeds);
        self.bracket.construct(&seeds);
        self.groups.populate_bracket();
        trace!(
            "rebuilt derived state for {} participants ({} groups, bracket size {})",
            seeds.len(),
            self.groups.num_groups(),
            self.bracket.size()
        );
    }

    fn require_phase(&self, expected: Phase) -> Result<(), RegistryError> {
        if self.phase != expected {
            return Err(RegistryError::WrongPhase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    fn transition(&mut self, to: Phase) {
        debug!("phase {} -> {to}", self.phase);
        self.phase = to;
    }
}

impl EntityData for EventData {
    /// Rebuilds groups and brackets. Medals held by someone who no longer
    /// participates are withdrawn. A change outside registration reopens
    /// it, since the rebuilt brackets hold no play.
    fn participation_changed(&mut self, participation: ParticipationMask) {
        if self.phase != Phase::Registration {
            debug!(
                "participation changed during {}, reopening registration",
                self.phase
            );
            self.phase = Phase::Registration;
        }
        for medal in self.medals.iter_mut() {
            let holder = EntityIndex::from_cell(*medal);
            if holder.is_some_and(|h| !participation.contains(h)) {
                *medal = 0;
            }
        }
        self.rebuild(participation);
    }
}

/// An event slot.
pub type Event = Entity<EventData>;

impl Entity<EventData> {
    fn rebuild(&mut self) {
        let participation = self.participation;
        self.data.rebuild(participation);
    }

    /// Choose the competition format. Registration phase only.
    pub fn set_format(&mut self, format: Format) -> Result<(), RegistryError> {
        self.data.require_phase(Phase::Registration)?;
        debug!("format {} -> {format}", self.data.format);
        self.data.format = format;
        Ok(())
    }

    /// Change the target group size (2..=8) and regroup. Registration
    /// phase only. Qualifiers per group shrink to fit if needed.
    pub fn set_group_size(&mut self, group_size: u8) -> Result<(), RegistryError> {
        self.data.require_phase(Phase::Registration)?;
        self.data.groups.set_group_size(group_size)?;
        debug!("group size {group_size}");
        self.rebuild();
        Ok(())
    }

    /// Change how many finishers of each group qualify
    /// (1..=group_size-1) and reseed the qualifiers' bracket.
    pub fn set_advance_per_group(&mut self, advance_per_group: u8) -> Result<(), RegistryError> {
        self.data.groups.set_advance_per_group(advance_per_group)?;
        debug!("advance per group {advance_per_group}");
        self.data.groups.populate_bracket();
        Ok(())
    }

    /// Close registration and start play: the group phase for
    /// [`Format::GroupKnockout`], the knockout otherwise.
    pub fn start(&mut self) -> Result<Phase, RegistryError> {
        self.data.require_phase(Phase::Registration)?;
        let count = self.participation.len();
        if count < 2 {
            return Err(RegistryError::NotEnoughParticipants { count });
        }
        let to = match self.data.format {
            Format::GroupKnockout => Phase::Group,
            Format::Knockout => Phase::Knockout,
        };
        self.data.transition(to);
        Ok(to)
    }

    /// End the group phase; the qualifiers' bracket becomes the one in play.
    pub fn finish_group_phase(&mut self) -> Result<(), RegistryError> {
        self.data.require_phase(Phase::Group)?;
        self.data.transition(Phase::Knockout);
        Ok(())
    }

    /// Reopen the group phase. Group scores are kept; both brackets are
    /// reseeded, discarding any advancement.
    pub fn return_to_group_phase(&mut self) -> Result<(), RegistryError> {
        if self.data.format != Format::GroupKnockout {
            return Err(RegistryError::WrongFormat {
                format: self.data.format,
            });
        }
        self.data.require_phase(Phase::Knockout)?;
        let seeds = self.participation.seeds();
        self.data.bracket.construct(&seeds);
        self.data.groups.populate_bracket();
        self.data.transition(Phase::Group);
        Ok(())
    }

    /// Reopen registration from any phase. All derived state is rebuilt,
    /// so scores and advancements are lost.
    pub fn return_to_registration(&mut self) {
        self.data.transition(Phase::Registration);
        self.rebuild();
    }

    /// Close the event once its bracket has a champion.
    pub fn finish(&mut self) -> Result<EntityIndex, RegistryError> {
        self.data.require_phase(Phase::Knockout)?;
        let champion = self
            .data
            .active_bracket()
            .champion()
            .ok_or(RegistryError::NoChampion)?;
        self.data.transition(Phase::Finished);
        Ok(champion)
    }

    /// Record a group match and reseed the qualifiers' bracket.
    pub fn record_score(
        &mut self,
        group: usize,
        row: usize,
        col: usize,
        score: MatchScore,
    ) -> Result<(), RegistryError> {
        self.data.groups.record_score(group, row, col, score)
    }

    /// Move the entrant at `position` of the bracket in play up a round.
    /// Not allowed during registration.
    pub fn advance_winner(&mut self, position: usize) -> Result<EntityIndex, RegistryError> {
        self.require_play()?;
        let winner = self.data.active_bracket_mut().advance_winner(position)?;
        debug!("{winner} advances from cell {position}");
        Ok(winner)
    }

    /// Take back the advancements of the entrant at `position`.
    /// Not allowed during registration.
    pub fn undo_advance(&mut self, position: usize) -> Result<(), RegistryError> {
        self.require_play()?;
        self.data.active_bracket_mut().undo_advance(position)?;
        debug!("undid advancement from cell {position}");
        Ok(())
    }

    /// Award `medal` to the participant `player`.
    pub fn assign_medal(&mut self, medal: Medal, player: EntityIndex) -> Result<(), RegistryError> {
        if !self.participation.contains(player) {
            return Err(RegistryError::NotParticipant { index: player });
        }
        debug!("{medal} to {player}");
        self.data.medals[medal.slot()] = player.as_cell();
        Ok(())
    }

    /// Withdraw `medal`.
    pub fn revoke_medal(&mut self, medal: Medal) {
        self.data.medals[medal.slot()] = 0;
    }

    fn require_play(&self) -> Result<(), RegistryError> {
        if self.data.phase == Phase::Registration {
            return Err(RegistryError::WrongPhase {
                expected: Phase::Knockout,
                actual: Phase::Registration,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(participants: &[u32]) -> Event {
        let mut e = Entity::vacant(EventData::default());
        e.participation = participants.iter().copied().map(EntityIndex).collect();
        e.rebuild();
        e
    }

    #[test]
    fn new_event_defaults() {
        let data = EventData::default();
        assert_eq!(data.phase(), Phase::Registration);
        assert_eq!(data.format(), Format::Knockout);
        assert_eq!(data.groups().group_size(), 4);
        assert_eq!(data.groups().advance_per_group(), 2);
        assert!(Medal::ALL.iter().all(|&m| data.medal(m).is_none()));
        assert!(data.bracket().is_empty());
    }

    #[test]
    fn participation_change_rebuilds_everything() {
        let mut data = EventData::default();
        let mask: ParticipationMask = [3, 6, 8].into_iter().map(EntityIndex).collect();
        data.participation_changed(mask);
        assert_eq!(data.bracket().get(1), Some(EntityIndex(3)));
        assert_eq!(data.groups().num_groups(), 1);
        assert_eq!(data.groups().bracket().size(), 2);

        data.participation_changed(ParticipationMask::empty());
        assert!(data.bracket().is_empty());
        assert_eq!(data.groups().num_groups(), 0);
        assert!(data.groups().bracket().is_empty());
    }

    #[test]
    fn participation_change_during_play_reopens_registration() {
        let mut e = event(&[1, 2, 3, 4]);
        e.start().unwrap();
        e.advance_winner(3).unwrap();
        e.assign_medal(Medal::Gold, EntityIndex(2)).unwrap();

        e.participation.remove(EntityIndex(4));
        let mask = e.participation;
        e.data.participation_changed(mask);
        assert_eq!(e.data().phase(), Phase::Registration);
        assert!(e.data().bracket().champion().is_none());
        assert_eq!(e.data().medal(Medal::Gold), Some(EntityIndex(2)));

        e.start().unwrap();
        e.advance_winner(1).unwrap();
        e.finish().unwrap();
        e.participation.clear();
        e.data.participation_changed(ParticipationMask::empty());
        assert_eq!(e.data().phase(), Phase::Registration);
        assert!(e.start().is_err());
    }

    #[test]
    fn start_needs_two() {
        let mut e = event(&[1]);
        assert_eq!(
            e.start(),
            Err(RegistryError::NotEnoughParticipants { count: 1 })
        );
        let mut e = event(&[1, 2]);
        assert_eq!(e.start(), Ok(Phase::Knockout));
        assert_eq!(
            e.start(),
            Err(RegistryError::WrongPhase {
                expected: Phase::Registration,
                actual: Phase::Knockout
            })
        );
    }

    #[test]
    fn group_format_lifecycle() {
        let mut e = event(&[1, 2, 3, 4, 5, 6, 7, 8]);
        e.set_format(Format::GroupKnockout).unwrap();
        assert_eq!(e.start(), Ok(Phase::Group));
        assert!(e.set_format(Format::Knockout).is_err());
        assert!(e.set_group_size(3).is_err());

        e.record_score(0, 3, 0, MatchScore::new(1, 0)).unwrap();
        e.finish_group_phase().unwrap();
        assert_eq!(e.data().phase(), Phase::Knockout);
        assert!(e.finish_group_phase().is_err());

        e.return_to_group_phase().unwrap();
        assert_eq!(e.data().phase(), Phase::Group);
        // Scores survive the return.
        assert_eq!(
            e.data().groups().score(0, 3, 0),
            Ok(MatchScore::new(1, 0))
        );

        e.return_to_registration();
        assert_eq!(e.data().phase(), Phase::Registration);
        assert_eq!(
            e.data().groups().score(0, 3, 0),
            Ok(MatchScore::UNPLAYED)
        );
    }

    #[test]
    fn return_to_group_needs_group_format() {
        let mut e = event(&[1, 2]);
        e.start().unwrap();
        assert_eq!(
            e.return_to_group_phase(),
            Err(RegistryError::WrongFormat {
                format: Format::Knockout
            })
        );
    }

    #[test]
    fn advance_only_while_playing() {
        let mut e = event(&[1, 2]);
        assert!(matches!(
            e.advance_winner(1),
            Err(RegistryError::WrongPhase { .. })
        ));
        e.start().unwrap();
        assert_eq!(e.finish(), Err(RegistryError::NoChampion));
        assert_eq!(e.advance_winner(2), Ok(EntityIndex(2)));
        assert_eq!(e.finish(), Ok(EntityIndex(2)));
        assert_eq!(e.data().phase(), Phase::Finished);
    }

    #[test]
    fn advance_uses_bracket_of_format() {
        let mut e = event(&[1, 2, 3, 4]);
        e.set_format(Format::GroupKnockout).unwrap();
        e.start().unwrap();
        e.finish_group_phase().unwrap();
        // One group of four, qualifiers 1 and 2 meet in the final.
        assert_eq!(e.data().active_bracket().get(1), Some(EntityIndex(1)));
        e.advance_winner(1).unwrap();
        assert_eq!(e.data().groups().bracket().champion(), Some(EntityIndex(1)));
        assert!(e.data().bracket().champion().is_none());
        e.undo_advance(1).unwrap();
        assert!(e.data().active_bracket().champion().is_none());
    }

    #[test]
    fn group_size_clamps_advance() {
        let mut e = event(&[1, 2, 3, 4, 5]);
        e.set_advance_per_group(3).unwrap();
        e.set_group_size(2).unwrap();
        assert_eq!(e.data().groups().advance_per_group(), 1);
        assert_eq!(e.data().groups().num_groups(), 2);
        assert!(e.set_advance_per_group(2).is_err());
    }

    #[test]
    fn medals_only_for_participants() {
        let mut e = event(&[2, 7]);
        assert_eq!(
            e.assign_medal(Medal::Gold, EntityIndex(3)),
            Err(RegistryError::NotParticipant {
                index: EntityIndex(3)
            })
        );
        e.assign_medal(Medal::Bronze, EntityIndex(7)).unwrap();
        assert_eq!(e.data().medal(Medal::Bronze), Some(EntityIndex(7)));
        e.revoke_medal(Medal::Bronze);
        assert_eq!(e.data().medal(Medal::Bronze), None);
    }

    #[test]
    fn withdrawn_participant_loses_medal() {
        let mut data = EventData::default();
        data.medals = [4, 5, 4];
        let mask: ParticipationMask = [5, 6].into_iter().map(EntityIndex).collect();
        data.participation_changed(mask);
        assert_eq!(data.medal(Medal::Gold), None);
        assert_eq!(data.medal(Medal::Silver), Some(EntityIndex(5)));
        assert_eq!(data.medal(Medal::Bronze), None);
    }
}
