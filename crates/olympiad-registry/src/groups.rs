//! Round-robin group phase feeding a qualifiers' bracket.
//!
//! Participants are dealt into groups in seed order. Each group keeps a
//! square score matrix indexed by local slot; cell `[row][col]` is the
//! match from the row participant's side, and recording a score always
//! writes the mirrored cell too. The top finishers of every group are
//! seeded into [`GroupPhase::bracket`].

use log::trace;
use olympiad_core::{
    EntityIndex, MatchResult, RegistryError, Seeds, DEFAULT_ADVANCE_PER_GROUP,
    DEFAULT_GROUP_SIZE, GROUP_NONE, GROUP_SLOTS, MAX_ENTITIES, MAX_GROUPS, MAX_GROUP_SIZE,
    MIN_GROUP_SIZE,
};

use crate::bracket::Bracket;
use crate::standings::{group_standings, Standings};

/// Score of one group match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MatchScore {
    /// Goals scored by the row participant.
    pub row_score: u16,
    /// Goals scored by the column participant.
    pub col_score: u16,
}

impl MatchScore {
    /// A match that has not been played.
    pub const UNPLAYED: Self = Self {
        row_score: 0,
        col_score: 0,
    };

    /// Create a score.
    pub const fn new(row_score: u16, col_score: u16) -> Self {
        Self {
            row_score,
            col_score,
        }
    }

    /// The same match seen from the column participant's side.
    pub const fn mirrored(self) -> Self {
        Self {
            row_score: self.col_score,
            col_score: self.row_score,
        }
    }

    /// Outcome for the row participant. A 0–0 score counts as unplayed.
    pub fn result(self) -> MatchResult {
        use std::cmp::Ordering;
        match self.row_score.cmp(&self.col_score) {
            Ordering::Greater => MatchResult::Win,
            Ordering::Less => MatchResult::Loss,
            Ordering::Equal if self.row_score == 0 => MatchResult::Unplayed,
            Ordering::Equal => MatchResult::Draw,
        }
    }

    /// Parse a goal count typed by a user.
    ///
    /// Non-digit characters are skipped and the value saturates, so any
    /// input yields a score.
    pub fn parse_goals(input: &str) -> u16 {
        input
            .bytes()
            .filter(u8::is_ascii_digit)
            .fold(0u16, |acc, d| {
                acc.saturating_mul(10).saturating_add(u16::from(d - b'0'))
            })
    }
}

type ScoreMatrix = [[MatchScore; GROUP_SLOTS]; GROUP_SLOTS];

/// Groups, their score matrices, and the qualifiers' bracket of one event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupPhase {
    num_groups: u8,
    group_size: u8,
    advance_per_group: u8,
    groups: [[u8; GROUP_SLOTS]; MAX_GROUPS],
    player_group: [u8; MAX_ENTITIES as usize],
    player_slot: [u8; MAX_ENTITIES as usize],
    scores: [ScoreMatrix; MAX_GROUPS],
    bracket: Bracket,
}

impl Default for GroupPhase {
    fn default() -> Self {
        Self {
            num_groups: 0,
            group_size: DEFAULT_GROUP_SIZE,
            advance_per_group: DEFAULT_ADVANCE_PER_GROUP,
            groups: [[0; GROUP_SLOTS]; MAX_GROUPS],
            player_group: [GROUP_NONE; MAX_ENTITIES as usize],
            player_slot: [0; MAX_ENTITIES as usize],
            scores: [[[MatchScore::UNPLAYED; GROUP_SLOTS]; GROUP_SLOTS]; MAX_GROUPS],
            bracket: Bracket::new(),
        }
    }
}

impl GroupPhase {
    /// An empty group phase with the given settings.
    pub fn with_settings(group_size: u8, advance_per_group: u8) -> Result<Self, RegistryError> {
        validate_settings(group_size, advance_per_group)?;
        Ok(Self {
            group_size,
            advance_per_group,
            ..Self::default()
        })
    }

    /// Deal `seeds` into groups of `group_size`, in order.
    ///
    /// Fewer seeds than `group_size` make a single group. A leftover of
    /// exactly one is spread over the first groups instead of standing
    /// alone; any larger leftover forms a final, smaller group. All
    /// scores are reset. The bracket is left alone.
    pub fn construct(&mut self, seeds: &[EntityIndex]) {
        self.clear_groups();
        let n = seeds.len();
        if n == 0 {
            return;
        }
        let gs = self.group_size as usize;
        let full = n / gs;
        let rem = n % gs;

        let sizes: smallvec::SmallVec<[usize; MAX_GROUPS]> = if n < gs {
            smallvec::smallvec![n]
        } else if rem == 1 {
            (0..full).map(|g| gs + usize::from(g < rem)).collect()
        } else {
            let mut sizes: smallvec::SmallVec<[usize; MAX_GROUPS]> =
                std::iter::repeat(gs).take(full).collect();
            if rem > 0 {
                sizes.push(rem);
            }
            sizes
        };

        let mut next = seeds.iter();
        for (g, &size) in sizes.iter().enumerate() {
            for (slot, seed) in next.by_ref().take(size).enumerate() {
                self.groups[g][slot] = seed.as_cell();
                self.player_group[seed.0 as usize] = g as u8;
                self.player_slot[seed.0 as usize] = slot as u8;
            }
        }
        self.num_groups = sizes.len() as u8;
        trace!("dealt {n} participants into {} groups", self.num_groups);
    }

    /// Empty every group and the bracket; settings are kept.
    pub fn clear(&mut self) {
        self.clear_groups();
        self.bracket.clear();
    }

    fn clear_groups(&mut self) {
        self.num_groups = 0;
        self.groups = [[0; GROUP_SLOTS]; MAX_GROUPS];
        self.player_group = [GROUP_NONE; MAX_ENTITIES as usize];
        self.player_slot = [0; MAX_ENTITIES as usize];
        self.scores = [[[MatchScore::UNPLAYED; GROUP_SLOTS]; GROUP_SLOTS]; MAX_GROUPS];
    }

    /// Number of groups formed.
    pub fn num_groups(&self) -> usize {
        self.num_groups as usize
    }

    /// Target participants per group.
    pub fn group_size(&self) -> u8 {
        self.group_size
    }

    /// Qualifiers taken from each group.
    pub fn advance_per_group(&self) -> u8 {
        self.advance_per_group
    }

    /// Change the target group size, pulling `advance_per_group` down to
    /// `group_size - 1` if needed. Groups are not rebuilt here.
    pub fn set_group_size(&mut self, group_size: u8) -> Result<(), RegistryError> {
        if !(MIN_GROUP_SIZE..=MAX_GROUP_SIZE).contains(&group_size) {
            return Err(RegistryError::InvalidGroupSettings {
                group_size,
                advance_per_group: self.advance_per_group,
            });
        }
        let advance = self.advance_per_group.min(group_size.saturating_sub(1)).max(1);
        validate_settings(group_size, advance)?;
        self.group_size = group_size;
        self.advance_per_group = advance;
        Ok(())
    }

    /// Change how many finishers of each group qualify.
    pub fn set_advance_per_group(&mut self, advance_per_group: u8) -> Result<(), RegistryError> {
        validate_settings(self.group_size, advance_per_group)?;
        self.advance_per_group = advance_per_group;
        Ok(())
    }

    /// Raw slot cells of `group` (0 = empty).
    ///
    /// # Panics
    ///
    /// Panics if `group >= MAX_GROUPS`.
    pub fn slots(&self, group: usize) -> &[u8; GROUP_SLOTS] {
        &self.groups[group]
    }

    /// Members of `group` in slot order.
    pub fn members(&self, group: usize) -> impl Iterator<Item = EntityIndex> + '_ {
        self.groups
            .get(group)
            .into_iter()
            .flat_map(|slots| slots.iter().map_while(|&c| EntityIndex::from_cell(c)))
    }

    /// Number of participants in `group`.
    pub fn group_len(&self, group: usize) -> usize {
        self.members(group).count()
    }

    /// Group and local slot of `player`, if grouped.
    pub fn locate(&self, player: EntityIndex) -> Option<(usize, usize)> {
        let at = player.0 as usize;
        match self.player_group.get(at) {
            Some(&g) if g != GROUP_NONE => Some((g as usize, self.player_slot[at] as usize)),
            _ => None,
        }
    }

    /// Score of the match between slots `row` and `col` of `group`, from
    /// `row`'s side.
    pub fn score(&self, group: usize, row: usize, col: usize) -> Result<MatchScore, RegistryError> {
        self.check_match(group, row, col)?;
        Ok(self.scores[group][row][col])
    }

    /// Record a match result and reseed the qualifiers' bracket.
    pub fn record_score(
        &mut self,
        group: usize,
        row: usize,
        col: usize,
        score: MatchScore,
    ) -> Result<(), RegistryError> {
        self.check_match(group, row, col)?;
        self.scores[group][row][col] = score;
        self.scores[group][col][row] = score.mirrored();
        trace!(
            "group {group}: slot {row} vs slot {col} = {}-{}",
            score.row_score,
            score.col_score
        );
        self.populate_bracket();
        Ok(())
    }

    /// Current standings of `group`, best first.
    pub fn standings(&self, group: usize) -> Standings {
        group_standings(self, group)
    }

    /// Top `advance_per_group` of each group, concatenated in group order.
    pub fn qualifiers(&self) -> Seeds {
        let take = self.advance_per_group as usize;
        (0..self.num_groups())
            .flat_map(|g| self.standings(g).into_iter().take(take))
            .map(|standing| standing.player)
            .collect()
    }

    /// Seed the qualifiers into the bracket, discarding any advancement.
    pub fn populate_bracket(&mut self) {
        let qualifiers = self.qualifiers();
        self.bracket.construct(&qualifiers);
    }

    /// The qualifiers' knockout bracket.
    pub fn bracket(&self) -> &Bracket {
        &self.bracket
    }

    pub(crate) fn bracket_mut(&mut self) -> &mut Bracket {
        &mut self.bracket
    }

    pub(crate) fn raw_score(&self, group: usize, row: usize, col: usize) -> MatchScore {
        self.scores[group][row][col]
    }

    fn check_match(&self, group: usize, row: usize, col: usize) -> Result<(), RegistryError> {
        let len = if group < self.num_groups() {
            self.group_len(group)
        } else {
            0
        };
        if row == col || row >= len || col >= len {
            return Err(RegistryError::InvalidMatch { group, row, col });
        }
        Ok(())
    }
}

fn validate_settings(group_size: u8, advance_per_group: u8) -> Result<(), RegistryError> {
    let size_ok = (MIN_GROUP_SIZE..=MAX_GROUP_SIZE).contains(&group_size);
    if !size_ok || advance_per_group == 0 || advance_per_group >= group_size {
        return Err(RegistryError::InvalidGroupSettings {
            group_size,
            advance_per_group,
        });
    }
    Ok(())
}
