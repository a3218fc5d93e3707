//! Group standings.

use olympiad_core::{EntityIndex, GROUP_SLOTS};
use smallvec::SmallVec;

use crate::groups::GroupPhase;

/// One participant's line in a group table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Standing {
    /// The participant.
    pub player: EntityIndex,
    /// Local slot within the group.
    pub slot: usize,
    /// 3 per win, 1 per played draw.
    pub points: i32,
    /// Goals scored minus goals conceded.
    pub goal_difference: i32,
    /// Goals scored.
    pub goals_for: i32,
}

impl Standing {
    fn rank_key(&self) -> (i32, i32, i32) {
        (self.points, self.goal_difference, self.goals_for)
    }
}

/// A group table, best first.
pub type Standings = SmallVec<[Standing; GROUP_SLOTS]>;

/// Rank the members of `group` by points, then goal difference, then goals
/// scored. Equal lines keep slot order, so the lower seed places higher.
pub fn group_standings(phase: &GroupPhase, group: usize) -> Standings {
    let members: SmallVec<[EntityIndex; GROUP_SLOTS]> = phase.members(group).collect();
    let mut table: Standings = members
        .iter()
        .enumerate()
        .map(|(slot, &player)| {
            let mut line = Standing {
                player,
                slot,
                points: 0,
                goal_difference: 0,
                goals_for: 0,
            };
            for opponent in (0..members.len()).filter(|&o| o != slot) {
                let score = phase.raw_score(group, slot, opponent);
                let (scored, conceded) = (i32::from(score.row_score), i32::from(score.col_score));
                line.goals_for += scored;
                line.goal_difference += scored - conceded;
                line.points += score.result().points();
            }
            line
        })
        .collect();

    // Stable: ties stay in slot order.
    table.sort_by(|a, b| b.rank_key().cmp(&a.rank_key()));
    table
}
