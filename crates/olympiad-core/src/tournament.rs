//! Tournament lifecycle enums shared across the workspace.

use std::fmt;

/// Lifecycle phase of an event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Participants may register and withdraw; structures are provisional.
    #[default]
    Registration,
    /// Round-robin matches inside groups are being played.
    Group,
    /// The elimination bracket is being played.
    Knockout,
    /// A champion has been decided.
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Registration => "registration",
            Self::Group => "group",
            Self::Knockout => "knockout",
            Self::Finished => "finished",
        };
        f.write_str(s)
    }
}

/// Competition format of an event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Format {
    /// Straight single elimination from the participation set.
    #[default]
    Knockout,
    /// Round-robin groups whose qualifiers feed an elimination bracket.
    GroupKnockout,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Knockout => f.write_str("knockout"),
            Self::GroupKnockout => f.write_str("groups then knockout"),
        }
    }
}

/// Podium position recorded in an event's medal tally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Medal {
    /// First place.
    Gold = 0,
    /// Second place.
    Silver = 1,
    /// Third place.
    Bronze = 2,
}

impl Medal {
    /// All medals, podium order.
    pub const ALL: [Medal; 3] = [Medal::Gold, Medal::Silver, Medal::Bronze];

    /// Position of this medal in a tally array.
    pub fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Medal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gold => f.write_str("gold"),
            Self::Silver => f.write_str("silver"),
            Self::Bronze => f.write_str("bronze"),
        }
    }
}

/// Outcome of a group match from the row participant's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatchResult {
    /// No score recorded (a 0–0 cell counts as unplayed).
    Unplayed,
    /// Row participant scored more.
    Win,
    /// Equal, non-zero score.
    Draw,
    /// Row participant scored less.
    Loss,
}

impl MatchResult {
    /// Standings points awarded for this outcome.
    pub fn points(self) -> i32 {
        match self {
            Self::Win => 3,
            Self::Draw => 1,
            Self::Loss | Self::Unplayed => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_new_event() {
        assert_eq!(Phase::default(), Phase::Registration);
        assert_eq!(Format::default(), Format::Knockout);
    }

    #[test]
    fn medal_slots_are_podium_order() {
        let slots: Vec<usize> = Medal::ALL.iter().map(|m| m.slot()).collect();
        assert_eq!(slots, vec![0, 1, 2]);
    }

    #[test]
    fn points_table() {
        assert_eq!(MatchResult::Win.points(), 3);
        assert_eq!(MatchResult::Draw.points(), 1);
        assert_eq!(MatchResult::Loss.points(), 0);
        assert_eq!(MatchResult::Unplayed.points(), 0);
    }
}
