//! Single-elimination brackets stored as an implicit binary tree.
//!
//! Cell 0 is the final; the children of cell *i* are 2*i*+1 and 2*i*+2.
//! A cell holds 0 (empty, "to be decided") or an entrant's entity index.
//! The leaf row of a bracket for `size` entrants starts at `size - 1`.

use olympiad_core::{EntityIndex, RegistryError, BRACKET_CELLS};

/// A knockout bracket for at most [`MAX_ENTITIES`](olympiad_core::MAX_ENTITIES)
/// entrants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bracket {
    cells: [u8; BRACKET_CELLS],
    size: u32,
}

impl Default for Bracket {
    fn default() -> Self {
        Self::new()
    }
}

impl Bracket {
    /// An empty bracket.
    pub const fn new() -> Self {
        Self {
            cells: [0; BRACKET_CELLS],
            size: 0,
        }
    }

    /// Rebuild from `seeds`, best seed first.
    ///
    /// The bracket size is the smallest power of two that fits every seed.
    /// The `size - n` best seeds get byes: each is placed directly in the
    /// parent of an even leaf, from the left. The rest fill consecutive
    /// leaves after the last bye pair and meet in the first round.
    pub fn construct(&mut self, seeds: &[EntityIndex]) {
        self.clear();
        let n = seeds.len();
        if n == 0 {
            return;
        }
        debug_assert!(n <= BRACKET_CELLS / 2 + 1, "too many seeds: {n}");

        let size = n.next_power_of_two();
        let byes = size - n;
        let leaf_start = size - 1;
        self.size = size as u32;

        let (bye_seeds, fighting) = seeds.split_at(byes);
        for (i, seed) in bye_seeds.iter().enumerate() {
            let leaf = leaf_start + 2 * i;
            self.cells[parent(leaf)] = seed.as_cell();
        }
        let first_fight = leaf_start + 2 * byes;
        for (i, seed) in fighting.iter().enumerate() {
            self.cells[first_fight + i] = seed.as_cell();
        }
    }

    /// Empty every cell.
    pub fn clear(&mut self) {
        self.cells = [0; BRACKET_CELLS];
        self.size = 0;
    }

    /// Entrant at `position`, or `None` if empty or out of range.
    pub fn get(&self, position: usize) -> Option<EntityIndex> {
        self.cells
            .get(position)
            .copied()
            .and_then(EntityIndex::from_cell)
    }

    /// Raw cell values.
    pub fn cells(&self) -> &[u8; BRACKET_CELLS] {
        &self.cells
    }

    /// Number of leaf slots (a power of two), or 0 for an empty bracket.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of rounds to play, i.e. the depth of the leaf row.
    pub fn rounds(&self) -> u32 {
        if self.size == 0 {
            0
        } else {
            self.size.trailing_zeros()
        }
    }

    /// Returns `true` if no cell holds an entrant.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == 0)
    }

    /// The winner, once the final has been decided.
    pub fn champion(&self) -> Option<EntityIndex> {
        self.get(0)
    }

    /// Move the entrant at `position` up into the next round.
    pub fn advance_winner(&mut self, position: usize) -> Result<EntityIndex, RegistryError> {
        let winner = match self.get(position) {
            Some(winner) if position > 0 => winner,
            _ => return Err(RegistryError::InvalidBracketPosition { position }),
        };
        self.cells[parent(position)] = winner.as_cell();
        Ok(winner)
    }

    /// Take back every advancement the entrant at `position` made above it.
    ///
    /// Ancestors holding a different entrant are left alone.
    pub fn undo_advance(&mut self, position: usize) -> Result<(), RegistryError> {
        let entrant = match self.get(position) {
            Some(entrant) => entrant.as_cell(),
            None => return Err(RegistryError::InvalidBracketPosition { position }),
        };
        let mut pos = position;
        while pos > 0 {
            pos = parent(pos);
            if self.cells[pos] == entrant {
                self.cells[pos] = 0;
            }
        }
        Ok(())
    }

    /// The two cells that feed `position`, if it is not a leaf.
    pub fn children(position: usize) -> Option<(usize, usize)> {
        let left = 2 * position + 1;
        (left + 1 < BRACKET_CELLS).then_some((left, left + 1))
    }
}

/// Cell that the winner of `position` moves into. `position` must be > 0.
pub fn parent(position: usize) -> usize {
    (position - 1) / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeds(ids: &[u32]) -> Vec<EntityIndex> {
        ids.iter().copied().map(EntityIndex).collect()
    }

    fn filled(b: &Bracket) -> Vec<(usize, u8)> {
        b.cells()
            .iter()
            .enumerate()
            .filter(|(_, &c)| c != 0)
            .map(|(i, &c)| (i, c))
            .collect()
    }

    #[test]
    fn three_entrants_one_bye() {
        let mut b = Bracket::new();
        b.construct(&seeds(&[3, 6, 8]));
        assert_eq!(b.size(), 4);
        assert_eq!(filled(&b), vec![(1, 3), (5, 6), (6, 8)]);
        assert_eq!(b.rounds(), 2);
    }

    #[test]
    fn two_entrants_meet_in_final() {
        let mut b = Bracket::new();
        b.construct(&seeds(&[1, 2]));
        assert_eq!(filled(&b), vec![(1, 1), (2, 2)]);
        assert_eq!(b.rounds(), 1);
    }

    #[test]
    fn single_entrant_is_champion() {
        let mut b = Bracket::new();
        b.construct(&seeds(&[9]));
        assert_eq!(b.champion(), Some(EntityIndex(9)));
        assert_eq!(b.rounds(), 0);
    }

    #[test]
    fn five_entrants_three_byes() {
        let mut b = Bracket::new();
        b.construct(&seeds(&[1, 2, 3, 4, 5]));
        // Leaves start at 7; byes go to parents of 7, 9, 11.
        assert_eq!(filled(&b), vec![(3, 1), (4, 2), (5, 3), (13, 4), (14, 5)]);
    }

    #[test]
    fn power_of_two_has_no_byes() {
        let mut b = Bracket::new();
        b.construct(&seeds(&[1, 2, 3, 4, 5, 6, 7, 8]));
        let leaves: Vec<u8> = b.cells()[7..15].to_vec();
        assert_eq!(leaves, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert!(b.cells()[..7].iter().all(|&c| c == 0));
    }

    #[test]
    fn empty_seeds_clear() {
        let mut b = Bracket::new();
        b.construct(&seeds(&[1, 2, 3]));
        b.construct(&[]);
        assert!(b.is_empty());
        assert_eq!(b.size(), 0);
    }

    #[test]
    fn advance_and_undo() {
        let mut b = Bracket::new();
        b.construct(&seeds(&[3, 6, 8]));
        let before = b.clone();

        assert_eq!(b.advance_winner(6), Ok(EntityIndex(8)));
        assert_eq!(b.get(2), Some(EntityIndex(8)));
        assert_eq!(b.advance_winner(2), Ok(EntityIndex(8)));
        assert_eq!(b.champion(), Some(EntityIndex(8)));

        b.undo_advance(6).unwrap();
        assert_eq!(b, before);
    }

    #[test]
    fn undo_leaves_other_entrants() {
        let mut b = Bracket::new();
        b.construct(&seeds(&[3, 6, 8]));
        b.advance_winner(5).unwrap();
        b.advance_winner(1).unwrap();
        b.undo_advance(6).unwrap();
        assert_eq!(b.get(2), Some(EntityIndex(6)));
        assert_eq!(b.champion(), Some(EntityIndex(3)));
    }

    #[test]
    fn advance_rejects_root_and_empty_cells() {
        let mut b = Bracket::new();
        b.construct(&seeds(&[1, 2]));
        b.advance_winner(1).unwrap();
        assert_eq!(
            b.advance_winner(0),
            Err(RegistryError::InvalidBracketPosition { position: 0 })
        );
        assert!(b.advance_winner(4).is_err());
        assert!(b.advance_winner(BRACKET_CELLS).is_err());
        assert!(b.undo_advance(5).is_err());
    }

    #[test]
    fn children_of_root() {
        assert_eq!(Bracket::children(0), Some((1, 2)));
        assert_eq!(Bracket::children(63), None);
        assert_eq!(parent(2), 0);
        assert_eq!(parent(14), 6);
    }

    mod proptests {
        use super::*;
        use olympiad_core::ParticipationMask;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn every_seed_placed_exactly_once(bits in any::<u64>()) {
                // Sentinel positions never carry entrants.
                let mask = ParticipationMask(bits & !1 & !(1 << 63));
                let seeds = mask.seeds();
                let mut b = Bracket::new();
                b.construct(&seeds);
                let mut placed: Vec<u8> =
                    b.cells().iter().copied().filter(|&c| c != 0).collect();
                placed.sort_unstable();
                let expected: Vec<u8> = seeds.iter().map(|s| s.as_cell()).collect();
                prop_assert_eq!(placed, expected);
            }

            #[test]
            fn bye_count_matches_power_of_two(n in 1usize..=62) {
                let seeds: Vec<EntityIndex> = (1..=n as u32).map(EntityIndex).collect();
                let mut b = Bracket::new();
                b.construct(&seeds);
                let size = b.size() as usize;
                prop_assert!(size >= n && size < 2 * n.max(1));
                let leaf_start = size - 1;
                let on_leaves = b.cells()[leaf_start..leaf_start + size]
                    .iter()
                    .filter(|&&c| c != 0)
                    .count();
                prop_assert_eq!(on_leaves, n - (size - n));
            }
        }
    }
}
