//! Missionaries and cannibals.
//!
//! Everyone starts on the left bank with the boat. The boat carries one or
//! two people and must never leave a bank where missionaries are present
//! but outnumbered by cannibals.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::search::{search, SearchConfig, SearchNode, SearchResult, StackFrontier, Successors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiverSide {
    #[serde(rename = "L")]
    Left,
    #[serde(rename = "R")]
    Right,
}

impl RiverSide {
    pub fn opposite(self) -> RiverSide {
        match self {
            RiverSide::Left => RiverSide::Right,
            RiverSide::Right => RiverSide::Left,
        }
    }
}

impl fmt::Display for RiverSide {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RiverSide::Left => write!(f, "L"),
            RiverSide::Right => write!(f, "R"),
        }
    }
}

/// Who is standing on one bank, and whether the boat is moored there
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RiverBank {
    pub side: RiverSide,
    pub missionaries: u32,
    pub cannibals: u32,
    pub boat: bool,
}

impl RiverBank {
    pub fn new(side: RiverSide, missionaries: u32, cannibals: u32, boat: bool) -> Self {
        Self {
            side,
            missionaries,
            cannibals,
            boat,
        }
    }

    /// Encoded occupancy, e.g. `L:3m,3c,b`
    pub fn id(&self) -> String {
        let boat = if self.boat { ",b" } else { "" };
        format!(
            "{}:{}m,{}c{}",
            self.side, self.missionaries, self.cannibals, boat
        )
    }

    /// Cannibals may not outnumber missionaries while any missionary is here
    pub fn is_valid(&self) -> bool {
        self.missionaries == 0 || self.cannibals <= self.missionaries
    }
}

/// Boat loads tried from the boat's bank, in order: (missionaries, cannibals)
pub const BOAT_LOADS: [(u32, u32); 5] = [(2, 0), (0, 2), (1, 1), (1, 0), (0, 1)];

/// Both banks of the river
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CrossingState {
    left: RiverBank,
    right: RiverBank,
}

impl CrossingState {
    /// Pair two banks, placing each by its side label
    pub fn new(current: RiverBank, next: RiverBank) -> Self {
        match current.side {
            RiverSide::Left => Self {
                left: current,
                right: next,
            },
            RiverSide::Right => Self {
                left: next,
                right: current,
            },
        }
    }

    /// Everyone on the left bank with the boat
    pub fn start(missionaries: u32, cannibals: u32) -> Result<Self> {
        Self::check_counts(missionaries, cannibals)?;
        Ok(Self::new(
            RiverBank::new(RiverSide::Left, missionaries, cannibals, true),
            RiverBank::new(RiverSide::Right, 0, 0, false),
        ))
    }

    /// Everyone on the right bank with the boat
    pub fn goal(missionaries: u32, cannibals: u32) -> Result<Self> {
        Self::check_counts(missionaries, cannibals)?;
        Ok(Self::new(
            RiverBank::new(RiverSide::Left, 0, 0, false),
            RiverBank::new(RiverSide::Right, missionaries, cannibals, true),
        ))
    }

    fn check_counts(missionaries: u32, cannibals: u32) -> Result<()> {
        if missionaries == 0 && cannibals == 0 {
            return Err(Error::InvalidBankCounts {
                missionaries,
                cannibals,
            });
        }
        Ok(())
    }

    pub fn left(&self) -> &RiverBank {
        &self.left
    }

    pub fn right(&self) -> &RiverBank {
        &self.right
    }

    /// The bank the boat is moored at
    pub fn boat_side(&self) -> &RiverBank {
        if self.left.boat {
            &self.left
        } else {
            &self.right
        }
    }

    /// The bank across from the boat
    pub fn far_side(&self) -> &RiverBank {
        if self.left.boat {
            &self.right
        } else {
            &self.left
        }
    }

    pub fn id(&self) -> String {
        format!("{}-{}", self.left.id(), self.right.id())
    }

    pub fn is_valid(&self) -> bool {
        self.left.is_valid() && self.right.is_valid()
    }

    /// Nobody left behind and the boat on the right bank
    pub fn goal_test(&self) -> bool {
        self.left.missionaries == 0 && self.left.cannibals == 0 && self.right.boat
    }

    /// Every crossing the boat's bank can staff, valid or not
    pub fn successors(&self) -> Successors<CrossingState> {
        let from = self.boat_side();
        let to = self.far_side();

        BOAT_LOADS
            .iter()
            .filter(|&&(m, c)| from.missionaries >= m && from.cannibals >= c)
            .map(|&(m, c)| {
                let stay = RiverBank::new(from.side, from.missionaries - m, from.cannibals - c, false);
                let land = RiverBank::new(to.side, to.missionaries + m, to.cannibals + c, true);
                CrossingState::new(stay, land)
            })
            .collect()
    }
}

impl fmt::Display for CrossingState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl SearchNode for CrossingState {
    fn id(&self) -> String {
        CrossingState::id(self)
    }

    fn expand(&self) -> Result<Successors<Self>> {
        Ok(self.successors())
    }

    fn is_valid(&self) -> bool {
        CrossingState::is_valid(self)
    }
}

/// Depth-first search moving the whole population to the right bank
pub fn solve_river_crossing(
    missionaries: u32,
    cannibals: u32,
    config: &SearchConfig,
) -> Result<SearchResult<CrossingState>> {
    let start = CrossingState::start(missionaries, cannibals)?;
    let goal = CrossingState::goal(missionaries, cannibals)?;
    search(start, &goal.id(), StackFrontier::new(), config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classic_start() -> CrossingState {
        CrossingState::start(3, 3).unwrap()
    }

    #[test]
    fn test_ids() {
        assert_eq!(classic_start().id(), "L:3m,3c,b-R:0m,0c");
        assert_eq!(CrossingState::goal(3, 3).unwrap().id(), "L:0m,0c-R:3m,3c,b");
        assert!(CrossingState::goal(3, 3).unwrap().goal_test());
        assert!(!classic_start().goal_test());
    }

    #[test]
    fn test_new_places_banks_by_side() {
        let right = RiverBank::new(RiverSide::Right, 1, 1, true);
        let left = RiverBank::new(RiverSide::Left, 2, 2, false);
        let state = CrossingState::new(right, left);

        assert_eq!(state.left(), &left);
        assert_eq!(state.right(), &right);
        assert_eq!(state.boat_side(), &right);
        assert_eq!(state.far_side(), &left);
    }

    #[test]
    fn test_bank_validity() {
        assert!(RiverBank::new(RiverSide::Left, 0, 3, false).is_valid());
        assert!(RiverBank::new(RiverSide::Left, 2, 2, false).is_valid());
        assert!(!RiverBank::new(RiverSide::Left, 1, 2, false).is_valid());

        let state = CrossingState::new(
            RiverBank::new(RiverSide::Left, 2, 3, false),
            RiverBank::new(RiverSide::Right, 1, 0, true),
        );
        assert!(!state.is_valid());
    }

    #[test]
    fn test_successors_from_start() {
        let ids: Vec<String> = classic_start().successors().iter().map(CrossingState::id).collect();
        assert_eq!(
            ids,
            vec![
                "L:1m,3c-R:2m,0c,b",
                "L:3m,1c-R:0m,2c,b",
                "L:2m,2c-R:1m,1c,b",
                "L:2m,3c-R:1m,0c,b",
                "L:3m,2c-R:0m,1c,b",
            ]
        );
    }

    #[test]
    fn test_successors_respect_population() {
        let state = CrossingState::new(
            RiverBank::new(RiverSide::Right, 0, 1, true),
            RiverBank::new(RiverSide::Left, 3, 2, false),
        );
        let children = state.successors();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id(), "L:3m,3c,b-R:0m,0c");
    }

    #[test]
    fn test_population_is_conserved() {
        for child in classic_start().successors() {
            assert_eq!(child.left().missionaries + child.right().missionaries, 3);
            assert_eq!(child.left().cannibals + child.right().cannibals, 3);
            assert!(child.right().boat && !child.left().boat);
        }
    }

    #[test]
    fn test_empty_population_rejected() {
        assert!(matches!(
            CrossingState::start(0, 0),
            Err(Error::InvalidBankCounts { .. })
        ));
    }

    #[test]
    fn test_large_population_accepted() {
        let state = CrossingState::start(u32::MAX, 1).unwrap();
        assert_eq!(state.left().missionaries, u32::MAX);
        assert_eq!(state.left().cannibals, 1);
        assert!(CrossingState::goal(1, u32::MAX).unwrap().goal_test());
    }

    #[test]
    fn test_classic_crossing_solved() {
        let result = solve_river_crossing(3, 3, &SearchConfig::default()).unwrap();
        let solution = result.solution.unwrap();

        assert_eq!(solution.path.first().map(String::as_str), Some("L:3m,3c,b-R:0m,0c"));
        assert_eq!(solution.path.last().map(String::as_str), Some("L:0m,0c-R:3m,3c,b"));
        assert_eq!(solution.moves, 11);
        assert!(solution.goal.goal_test());
    }

    #[test]
    fn test_four_and_four_exhausts() {
        let result = solve_river_crossing(4, 4, &SearchConfig::default()).unwrap();
        assert_eq!(result.status, crate::search::SearchStatus::Exhausted);
        assert!(result.solution.is_none());
    }
}
