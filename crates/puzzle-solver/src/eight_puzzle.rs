//! The 8-tile sliding puzzle.
//!
//! A state is a 3x3 grid of labels `0..=8` with `0` as the blank. Actions
//! move the blank one cell left, right, up, or down. States are values:
//! every action produces a fresh state and the parent is never touched.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::search::{search, PriorityFrontier, SearchConfig, SearchNode, SearchResult, Successors};

/// Side length of the grid
pub const SIZE: usize = 3;

/// Number of cells (and labels)
pub const CELLS: usize = SIZE * SIZE;

/// Label of the blank cell
pub const BLANK: u8 = 0;

/// Canonical identity of the solved puzzle
pub const SOLVED_ID: &str = "012345678";

/// Direction the blank moves in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Expansion order
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// The move that undoes this one
    pub fn reverse(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Direction::Left => 'l',
            Direction::Right => 'r',
            Direction::Up => 'u',
            Direction::Down => 'd',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self> {
        match token.to_ascii_lowercase().as_str() {
            "l" | "left" => Ok(Direction::Left),
            "r" | "right" => Ok(Direction::Right),
            "u" | "up" => Ok(Direction::Up),
            "d" | "down" => Ok(Direction::Down),
            _ => Err(Error::InvalidDirection {
                token: token.to_string(),
            }),
        }
    }
}

/// Cell coordinates, `x` is the column and `y` the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell in `direction`, if it is on the grid
    pub fn step(self, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.delta();
        let x = self.x as i32 + dx;
        let y = self.y as i32 + dy;
        let range = 0..SIZE as i32;
        if range.contains(&x) && range.contains(&y) {
            Some(Position::new(x as usize, y as usize))
        } else {
            None
        }
    }

    pub fn manhattan(self, other: Position) -> u32 {
        (self.x.abs_diff(other.x) + self.y.abs_diff(other.y)) as u32
    }
}

/// Frontier ordering for the 8-puzzle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Heuristic {
    /// Misplaced cells (blank included) plus moves so far.
    ///
    /// Not admissible: the blank counts as a tile, so paths found under
    /// this ordering are not guaranteed to be shortest.
    #[default]
    MisplacedPlusMoves,
    /// For every misplaced cell: 1, plus that tile's distance to its goal
    /// cell, plus moves so far.
    WeightedMisplaced,
    /// Sum of Manhattan distances of the real tiles plus moves so far (A*).
    Manhattan,
}

impl Heuristic {
    /// Priority of `state` when searching towards `goal`; lower is better
    pub fn score(self, state: &PuzzleState, goal: &PuzzleState) -> u32 {
        let moves = state.moves as u32;
        match self {
            Heuristic::MisplacedPlusMoves => state.misplaced_tiles(goal) + moves,
            Heuristic::WeightedMisplaced => {
                let mut value = 0;
                for y in 0..SIZE {
                    for x in 0..SIZE {
                        let label = state.grid[y][x];
                        if label != goal.grid[y][x] {
                            let target = goal.cell_of(label);
                            value += 1 + Position::new(x, y).manhattan(target) + moves;
                        }
                    }
                }
                value
            }
            Heuristic::Manhattan => state.manhattan_distance(goal) + moves,
        }
    }
}

/// One configuration of the sliding puzzle
#[derive(Debug, Clone)]
pub struct PuzzleState {
    grid: [[u8; SIZE]; SIZE],
    /// label -> current cell
    tiles: [Position; CELLS],
    blank: Position,
    last_move: Option<Direction>,
    moves: usize,
}

impl PuzzleState {
    /// Build a start state, rejecting anything that is not a permutation of 0..=8
    pub fn new(grid: [[u8; SIZE]; SIZE]) -> Result<Self> {
        let mut seen = [false; CELLS];
        let mut tiles = [Position::new(0, 0); CELLS];
        for (y, row) in grid.iter().enumerate() {
            for (x, &label) in row.iter().enumerate() {
                let slot = seen
                    .get_mut(label as usize)
                    .ok_or(Error::InvalidTile { label })?;
                if *slot {
                    return Err(Error::DuplicateTile { label });
                }
                *slot = true;
                tiles[label as usize] = Position::new(x, y);
            }
        }

        Ok(Self {
            grid,
            tiles,
            blank: tiles[BLANK as usize],
            last_move: None,
            moves: 0,
        })
    }

    /// Build a start state from loosely shaped rows (e.g. parsed JSON)
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self> {
        let shape_error = || Error::GridShape {
            rows: rows.len(),
            columns: rows.iter().map(Vec::len).collect(),
        };
        if rows.len() != SIZE {
            return Err(shape_error());
        }

        let mut grid = [[BLANK; SIZE]; SIZE];
        for (target, row) in grid.iter_mut().zip(rows) {
            *target = row.as_slice().try_into().map_err(|_| shape_error())?;
        }
        Self::new(grid)
    }

    /// The solved configuration `012345678`
    pub fn solved() -> Self {
        let mut grid = [[BLANK; SIZE]; SIZE];
        let mut tiles = [Position::new(0, 0); CELLS];
        for (index, tile) in tiles.iter_mut().enumerate() {
            *tile = Position::new(index % SIZE, index / SIZE);
            grid[tile.y][tile.x] = index as u8;
        }

        Self {
            grid,
            tiles,
            blank: tiles[BLANK as usize],
            last_move: None,
            moves: 0,
        }
    }

    pub fn tile_at(&self, x: usize, y: usize) -> Result<u8> {
        if x >= SIZE || y >= SIZE {
            return Err(Error::OutOfBounds { x, y });
        }
        Ok(self.grid[y][x])
    }

    /// Write `label` into a cell of a scratch copy, keeping the derived
    /// positions in step. The caller restores the permutation invariant.
    pub(crate) fn place_tile(&mut self, x: usize, y: usize, label: u8) -> Result<()> {
        if x >= SIZE || y >= SIZE {
            return Err(Error::OutOfBounds { x, y });
        }
        if label as usize >= CELLS {
            return Err(Error::InvalidTile { label });
        }
        let position = Position::new(x, y);
        self.grid[y][x] = label;
        self.tiles[label as usize] = position;
        if label == BLANK {
            self.blank = position;
        }
        Ok(())
    }

    pub fn blank(&self) -> Position {
        self.blank
    }

    /// Cell holding `label`, or `None` for a label outside 0..=8
    pub fn position_of(&self, label: u8) -> Option<Position> {
        self.tiles.get(label as usize).copied()
    }

    /// Cell holding a label read from a grid, which is always 0..=8
    fn cell_of(&self, label: u8) -> Position {
        self.tiles[label as usize]
    }

    pub fn last_move(&self) -> Option<Direction> {
        self.last_move
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn rows(&self) -> &[[u8; SIZE]; SIZE] {
        &self.grid
    }

    /// True iff the blank is not on the grid edge in `direction`
    pub fn can_move(&self, direction: Direction) -> bool {
        self.blank.step(direction).is_some()
    }

    /// Row-major concatenation of all nine labels
    pub fn id(&self) -> String {
        self.grid
            .iter()
            .flatten()
            .map(|label| char::from(b'0' + label))
            .collect()
    }

    pub fn goal_test(&self) -> bool {
        self.id() == SOLVED_ID
    }

    /// Cells whose label differs from `goal`, blank included
    pub fn misplaced_tiles(&self, goal: &PuzzleState) -> u32 {
        self.grid
            .iter()
            .flatten()
            .zip(goal.grid.iter().flatten())
            .filter(|(a, b)| a != b)
            .count() as u32
    }

    /// Sum over the real tiles of the distance to their cell in `goal`
    pub fn manhattan_distance(&self, goal: &PuzzleState) -> u32 {
        (1..CELLS as u8)
            .map(|label| self.cell_of(label).manhattan(goal.cell_of(label)))
            .sum()
    }

    /// Default frontier priority towards the solved puzzle
    pub fn heuristic(&self) -> u32 {
        Heuristic::default().score(self, &PuzzleState::solved())
    }

    /// The state after sliding the blank one cell in `direction`
    pub fn apply(&self, direction: Direction) -> Result<PuzzleState> {
        let from = self.blank;
        let to = from.step(direction).ok_or(Error::BlockedMove {
            direction,
            x: from.x,
            y: from.y,
        })?;

        let mut next = self.clone();
        let tile = self.grid[to.y][to.x];
        next.place_tile(from.x, from.y, tile)?;
        next.place_tile(to.x, to.y, BLANK)?;
        next.last_move = Some(direction);
        next.moves += 1;
        Ok(next)
    }

    /// Every state one move away, except the one that undoes the last move
    pub fn successors(&self) -> Result<SmallVec<[PuzzleState; 4]>> {
        let mut states = SmallVec::new();
        for direction in Direction::ALL {
            if self.last_move == Some(direction.reverse()) || !self.can_move(direction) {
                continue;
            }
            states.push(self.apply(direction)?);
        }
        Ok(states)
    }
}

impl PartialEq for PuzzleState {
    fn eq(&self, other: &Self) -> bool {
        self.grid == other.grid
    }
}

impl Eq for PuzzleState {}

impl Hash for PuzzleState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.grid.hash(state);
    }
}

impl fmt::Display for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in &self.grid {
            let cells: Vec<String> = row.iter().map(u8::to_string).collect();
            writeln!(f, "{}", cells.join(", "))?;
        }
        Ok(())
    }
}

impl SearchNode for PuzzleState {
    fn id(&self) -> String {
        PuzzleState::id(self)
    }

    fn expand(&self) -> Result<Successors<Self>> {
        Ok(self.successors()?.into_iter().collect())
    }
}

/// Best-first search from `start` to `goal`, ordered by `heuristic`
pub fn solve_eight_puzzle(
    start: PuzzleState,
    goal: &PuzzleState,
    heuristic: Heuristic,
    config: &SearchConfig,
) -> Result<SearchResult<PuzzleState>> {
    let frontier = PriorityFrontier::new(|state: &PuzzleState| heuristic.score(state, goal));
    search(start, &goal.id(), frontier, config)
}
