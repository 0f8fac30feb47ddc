//! State-space search for small discrete puzzles.
//!
//! One search driver serves both puzzles: the 8-tile sliding puzzle is
//! searched best-first under a chosen heuristic, and missionaries and
//! cannibals is searched depth-first.

pub mod eight_puzzle;
pub mod error;
pub mod path;
pub mod river;
pub mod search;

// Re-export main types
pub use eight_puzzle::{solve_eight_puzzle, Direction, Heuristic, Position, PuzzleState};
pub use error::{Error, Result};
pub use path::{reconstruct_path, render_path};
pub use river::{solve_river_crossing, CrossingState, RiverBank, RiverSide};
pub use search::{
    search, Discovered, Frontier, PriorityFrontier, SearchConfig, SearchNode, SearchResult,
    SearchStats, SearchStatus, Solution, StackFrontier,
};
