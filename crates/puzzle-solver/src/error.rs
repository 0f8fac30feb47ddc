//! Error types for the puzzle solver.

use thiserror::Error;

use crate::eight_puzzle::Direction;

/// Main error type for the puzzle solver
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid direction '{token}' (expected one of: l, r, u, d)")]
    InvalidDirection { token: String },

    #[error("blank at ({x}, {y}) cannot move {direction:?}")]
    BlockedMove { direction: Direction, x: usize, y: usize },

    #[error("cell ({x}, {y}) is out of bounds (must be 0-2)")]
    OutOfBounds { x: usize, y: usize },

    #[error("grid must be 3x3, got {rows} rows with row lengths {columns:?}")]
    GridShape { rows: usize, columns: Vec<usize> },

    #[error("tile label {label} is out of range (must be 0-8)")]
    InvalidTile { label: u8 },

    #[error("tile label {label} appears more than once")]
    DuplicateTile { label: u8 },

    #[error("river crossing needs at least one person, got {missionaries} missionaries and {cannibals} cannibals")]
    InvalidBankCounts { missionaries: u32, cannibals: u32 },

    #[error("malformed puzzle JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
