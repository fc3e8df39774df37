//! First-class action types for tic-tac-toe.
//!
//! Moves are domain events, not side effects. Rejected intents come back as
//! typed errors so callers can log them and otherwise ignore them.

use super::{Player, Position};
use serde::{Deserialize, Serialize};

/// A move in tic-tac-toe: a player placing their mark at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The position where the player places their mark.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(player: Player, position: Position) -> Self {
        Self { player, position }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {}", self.player, self.position.label())
    }
}

/// Reason a `play` intent was ignored.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(#[error(not(source))] Position),

    /// The session is in a terminal state.
    #[display("Game is already over")]
    GameOver,

    /// The board at the current position already has a winner.
    #[display("{} has already won this board", _0)]
    AlreadyWon(#[error(not(source))] Player),

    /// The cell index is not on the board.
    #[display("Cell {} is out of bounds (must be 0-8)", _0)]
    OutOfBounds(#[error(not(source))] usize),
}

/// Reason a `jump_to` intent was ignored.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Move {} is out of range (history has {} entries)", requested, len)]
pub struct JumpError {
    /// Requested history index.
    pub requested: usize,
    /// History length at the time of the request.
    pub len: usize,
}
