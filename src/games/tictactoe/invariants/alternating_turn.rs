//! Alternating turn invariant: players alternate X, O, X, O, ...

use super::super::{History, Player};
use super::Invariant;

/// Invariant: the mark placed at step `i` belongs to `Player::at_move(i - 1)`.
///
/// First move is always X.
pub struct AlternatingTurnInvariant;

impl Invariant<History> for AlternatingTurnInvariant {
    fn holds(history: &History) -> bool {
        (1..history.len()).all(|i| {
            history
                .move_at(i)
                .is_some_and(|mv| mv.player == Player::at_move(i - 1))
        })
    }

    fn description() -> &'static str {
        "Players alternate turns starting with X"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Board, Position};

    #[test]
    fn test_alternating_moves_hold() {
        let mut history = History::new();
        let first = Board::new().with_mark(Position::TopLeft, Player::X);
        history.commit(0, first);
        history.commit(1, first.with_mark(Position::Center, Player::O));
        assert!(AlternatingTurnInvariant::holds(&history));
    }

    #[test]
    fn test_o_first_violates() {
        let mut history = History::new();
        history.commit(0, Board::new().with_mark(Position::TopLeft, Player::O));
        assert!(!AlternatingTurnInvariant::holds(&history));
    }
}
