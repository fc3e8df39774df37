//! First-class invariants for tic-tac-toe history.
//!
//! Invariants are logical properties that must hold after every session
//! transition. They are testable independently and checked in debug builds.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("Invariant violated: {}", description)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implementations are provided for tuples.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns Ok(()) if all invariants hold, or Err with a list of
    /// violations if any invariant fails.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ]
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod alternating_turn;
pub mod history_consistent;
pub mod monotonic_board;

pub use alternating_turn::AlternatingTurnInvariant;
pub use history_consistent::HistoryConsistentInvariant;
pub use monotonic_board::MonotonicBoardInvariant;

/// All history invariants as a composable set.
pub type HistoryInvariants = (
    HistoryConsistentInvariant,
    MonotonicBoardInvariant,
    AlternatingTurnInvariant,
);

/// Checks every history invariant.
pub fn check_history(
    history: &super::History,
) -> Result<(), Vec<InvariantViolation>> {
    HistoryInvariants::check_all(history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Board, History, Player, Position};

    #[test]
    fn test_invariant_set_holds_for_new_history() {
        assert!(check_history(&History::new()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let mut history = History::new();
        let mut board = Board::new();
        for (i, pos) in [Position::TopLeft, Position::Center, Position::TopRight]
            .into_iter()
            .enumerate()
        {
            board = board.with_mark(pos, Player::at_move(i));
            history.commit(i, board);
        }
        assert!(check_history(&history).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_each_violation() {
        let mut history = History::new();
        // Two marks in one step, both O.
        let board = Board::new()
            .with_mark(Position::TopLeft, Player::O)
            .with_mark(Position::Center, Player::O);
        history.boards.push(board);

        let violations = check_history(&history).unwrap_err();
        assert_eq!(violations.len(), 3);
        assert!(violations[0].to_string().starts_with("Invariant violated"));
    }
}
