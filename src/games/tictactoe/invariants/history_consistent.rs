//! History consistency invariant: snapshot `i` holds exactly `i` marks.

use super::super::{Board, History};
use super::Invariant;

/// Invariant: history starts with the empty board and snapshot `i` has
/// exactly `i` occupied squares.
pub struct HistoryConsistentInvariant;

impl Invariant<History> for HistoryConsistentInvariant {
    fn holds(history: &History) -> bool {
        history.get(0) == Some(&Board::new())
            && history
                .boards()
                .iter()
                .enumerate()
                .all(|(i, board)| board.occupied() == i)
    }

    fn description() -> &'static str {
        "History starts empty and snapshot i holds i marks"
    }
}
