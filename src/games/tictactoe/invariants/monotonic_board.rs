//! Monotonic board invariant: each step places one mark on an empty square.

use super::super::{History, Position, Square};
use super::Invariant;

/// Invariant: consecutive snapshots differ in exactly one square, which was
/// empty before and is occupied after.
pub struct MonotonicBoardInvariant;

impl Invariant<History> for MonotonicBoardInvariant {
    fn holds(history: &History) -> bool {
        history.boards().windows(2).all(|pair| {
            let changed: Vec<Position> = Position::ALL
                .into_iter()
                .filter(|pos| pair[0].get(*pos) != pair[1].get(*pos))
                .collect();

            matches!(
                changed.as_slice(),
                [pos] if pair[0].get(*pos) == Square::Empty
            )
        })
    }

    fn description() -> &'static str {
        "Each snapshot adds exactly one mark to an empty square"
    }
}
