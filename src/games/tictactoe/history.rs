//! Board snapshot history with time-travel support.

use super::action::Move;
use super::types::{Board, Player};
use super::Position;
use tracing::{debug, instrument};

/// Label of one history entry as shown in the move list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum EntryLabel {
    /// The initial empty board.
    #[display("Start of game")]
    Start,
    /// The board after move number `_0` (1-based).
    #[display("Move #{}", _0)]
    Move(usize),
}

/// One entry of the move list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Index into the history.
    pub index: usize,
    /// Display label.
    pub label: EntryLabel,
    /// The move that produced this snapshot (none for the start).
    pub played: Option<Move>,
}

impl std::fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.played {
            Some(mv) => write!(f, "{} ({})", self.label, mv),
            None => write!(f, "{}", self.label),
        }
    }
}

/// Ordered board snapshots, always starting with the empty board.
///
/// The list is linear: committing a board after an earlier index drops
/// every snapshot past that index first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    pub(crate) boards: Vec<Board>,
}

impl History {
    /// Creates a history holding only the empty board.
    pub fn new() -> Self {
        Self {
            boards: vec![Board::new()],
        }
    }

    /// Number of snapshots (never zero).
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    /// Always false: the start board is never removed.
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    /// Index of the newest snapshot.
    pub fn last_index(&self) -> usize {
        self.boards.len() - 1
    }

    /// Snapshot at `index`.
    pub fn get(&self, index: usize) -> Option<&Board> {
        self.boards.get(index)
    }

    /// All snapshots, oldest first.
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// Drops every snapshot after `after`, appends `board`, and returns the
    /// index of the new snapshot.
    #[instrument(skip(self, board), fields(len = self.boards.len()))]
    pub fn commit(&mut self, after: usize, board: Board) -> usize {
        let dropped = self.boards.len().saturating_sub(after + 1);
        if dropped > 0 {
            debug!(dropped, "Truncating forward history");
        }
        self.boards.truncate(after + 1);
        self.boards.push(board);
        self.last_index()
    }

    /// Collapses back to the single empty board.
    pub fn clear(&mut self) {
        self.boards.truncate(1);
        self.boards[0] = Board::new();
    }

    /// The move that turned snapshot `index - 1` into snapshot `index`.
    ///
    /// Returns `None` for the first snapshot or if the two boards do not
    /// differ by exactly one newly placed mark.
    pub fn move_at(&self, index: usize) -> Option<Move> {
        let before = self.boards.get(index.checked_sub(1)?)?;
        let after = self.boards.get(index)?;

        let mut placed = Position::ALL
            .into_iter()
            .filter(|pos| before.get(*pos) != after.get(*pos));
        let pos = placed.next()?;
        if placed.next().is_some() || !before.is_empty(pos) {
            return None;
        }
        let player: Player = after.get(pos).player()?;
        Some(Move::new(player, pos))
    }

    /// Entries for the move list.
    pub fn entries(&self) -> Vec<HistoryEntry> {
        (0..self.boards.len())
            .map(|index| HistoryEntry {
                index,
                label: if index == 0 {
                    EntryLabel::Start
                } else {
                    EntryLabel::Move(index)
                },
                played: self.move_at(index),
            })
            .collect()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn played(history: &mut History, moves: &[(Position, Player)]) {
        for (pos, player) in moves {
            let last = history.last_index();
            let next = history.get(last).unwrap().with_mark(*pos, *player);
            history.commit(last, next);
        }
    }

    #[test]
    fn test_starts_with_empty_board() {
        let history = History::new();
        assert_eq!(history.len(), 1);
        assert_eq!(history.get(0), Some(&Board::new()));
    }

    #[test]
    fn test_commit_truncates_forward_entries() {
        let mut history = History::new();
        played(
            &mut history,
            &[
                (Position::TopLeft, Player::X),
                (Position::Center, Player::O),
                (Position::TopRight, Player::X),
            ],
        );
        assert_eq!(history.len(), 4);

        let branch = history.get(1).unwrap().with_mark(Position::BottomLeft, Player::O);
        let index = history.commit(1, branch);

        assert_eq!(index, 2);
        assert_eq!(history.len(), 3);
        assert_eq!(
            history.move_at(2),
            Some(Move::new(Player::O, Position::BottomLeft))
        );
    }

    #[test]
    fn test_entry_labels() {
        let mut history = History::new();
        played(&mut history, &[(Position::Center, Player::X)]);

        let entries = history.entries();
        assert_eq!(entries[0].to_string(), "Start of game");
        assert_eq!(entries[1].label.to_string(), "Move #1");
        assert_eq!(entries[1].to_string(), "Move #1 (X → Center)");
    }

    #[test]
    fn test_clear_restores_initial_state() {
        let mut history = History::new();
        played(&mut history, &[(Position::Center, Player::X)]);
        history.clear();
        assert_eq!(history, History::new());
    }
}
